//! Game state and core simulation types
//!
//! Entity records are plain data; behavior lives in the sibling step modules.
//! `GameState` is the single owned context every step receives.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::timers::{TimerEvent, Timers};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Simulation frozen, frame loop still alive
    Paused,
    /// Run ended (terminal)
    GameOver,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BulletFired { bullet_id: u32 },
    ZombieSpawned { zombie_id: u32, speed: f32 },
    ZombieKilled { bullet_id: u32, zombie_id: u32 },
    PlayerHit { zombie_id: u32, health: u32 },
    GameOver { score: u64 },
}

/// The player's avatar
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Horizontal speed while moving
    pub speed: f32,
    /// Vertical acceleration while airborne
    pub gravity: f32,
    /// Vertical velocity set on jump
    pub jump_strength: f32,
    pub on_ground: bool,
    pub health: u32,
}

impl Player {
    /// Spawn standing on the floor at the horizontal center
    pub fn new(bounds: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(bounds.x / 2.0, bounds.y - PLAYER_HEIGHT),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            speed: tuning.player_speed,
            gravity: tuning.player_gravity,
            jump_strength: tuning.jump_strength,
            on_ground: true,
            health: tuning.max_health,
        }
    }
}

/// A projectile
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub gravity: f32,
}

/// An enemy walking left along the floor
#[derive(Debug, Clone, PartialEq)]
pub struct Zombie {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

/// Spawn cadence, tightened by the periodic ramp
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyState {
    /// Current spawn interval (ms); never below the floor
    pub spawn_interval_ms: f64,
    /// Speed added to later zombies per ramp
    pub speed_increase: f32,
    /// Wall-clock time between ramps (ms)
    pub ramp_period_ms: f64,
    /// Accumulated speed bonus for new zombies
    pub speed_bonus: f32,
    /// Number of ramps applied this run
    pub ramps: u32,
}

impl DifficultyState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            spawn_interval_ms: tuning.initial_spawn_interval_ms,
            speed_increase: tuning.speed_increase,
            ramp_period_ms: tuning.ramp_period_ms,
            speed_bonus: 0.0,
            ramps: 0,
        }
    }
}

/// Rate-limiter state for the fire button
#[derive(Debug, Clone, PartialEq)]
pub struct ShooterState {
    /// Sim time of the last accepted trigger pull
    pub last_shot_ms: Option<f64>,
    /// Bullets fired in the current press
    pub burst_count: u32,
    /// Cleared on each shot, set again by the cooldown timer
    pub can_shoot: bool,
}

impl Default for ShooterState {
    fn default() -> Self {
        Self {
            last_shot_ms: None,
            burst_count: 0,
            can_shoot: true,
        }
    }
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Canvas size; the floor is at `bounds.y`
    pub bounds: Vec2,
    pub phase: GamePhase,
    pub player: Player,
    /// Live bullets in creation order
    pub bullets: Vec<Bullet>,
    /// Live zombies in creation order
    pub zombies: Vec<Zombie>,
    pub score: u64,
    pub difficulty: DifficultyState,
    pub shooter: ShooterState,
    /// Pending between-tick callbacks
    pub timers: Timers,
    /// Sim clock (ms since the run started)
    pub now_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Create a new run on the default canvas
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_bounds(seed, tuning, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT))
    }

    /// Create a new run on a canvas of the given size
    pub fn with_bounds(seed: u64, tuning: Tuning, bounds: Vec2) -> Self {
        let mut timers = Timers::new();
        timers.schedule(tuning.ramp_period_ms, TimerEvent::DifficultyRamp);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(bounds, &tuning),
            difficulty: DifficultyState::new(&tuning),
            tuning,
            bounds,
            phase: GamePhase::Running,
            bullets: Vec::new(),
            zombies: Vec::new(),
            score: 0,
            shooter: ShooterState::default(),
            timers,
            now_ms: 0.0,
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whether the simulation steps run this tick
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
