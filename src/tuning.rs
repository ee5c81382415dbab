//! Data-driven game balance
//!
//! Persisted as JSON next to the leaderboard. Missing fields take their
//! defaults, so older saves keep loading after new knobs are added.

use serde::{Deserialize, Serialize};

use crate::consts::TUNING_KEY;
use crate::persistence::{KeyValueStore, StorageError};

/// Balance knobs for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Horizontal speed while a direction key is held (px/tick)
    pub player_speed: f32,
    /// Vertical acceleration while airborne (px/tick²)
    pub player_gravity: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_strength: f32,
    /// Starting and maximum health
    pub max_health: u32,

    // === Shooting ===
    pub bullet_speed: f32,
    /// Launch angle in radians (negative is up)
    pub bullet_angle: f32,
    pub bullet_gravity: f32,
    /// Minimum time between shots (ms)
    pub shoot_cooldown_ms: f64,
    /// Bullets allowed per press before the burst counter blocks firing
    pub burst_limit: u32,

    // === Zombies ===
    /// Per-tick spawn chance at the initial spawn interval
    pub spawn_chance: f64,
    pub zombie_min_speed: f32,
    pub zombie_max_speed: f32,
    pub zombie_damage: u32,
    pub kill_score: u64,

    // === Difficulty ramp ===
    pub initial_spawn_interval_ms: f64,
    pub min_spawn_interval_ms: f64,
    pub spawn_interval_step_ms: f64,
    pub ramp_period_ms: f64,
    /// Added to every later zombie's speed on each ramp
    pub speed_increase: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 5.0,
            player_gravity: 0.5,
            jump_strength: -10.0,
            max_health: 100,

            bullet_speed: 5.0,
            bullet_angle: -std::f32::consts::FRAC_PI_4,
            bullet_gravity: 0.1,
            shoot_cooldown_ms: 500.0,
            burst_limit: 3,

            spawn_chance: 0.02,
            zombie_min_speed: 2.0,
            zombie_max_speed: 5.0,
            zombie_damage: 10,
            kill_score: 10,

            initial_spawn_interval_ms: 2000.0,
            min_spawn_interval_ms: 500.0,
            spawn_interval_step_ms: 50.0,
            ramp_period_ms: 60_000.0,
            speed_increase: 0.1,
        }
    }
}

impl Tuning {
    /// Load tuning from the store, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(TUNING_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    return Self::sanitized(tuning);
                }
                Err(e) => log::warn!("Ignoring malformed tuning: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Tuning unavailable: {}", e),
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Replace out-of-range knobs with their defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.ramp_period_ms.is_finite() && self.ramp_period_ms > 0.0) {
            log::warn!("Invalid ramp_period_ms {}, using default", self.ramp_period_ms);
            self.ramp_period_ms = defaults.ramp_period_ms;
        }
        if !(self.shoot_cooldown_ms.is_finite() && self.shoot_cooldown_ms >= 0.0) {
            log::warn!("Invalid shoot_cooldown_ms {}, using default", self.shoot_cooldown_ms);
            self.shoot_cooldown_ms = defaults.shoot_cooldown_ms;
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            log::warn!("Invalid spawn_chance {}, using default", self.spawn_chance);
            self.spawn_chance = defaults.spawn_chance;
        }
        let speeds_ok = self.zombie_min_speed.is_finite()
            && self.zombie_max_speed.is_finite()
            && self.zombie_min_speed <= self.zombie_max_speed;
        if !speeds_ok {
            log::warn!(
                "Invalid zombie speed range {}..{}, using default",
                self.zombie_min_speed,
                self.zombie_max_speed
            );
            self.zombie_min_speed = defaults.zombie_min_speed;
            self.zombie_max_speed = defaults.zombie_max_speed;
        }
        let intervals_ok = [
            self.initial_spawn_interval_ms,
            self.min_spawn_interval_ms,
            self.spawn_interval_step_ms,
        ]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0);
        if !intervals_ok {
            log::warn!("Invalid spawn interval settings, using defaults");
            self.initial_spawn_interval_ms = defaults.initial_spawn_interval_ms;
            self.min_spawn_interval_ms = defaults.min_spawn_interval_ms;
            self.spawn_interval_step_ms = defaults.spawn_interval_step_ms;
        }

        self
    }

    /// Save tuning to the store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        store.set(TUNING_KEY, &json)?;
        log::info!("Tuning saved");
        Ok(())
    }
}
