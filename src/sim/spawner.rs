//! Zombie spawning and the difficulty ramp

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Zombie};
use crate::consts::{ZOMBIE_HEIGHT, ZOMBIE_WIDTH};

/// Per-tick spawn chance for the current spawn interval.
///
/// The base chance applies at the initial interval and scales inversely with
/// the interval, so a halved interval doubles the spawn rate.
pub fn spawn_chance(state: &GameState) -> f64 {
    let tuning = &state.tuning;
    let interval = state.difficulty.spawn_interval_ms.max(1.0);
    (tuning.spawn_chance * tuning.initial_spawn_interval_ms / interval).clamp(0.0, 1.0)
}

/// Roll for a spawn this tick. Returns the new zombie's id and speed.
pub fn maybe_spawn(state: &mut GameState) -> Option<(u32, f32)> {
    let chance = spawn_chance(state);
    if !state.rng.random_bool(chance) {
        return None;
    }

    let (min, max) = (state.tuning.zombie_min_speed, state.tuning.zombie_max_speed);
    let base = if max > min {
        state.rng.random_range(min..max)
    } else {
        min
    };
    let speed = base + state.difficulty.speed_bonus;
    Some((spawn_zombie(state, speed), speed))
}

/// Place a zombie at the right edge, standing on the floor
pub fn spawn_zombie(state: &mut GameState, speed: f32) -> u32 {
    let id = state.next_entity_id();
    state.zombies.push(Zombie {
        id,
        pos: Vec2::new(state.bounds.x, state.bounds.y - ZOMBIE_HEIGHT),
        size: Vec2::new(ZOMBIE_WIDTH, ZOMBIE_HEIGHT),
        speed,
    });
    log::debug!("Zombie {} spawned (speed {:.2})", id, speed);
    id
}

/// Tighten the spawn interval (floored) and raise later zombies' speed
pub fn ramp_difficulty(state: &mut GameState) {
    let tuning = &state.tuning;
    let difficulty = &mut state.difficulty;

    difficulty.spawn_interval_ms = (difficulty.spawn_interval_ms - tuning.spawn_interval_step_ms)
        .max(tuning.min_spawn_interval_ms);
    difficulty.speed_bonus += difficulty.speed_increase;
    difficulty.ramps += 1;

    log::info!(
        "Difficulty ramp {}: spawn interval {}ms, speed bonus {:.1}",
        difficulty.ramps,
        difficulty.spawn_interval_ms,
        difficulty.speed_bonus
    );
}
