//! Fire-button rate limiting and bullet creation
//!
//! Two gates guard firing: the elapsed time since the last trigger pull and
//! the `can_shoot` flag that the cooldown timer re-arms. The burst counter is
//! reset after every shot, so it never blocks on its own.

use glam::Vec2;

use super::state::{Bullet, GameState};
use super::timers::TimerEvent;
use crate::consts::BULLET_SIZE;
use crate::launch_velocity;

/// Handle the fire input for this tick. Returns the id of a fired bullet.
pub fn handle_shooting(state: &mut GameState, fire_held: bool) -> Option<u32> {
    if !fire_held || !cooldown_elapsed(state) {
        return None;
    }

    let now = state.now_ms;
    state.shooter.last_shot_ms = Some(now);
    let fired = shoot_bullet(state);

    state.shooter.burst_count = 0;
    state.shooter.can_shoot = false;
    state
        .timers
        .schedule(now + state.tuning.shoot_cooldown_ms, TimerEvent::CooldownRelease);

    fired
}

/// Cooldown timer callback
pub fn release_cooldown(state: &mut GameState) {
    state.shooter.can_shoot = true;
}

fn cooldown_elapsed(state: &GameState) -> bool {
    match state.shooter.last_shot_ms {
        Some(last) => state.now_ms - last > state.tuning.shoot_cooldown_ms,
        None => true,
    }
}

/// Emit one bullet from the top-center of the player if the burst allows it
fn shoot_bullet(state: &mut GameState) -> Option<u32> {
    if state.shooter.burst_count >= state.tuning.burst_limit || !state.shooter.can_shoot {
        return None;
    }

    let id = state.next_entity_id();
    let player = &state.player;
    state.bullets.push(Bullet {
        id,
        pos: Vec2::new(
            player.pos.x + player.size.x / 2.0 - BULLET_SIZE / 2.0,
            player.pos.y,
        ),
        size: Vec2::splat(BULLET_SIZE),
        vel: launch_velocity(state.tuning.bullet_speed, state.tuning.bullet_angle),
        gravity: state.tuning.bullet_gravity,
    });
    state.shooter.burst_count += 1;

    log::debug!("Bullet {} fired", id);
    Some(id)
}
