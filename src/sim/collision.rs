//! Collision resolution
//!
//! One pass per tick: retire entities that left the canvas, match bullets to
//! zombies, then let surviving zombies strike the player. Removals are
//! recorded in flag vectors and applied by rebuilding each collection, so
//! nothing is skipped or removed twice while iterating.

use super::physics::{bullet_out_of_bounds, zombie_off_screen};
use super::state::{GameEvent, GamePhase, GameState};
use crate::aabb_overlap;

/// Run the full collision pass, returning what happened
pub fn resolve_collisions(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    retire_off_screen(state);
    resolve_bullet_hits(state, &mut events);
    resolve_player_hits(state, &mut events);
    events
}

/// Drop bullets outside the canvas and zombies past the left edge
pub fn retire_off_screen(state: &mut GameState) {
    let bounds = state.bounds;
    state.bullets.retain(|b| !bullet_out_of_bounds(b, bounds));
    state.zombies.retain(|z| !zombie_off_screen(z));
}

/// Match each bullet to the first live zombie it overlaps.
///
/// A bullet scores at most once and a zombie dies at most once per tick.
pub fn resolve_bullet_hits(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut bullet_hit = vec![false; state.bullets.len()];
    let mut zombie_hit = vec![false; state.zombies.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let target = state.zombies.iter().enumerate().position(|(zi, zombie)| {
            !zombie_hit[zi] && aabb_overlap(bullet.pos, bullet.size, zombie.pos, zombie.size)
        });

        if let Some(zi) = target {
            bullet_hit[bi] = true;
            zombie_hit[zi] = true;
            state.score += state.tuning.kill_score;

            let zombie_id = state.zombies[zi].id;
            log::debug!("Bullet {} killed zombie {}", bullet.id, zombie_id);
            events.push(GameEvent::ZombieKilled {
                bullet_id: bullet.id,
                zombie_id,
            });
        }
    }

    state.bullets = compact(std::mem::take(&mut state.bullets), &bullet_hit);
    state.zombies = compact(std::mem::take(&mut state.zombies), &zombie_hit);
}

/// Zombies touching the player deal damage and are consumed.
///
/// Stops at the hit that empties the player's health, so game over fires once.
pub fn resolve_player_hits(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut zombie_hit = vec![false; state.zombies.len()];

    for (zi, zombie) in state.zombies.iter().enumerate() {
        if state.phase == GamePhase::GameOver {
            break;
        }

        let player = &mut state.player;
        if !aabb_overlap(zombie.pos, zombie.size, player.pos, player.size) {
            continue;
        }

        zombie_hit[zi] = true;
        player.health = player.health.saturating_sub(state.tuning.zombie_damage);
        log::debug!("Zombie {} hit player, health {}", zombie.id, player.health);
        events.push(GameEvent::PlayerHit {
            zombie_id: zombie.id,
            health: player.health,
        });

        if player.health == 0 {
            state.phase = GamePhase::GameOver;
            log::debug!("Player health depleted by zombie {}", zombie.id);
            events.push(GameEvent::GameOver { score: state.score });
        }
    }

    state.zombies = compact(std::mem::take(&mut state.zombies), &zombie_hit);
}

/// Keep the items whose flag is unset, preserving order
fn compact<T>(items: Vec<T>, removed: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(removed)
        .filter_map(|(item, &gone)| (!gone).then_some(item))
        .collect()
}
