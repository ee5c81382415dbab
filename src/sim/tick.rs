//! Per-tick simulation
//!
//! Order within a tick: input, shooting, physics, spawning, collisions.
//! Timers fire before the tick via [`fire_timers`]; pause is toggled outside
//! the tick via [`toggle_pause`].

use super::physics::{Steering, step_bullet, step_player, step_zombie, steer_player};
use super::shooting::{handle_shooting, release_cooldown};
use super::spawner::{maybe_spawn, ramp_difficulty};
use super::state::{GameEvent, GamePhase, GameState};
use super::timers::TimerEvent;

/// Held inputs for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub fire: bool,
}

impl TickInput {
    fn steering(&self) -> Steering {
        Steering {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}

/// Advance the simulation by one tick at sim time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> Vec<GameEvent> {
    // Don't tick if paused or game over
    if !state.is_running() {
        return Vec::new();
    }

    state.now_ms = now_ms;
    state.time_ticks += 1;
    let mut events = Vec::new();

    if let Some(bullet_id) = handle_shooting(state, input.fire) {
        events.push(GameEvent::BulletFired { bullet_id });
    }

    steer_player(&mut state.player, input.steering());
    step_player(&mut state.player, state.bounds);
    for bullet in &mut state.bullets {
        step_bullet(bullet);
    }
    for zombie in &mut state.zombies {
        step_zombie(zombie);
    }

    if let Some((zombie_id, speed)) = maybe_spawn(state) {
        events.push(GameEvent::ZombieSpawned { zombie_id, speed });
    }

    events.extend(super::collision::resolve_collisions(state));
    events
}

/// Fire every timer due at `now_ms`. Runs between ticks, never during one.
pub fn fire_timers(state: &mut GameState, now_ms: f64) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    while let Some((due, event)) = state.timers.pop_due(now_ms) {
        match event {
            TimerEvent::CooldownRelease => release_cooldown(state),
            TimerEvent::DifficultyRamp => {
                ramp_difficulty(state);
                let period = state.difficulty.ramp_period_ms;
                // A non-positive period would be due again immediately
                if period > 0.0 {
                    state.timers.schedule(due + period, TimerEvent::DifficultyRamp);
                } else {
                    log::warn!("Ramp period {}ms, difficulty ramp stopped", period);
                }
            }
        }
    }
}

/// Flip between Running and Paused. Game over is terminal.
pub fn toggle_pause(state: &mut GameState) -> GamePhase {
    state.phase = match state.phase {
        GamePhase::Running => GamePhase::Paused,
        GamePhase::Paused => GamePhase::Running,
        GamePhase::GameOver => GamePhase::GameOver,
    };
    state.phase
}

/// Pause if running (focus loss); never resumes
pub fn pause(state: &mut GameState) -> bool {
    if state.phase == GamePhase::Running {
        state.phase = GamePhase::Paused;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawner::spawn_zombie;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    /// No random spawns, so scenarios are fully scripted
    fn quiet_state() -> GameState {
        let tuning = Tuning {
            spawn_chance: 0.0,
            ..Default::default()
        };
        GameState::new(12345, tuning)
    }

    fn run(state: &mut GameState, input: &TickInput, ticks: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            let now = state.now_ms + 1000.0 / 60.0;
            fire_timers(state, now);
            events.extend(tick(state, input, now));
        }
        events
    }

    #[test]
    fn test_zombie_walks_then_retires() {
        let mut state = quiet_state();
        // Keep the player out of the zombie's path
        state.player.pos.y = 0.0;
        state.player.on_ground = true;
        spawn_zombie(&mut state, 3.0);

        run(&mut state, &TickInput::default(), 10);
        assert_eq!(state.zombies[0].pos.x, 800.0 - 30.0);

        // 850px to cover before x + width < 0 → tick 284 (852px)
        run(&mut state, &TickInput::default(), 273);
        assert_eq!(state.zombies.len(), 1);
        run(&mut state, &TickInput::default(), 1);
        assert!(state.zombies.is_empty());
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = quiet_state();
        let input = TickInput {
            right: true,
            fire: true,
            ..Default::default()
        };
        run(&mut state, &input, 5);
        spawn_zombie(&mut state, 4.0);

        assert_eq!(toggle_pause(&mut state), GamePhase::Paused);
        let player = state.player.clone();
        let bullets = state.bullets.clone();
        let zombies = state.zombies.clone();
        let score = state.score;

        let events = run(&mut state, &input, 30);
        assert!(events.is_empty());
        assert_eq!(state.player, player);
        assert_eq!(state.bullets, bullets);
        assert_eq!(state.zombies, zombies);
        assert_eq!(state.score, score);

        assert_eq!(toggle_pause(&mut state), GamePhase::Running);
        run(&mut state, &TickInput::default(), 1);
        assert_eq!(state.zombies[0].pos.x, zombies[0].pos.x - 4.0);
        assert_eq!(state.player.health, player.health);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut state = quiet_state();
        state.player.health = 10;
        // Zombie one step from the player's right edge
        spawn_zombie(&mut state, 3.0);
        state.zombies[0].pos.x = 452.0;

        let events = run(&mut state, &TickInput::default(), 1);
        assert!(events.contains(&GameEvent::GameOver { score: 0 }));
        assert_eq!(state.phase, GamePhase::GameOver);

        assert_eq!(toggle_pause(&mut state), GamePhase::GameOver);
        assert!(!pause(&mut state));
        let ticks = state.time_ticks;
        assert!(run(&mut state, &TickInput { fire: true, ..Default::default() }, 10).is_empty());
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_health_drops_by_ten_per_hit() {
        let mut state = quiet_state();
        let mut seen = Vec::new();
        while state.phase == GamePhase::Running {
            spawn_zombie(&mut state, 3.0);
            let last = state.zombies.len() - 1;
            state.zombies[last].pos.x = 445.0;
            for event in run(&mut state, &TickInput::default(), 1) {
                if let GameEvent::PlayerHit { health, .. } = event {
                    seen.push(health);
                }
            }
        }
        assert_eq!(seen, vec![90, 80, 70, 60, 50, 40, 30, 20, 10, 0]);
    }

    #[test]
    fn test_ramp_timer_fires_each_period() {
        let mut state = quiet_state();
        fire_timers(&mut state, 59_999.0);
        assert_eq!(state.difficulty.ramps, 0);

        fire_timers(&mut state, 60_000.0);
        assert_eq!(state.difficulty.ramps, 1);
        assert_eq!(state.difficulty.spawn_interval_ms, 1950.0);

        // A long stall catches up on every missed period
        fire_timers(&mut state, 240_000.0);
        assert_eq!(state.difficulty.ramps, 4);
        assert_eq!(state.timers.len(), 1);
    }

    #[test]
    fn test_zero_ramp_period_ramps_once_and_stops() {
        let tuning = Tuning {
            spawn_chance: 0.0,
            ramp_period_ms: 0.0,
            ..Default::default()
        };
        let mut state = GameState::new(1, tuning);

        fire_timers(&mut state, 16.0);
        assert_eq!(state.difficulty.ramps, 1);
        assert!(state.timers.is_empty());

        fire_timers(&mut state, 1_000.0);
        assert_eq!(state.difficulty.ramps, 1);
    }

    #[test]
    fn test_no_timers_after_game_over() {
        let mut state = quiet_state();
        state.phase = GamePhase::GameOver;
        fire_timers(&mut state, 1_000_000.0);
        assert_eq!(state.difficulty.ramps, 0);
    }

    #[test]
    fn test_bullet_kills_approaching_zombie() {
        let mut state = quiet_state();
        // Lands in the bullet's drop zone about 69 ticks after the first shot
        spawn_zombie(&mut state, 2.0);

        let mut killed = false;
        for _ in 0..120 {
            let events = run(&mut state, &TickInput { fire: true, ..Default::default() }, 1);
            if events.iter().any(|e| matches!(e, GameEvent::ZombieKilled { .. })) {
                killed = true;
                break;
            }
        }
        assert!(killed);
        assert_eq!(state.score, 10);
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999, Tuning::default());
        let mut b = GameState::new(99999, Tuning::default());
        let input = TickInput {
            fire: true,
            right: true,
            ..Default::default()
        };
        run(&mut a, &input, 600);
        run(&mut b, &input, 600);

        assert_eq!(a.zombies, b.zombies);
        assert_eq!(a.bullets, b.bullets);
        assert_eq!(a.score, b.score);
    }

    proptest! {
        #[test]
        fn prop_removed_bullets_left_or_scored(seed in any::<u64>(), ticks in 1u32..600) {
            use crate::sim::physics::{bullet_out_of_bounds, step_bullet};

            let tuning = Tuning {
                spawn_chance: 0.1,
                ..Default::default()
            };
            let mut state = GameState::new(seed, tuning);
            let input = TickInput { fire: true, ..Default::default() };
            for _ in 0..ticks {
                let before = state.bullets.clone();
                let now = state.now_ms + 1000.0 / 60.0;
                fire_timers(&mut state, now);
                let events = tick(&mut state, &input, now);

                for bullet in before {
                    if state.bullets.iter().any(|b| b.id == bullet.id) {
                        continue;
                    }
                    let mut moved = bullet.clone();
                    step_bullet(&mut moved);
                    let scored = events.iter().any(|e| matches!(
                        e,
                        GameEvent::ZombieKilled { bullet_id, .. } if *bullet_id == bullet.id
                    ));
                    prop_assert!(scored || bullet_out_of_bounds(&moved, state.bounds));
                }
            }
        }

        #[test]
        fn prop_score_only_grows_by_kills(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(
                (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 1..400),
        ) {
            let mut state = GameState::new(seed, Tuning::default());
            for (left, right, jump, fire) in inputs {
                let before = state.score;
                let now = state.now_ms + 1000.0 / 60.0;
                fire_timers(&mut state, now);
                let events = tick(&mut state, &TickInput { left, right, jump, fire }, now);
                let kills = events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::ZombieKilled { .. }))
                    .count() as u64;
                prop_assert_eq!(state.score, before + 10 * kills);
                prop_assert!(state.player.health <= 100);
            }
        }
    }
}
