//! Frame-update simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One tick per frame, fixed per-tick units
//! - Seeded RNG only
//! - Stable iteration order (creation order)
//! - Timers fire between ticks, never inside one

pub mod collision;
pub mod physics;
pub mod shooting;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::resolve_collisions;
pub use state::{
    Bullet, DifficultyState, GameEvent, GamePhase, GameState, Player, ShooterState, Zombie,
};
pub use tick::{TickInput, fire_timers, pause, tick, toggle_pause};
pub use timers::{TimerEvent, Timers};
