//! Zombie Dash - a side-scrolling canvas shooter
//!
//! Core modules:
//! - `sim`: Frame-update core (physics, spawning, shooting, collisions, game state)
//! - `driver`: Frame driver that runs one tick per display refresh
//! - `render`: Scene drawing onto an opaque render surface
//! - `platform`: Input, render surface and name prompt collaborators
//! - `persistence`: Key-value storage seam
//! - `highscores`: Top-10 leaderboard
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod sim;
pub mod tuning;

pub use driver::{FrameDriver, FrameStatus};
pub use highscores::{Leaderboard, LeaderboardEntry};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Zombie box
    pub const ZOMBIE_WIDTH: f32 = 50.0;
    pub const ZOMBIE_HEIGHT: f32 = 50.0;

    /// Bullet box
    pub const BULLET_SIZE: f32 = 10.0;

    /// Health bar geometry (pixels per health point is 1)
    pub const HEALTH_BAR_X: f32 = 10.0;
    pub const HEALTH_BAR_Y: f32 = 10.0;
    pub const HEALTH_BAR_HEIGHT: f32 = 20.0;

    /// Storage keys
    pub const LEADERBOARD_KEY: &str = "leaderboard";
    pub const TUNING_KEY: &str = "zombie_dash_tuning";
}

/// Axis-aligned overlap test with half-open intervals.
///
/// Boxes that only touch along an edge do not overlap.
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// Velocity for a launch at `angle` radians (screen space, negative is up)
#[inline]
pub fn launch_velocity(speed: f32, angle: f32) -> Vec2 {
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_touching_edges_is_not_overlap() {
        let size = Vec2::new(10.0, 10.0);
        assert!(!aabb_overlap(Vec2::ZERO, size, Vec2::new(10.0, 0.0), size));
        assert!(!aabb_overlap(Vec2::ZERO, size, Vec2::new(0.0, 10.0), size));
        assert!(aabb_overlap(Vec2::ZERO, size, Vec2::new(9.9, 9.9), size));
    }

    #[test]
    fn test_launch_velocity_up_right() {
        let v = launch_velocity(5.0, -std::f32::consts::FRAC_PI_4);
        assert!(v.x > 0.0);
        assert!(v.y < 0.0);
        assert!((v.length() - 5.0).abs() < 1e-4);
    }
}
