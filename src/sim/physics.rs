//! Per-tick motion: velocity, gravity and boundary clamping
//!
//! Units are pixels and ticks. Screen space: +x right, +y down, floor at
//! `bounds.y`.

use glam::Vec2;

use super::state::{Bullet, Player, Zombie};

/// Held movement keys for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Steering {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Turn held keys into player velocity (right wins over left)
pub fn steer_player(player: &mut Player, steering: Steering) {
    player.vel.x = if steering.right {
        player.speed
    } else if steering.left {
        -player.speed
    } else {
        0.0
    };

    if steering.jump && player.on_ground {
        player.vel.y = player.jump_strength;
        player.on_ground = false;
    }
}

/// Move the player, apply gravity and clamp to the canvas
pub fn step_player(player: &mut Player, bounds: Vec2) {
    player.pos += player.vel;

    if !player.on_ground {
        player.vel.y += player.gravity;
    }

    if player.pos.x < 0.0 {
        player.pos.x = 0.0;
    }
    if player.pos.x + player.size.x > bounds.x {
        player.pos.x = bounds.x - player.size.x;
    }
    if player.pos.y + player.size.y > bounds.y {
        player.pos.y = bounds.y - player.size.y;
        player.on_ground = true;
        player.vel.y = 0.0;
    }
}

/// Advance a bullet along its ballistic arc
pub fn step_bullet(bullet: &mut Bullet) {
    bullet.pos += bullet.vel;
    bullet.vel.y += bullet.gravity;
}

/// Bullet has left the canvas (below the floor, left or right edge)
pub fn bullet_out_of_bounds(bullet: &Bullet, bounds: Vec2) -> bool {
    bullet.pos.y > bounds.y || bullet.pos.x < 0.0 || bullet.pos.x > bounds.x
}

/// Walk a zombie toward the left edge
pub fn step_zombie(zombie: &mut Zombie) {
    zombie.pos.x -= zombie.speed;
}

/// Zombie is fully past the left edge
pub fn zombie_off_screen(zombie: &Zombie) -> bool {
    zombie.pos.x + zombie.size.x < 0.0
}
