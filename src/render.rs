//! Scene drawing
//!
//! Pure translation of game state into draw calls; no state is mutated here.

use crate::consts::{HEALTH_BAR_HEIGHT, HEALTH_BAR_X, HEALTH_BAR_Y};
use crate::highscores::Leaderboard;
use crate::platform::{Color, Font, RenderSurface};
use crate::sim::GameState;

/// Draw one active frame: clear, entities, HUD
pub fn draw_scene(surface: &mut impl RenderSurface, state: &GameState) {
    surface.clear(state.bounds.x, state.bounds.y);

    let player = &state.player;
    surface.fill_rect(player.pos.x, player.pos.y, player.size.x, player.size.y, Color::Blue);
    draw_health_bar(surface, state);

    for bullet in &state.bullets {
        surface.fill_rect(bullet.pos.x, bullet.pos.y, bullet.size.x, bullet.size.y, Color::Red);
    }
    for zombie in &state.zombies {
        surface.fill_rect(zombie.pos.x, zombie.pos.y, zombie.size.x, zombie.size.y, Color::Green);
    }

    surface.fill_text(
        &format!("Score: {}", state.score),
        10.0,
        50.0,
        Font::HUD,
        Color::White,
    );
}

fn draw_health_bar(surface: &mut impl RenderSurface, state: &GameState) {
    let max = state.tuning.max_health as f32;
    surface.fill_rect(HEALTH_BAR_X, HEALTH_BAR_Y, max, HEALTH_BAR_HEIGHT, Color::Red);
    surface.fill_rect(
        HEALTH_BAR_X,
        HEALTH_BAR_Y,
        state.player.health as f32,
        HEALTH_BAR_HEIGHT,
        Color::Green,
    );
}

/// Draw the frozen scene under a shaded "Paused" banner
pub fn draw_paused(surface: &mut impl RenderSurface, state: &GameState) {
    draw_scene(surface, state);
    surface.fill_rect(0.0, 0.0, state.bounds.x, state.bounds.y, Color::Shade);
    surface.fill_text(
        "Paused",
        state.bounds.x / 2.0 - 70.0,
        state.bounds.y / 2.0,
        Font::BANNER,
        Color::White,
    );
}

/// Draw the game-over banner and leaderboard over the last frame
pub fn draw_game_over(surface: &mut impl RenderSurface, state: &GameState, board: &Leaderboard) {
    surface.fill_text(
        "Game Over",
        state.bounds.x / 2.0 - 120.0,
        state.bounds.y / 2.0,
        Font::BANNER,
        Color::Red,
    );

    surface.fill_text("Leaderboard:", 10.0, 80.0, Font::HUD, Color::White);
    for (i, entry) in board.entries.iter().enumerate() {
        surface.fill_text(
            &format!("{}. {} - {}", i + 1, entry.name, entry.score),
            10.0,
            110.0 + i as f32 * 30.0,
            Font::HUD,
            Color::White,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{DrawCommand, RecordingSurface};
    use crate::sim::spawner::spawn_zombie;
    use crate::tuning::Tuning;

    #[test]
    fn test_scene_draws_entities_and_hud() {
        let mut state = GameState::new(1, Tuning::default());
        spawn_zombie(&mut state, 3.0);
        state.player.health = 40;
        state.score = 30;

        let mut surface = RecordingSurface::new();
        draw_scene(&mut surface, &state);

        assert_eq!(surface.commands[0], DrawCommand::Clear);
        assert!(surface.commands.contains(&DrawCommand::Rect {
            x: 10.0,
            y: 10.0,
            width: 40.0,
            height: 20.0,
            color: Color::Green,
        }));
        assert!(surface.commands.contains(&DrawCommand::Rect {
            x: 800.0,
            y: 550.0,
            width: 50.0,
            height: 50.0,
            color: Color::Green,
        }));
        assert_eq!(surface.texts(), vec!["Score: 30"]);
    }

    #[test]
    fn test_paused_banner() {
        let state = GameState::new(1, Tuning::default());
        let mut surface = RecordingSurface::new();
        draw_paused(&mut surface, &state);
        assert!(surface.texts().contains(&"Paused"));
    }

    #[test]
    fn test_game_over_lists_leaderboard() {
        let state = GameState::new(1, Tuning::default());
        let mut board = Leaderboard::new();
        board.add_score("A", 50);
        board.add_score("B", 100);

        let mut surface = RecordingSurface::new();
        draw_game_over(&mut surface, &state, &board);

        assert_eq!(
            surface.texts(),
            vec!["Game Over", "Leaderboard:", "1. B - 100", "2. A - 50"]
        );
        // No clear: the banner sits on top of the last frame
        assert!(!surface.commands.contains(&DrawCommand::Clear));
    }
}
