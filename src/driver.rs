//! Frame driver
//!
//! One call to [`FrameDriver::frame`] per display refresh. The platform loop
//! keeps rescheduling while the driver reports [`FrameStatus::Continue`];
//! pausing only flips the phase, it never starts a second loop.

use crate::highscores::Leaderboard;
use crate::persistence::KeyValueStore;
use crate::platform::{KeyState, NamePrompt, RenderSurface};
use crate::render;
use crate::sim::{GameEvent, GamePhase, GameState, fire_timers, pause, tick, toggle_pause};
use crate::tuning::Tuning;

/// Message shown by the end-of-game prompt
pub const NAME_PROMPT: &str = "Game Over! Enter your name for the leaderboard:";

/// Whether the platform loop should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Finished,
}

/// Owns the run and its collaborators
pub struct FrameDriver<S: KeyValueStore, P: NamePrompt> {
    state: GameState,
    store: S,
    prompt: P,
    /// Snapshot taken once at game over
    leaderboard: Option<Leaderboard>,
    /// Platform timestamp of the first frame
    clock_origin: Option<f64>,
    game_over_drawn: bool,
    kills: u32,
}

impl<S: KeyValueStore, P: NamePrompt> FrameDriver<S, P> {
    /// Start a run with tuning loaded from `store`
    pub fn new(seed: u64, store: S, prompt: P) -> Self {
        let tuning = Tuning::load(&store);
        Self::with_state(GameState::new(seed, tuning), store, prompt)
    }

    /// Drive an existing state
    pub fn with_state(state: GameState, store: S, prompt: P) -> Self {
        Self {
            state,
            store,
            prompt,
            leaderboard: None,
            clock_origin: None,
            game_over_drawn: false,
            kills: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Zombies shot this run
    pub fn kills(&self) -> u32 {
        self.kills
    }

    /// Leaderboard snapshot (set once the run has ended)
    pub fn leaderboard(&self) -> Option<&Leaderboard> {
        self.leaderboard.as_ref()
    }

    /// Pause key handler
    pub fn toggle_pause(&mut self) -> GamePhase {
        let phase = toggle_pause(&mut self.state);
        match phase {
            GamePhase::Paused => log::info!("Paused"),
            GamePhase::Running => log::info!("Resumed"),
            GamePhase::GameOver => {}
        }
        phase
    }

    /// Pause on focus loss; never resumes
    pub fn auto_pause(&mut self, reason: &str) {
        if pause(&mut self.state) {
            log::info!("Auto-paused ({})", reason);
        }
    }

    /// Run one frame at platform time `time_ms`
    pub fn frame(
        &mut self,
        time_ms: f64,
        keys: &KeyState,
        surface: &mut impl RenderSurface,
    ) -> FrameStatus {
        if self.state.phase == GamePhase::GameOver {
            return self.finish(surface);
        }

        let origin = *self.clock_origin.get_or_insert(time_ms);
        // Sim clock never runs backwards
        let now = (time_ms - origin).max(self.state.now_ms);

        fire_timers(&mut self.state, now);

        match self.state.phase {
            GamePhase::Running => {
                let events = tick(&mut self.state, &keys.tick_input(), now);
                self.tally(&events);
                render::draw_scene(surface, &self.state);
            }
            GamePhase::Paused => render::draw_paused(surface, &self.state),
            GamePhase::GameOver => {}
        }

        if self.state.phase == GamePhase::GameOver {
            self.record_score();
            return self.finish(surface);
        }
        FrameStatus::Continue
    }

    fn tally(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::ZombieKilled { .. } => self.kills += 1,
                GameEvent::GameOver { score } => log::info!(
                    "Game over after {} ticks: score {}, {} zombies shot",
                    self.state.time_ticks,
                    score,
                    self.kills
                ),
                _ => {}
            }
        }
    }

    /// Prompt for a name and save the score, once per run
    fn record_score(&mut self) {
        if self.leaderboard.is_some() {
            return;
        }

        let score = self.state.score;
        let answer = self.prompt.ask(NAME_PROMPT);
        let name = answer.as_deref().map(str::trim).unwrap_or_default();

        let board = if name.is_empty() {
            log::info!("No name entered, score {} not saved", score);
            Leaderboard::load(&self.store)
        } else {
            match Leaderboard::save(&mut self.store, name, score) {
                Ok(board) => board,
                Err(e) => {
                    log::warn!("Failed to save high score: {}", e);
                    Leaderboard::load(&self.store)
                }
            }
        };
        self.leaderboard = Some(board);
    }

    /// Draw the game-over screen once
    fn finish(&mut self, surface: &mut impl RenderSurface) -> FrameStatus {
        if !self.game_over_drawn {
            let board = match &self.leaderboard {
                Some(board) => board.clone(),
                None => Leaderboard::load(&self.store),
            };
            render::draw_game_over(surface, &self.state, &board);
            self.game_over_drawn = true;
        }
        FrameStatus::Finished
    }
}
