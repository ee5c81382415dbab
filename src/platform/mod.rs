//! Platform abstraction layer
//!
//! The simulation talks to the outside world through three collaborators:
//! - a live key-state map
//! - a render surface that fills rectangles and draws text
//! - a blocking name prompt shown once at game over
//!
//! Browser implementations live in `web`; the in-memory ones here back the
//! native build and the tests.

use std::collections::HashSet;

use crate::sim::TickInput;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Fire,
    Pause,
}

impl Key {
    /// DOM `KeyboardEvent.key` values bound to this key
    pub fn dom_keys(self) -> &'static [&'static str] {
        match self {
            Key::Left => &["ArrowLeft", "a"],
            Key::Right => &["ArrowRight", "d"],
            Key::Up => &["ArrowUp", "w"],
            Key::Fire => &[" "],
            Key::Pause => &["p", "P"],
        }
    }

    /// Whether a DOM key value is bound to this key
    pub fn matches(self, dom_key: &str) -> bool {
        self.dom_keys().contains(&dom_key)
    }
}

/// Live pressed-state of raw keys, updated by input events between frames
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    down: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, dom_key: &str) {
        self.down.insert(dom_key.to_string());
    }

    pub fn release(&mut self, dom_key: &str) {
        self.down.remove(dom_key);
    }

    /// Forget everything (focus loss swallows keyup events)
    pub fn clear(&mut self) {
        self.down.clear();
    }

    /// Any raw key bound to `key` is held
    pub fn is_down(&self, key: Key) -> bool {
        key.dom_keys().iter().any(|k| self.down.contains(*k))
    }

    /// Snapshot the held keys for one tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.is_down(Key::Left),
            right: self.is_down(Key::Right),
            jump: self.is_down(Key::Up),
            fire: self.is_down(Key::Fire),
        }
    }
}

/// Fill colors used by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Blue,
    Red,
    Green,
    White,
    /// Half-transparent black
    Shade,
}

impl Color {
    pub fn as_css(&self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Red => "red",
            Color::Green => "green",
            Color::White => "white",
            Color::Shade => "rgba(0, 0, 0, 0.5)",
        }
    }
}

/// Text font (size in pixels, sans-serif)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub size_px: u32,
}

impl Font {
    pub const HUD: Font = Font { size_px: 24 };
    pub const BANNER: Font = Font { size_px: 48 };

    pub fn as_css(&self) -> String {
        format!("{}px Arial", self.size_px)
    }
}

/// Opaque 2D drawing surface
pub trait RenderSurface {
    /// Clear the whole frame
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: Font, color: Color);
}

/// Synchronous text prompt shown at game over
pub trait NamePrompt {
    /// Ask the player something. None or empty means cancelled.
    fn ask(&mut self, message: &str) -> Option<String>;
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        font: Font,
        color: Color,
    },
}

/// Surface that records draw calls instead of drawing (headless runs, tests)
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All text drawn so far
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Draw calls since the most recent clear
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| *c == DrawCommand::Clear)
            .unwrap_or(0);
        &self.commands[start..]
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self, _width: f32, _height: f32) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: Font, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font,
            color,
        });
    }
}

/// Prompt that always answers with a preset name
#[derive(Debug, Clone)]
pub struct FixedPrompt {
    pub answer: Option<String>,
    /// Number of times the prompt was shown
    pub asked: u32,
}

impl FixedPrompt {
    pub fn new(answer: Option<&str>) -> Self {
        Self {
            answer: answer.map(str::to_string),
            asked: 0,
        }
    }
}

impl NamePrompt for FixedPrompt {
    fn ask(&mut self, _message: &str) -> Option<String> {
        self.asked += 1;
        self.answer.clone()
    }
}
