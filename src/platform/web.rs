//! Browser collaborators: canvas 2D surface and `window.prompt`

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Color, Font, NamePrompt, RenderSurface};

/// Render surface backed by a canvas 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Grab the 2D context of `canvas`
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }
}

impl RenderSurface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.ctx.set_fill_style_str(color.as_css());
        self.ctx
            .fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: Font, color: Color) {
        self.ctx.set_fill_style_str(color.as_css());
        self.ctx.set_font(&font.as_css());
        if let Err(e) = self.ctx.fill_text(text, x as f64, y as f64) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }
}

/// Name prompt using the blocking `window.prompt` dialog
pub struct WindowPrompt;

impl NamePrompt for WindowPrompt {
    fn ask(&mut self, message: &str) -> Option<String> {
        web_sys::window()?.prompt_with_message(message).ok().flatten()
    }
}
