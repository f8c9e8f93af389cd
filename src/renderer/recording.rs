//! Headless renderer that records draw calls
//!
//! Used by the native demo binary and by scene tests to check what a frame
//! would have shown.

use glam::Vec2;

use super::{Anchor, Color, Renderer, Sprite};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        sprite: Sprite,
        pos: Vec2,
    },
    Text {
        text: String,
        pos: Vec2,
        anchor: Anchor,
        size: f32,
        color: Color,
    },
}

/// Keeps the draw list of the frame being built and of the last presented frame
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pending: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames_presented: u64,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw list of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// How many times `sprite` appeared in the last frame
    pub fn sprite_count(&self, sprite: Sprite) -> usize {
        self.last_frame
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { sprite: s, .. } if *s == sprite))
            .count()
    }

    /// Whether any text in the last frame equals `text`
    pub fn has_text(&self, text: &str) -> bool {
        self.last_frame
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { text: t, .. } if t == text))
    }
}

impl Renderer for RecordingRenderer {
    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2) {
        self.pending.push(DrawCommand::Sprite { sprite, pos });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, anchor: Anchor, size: f32, color: Color) {
        self.pending.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            anchor,
            size,
            color,
        });
    }

    fn present_frame(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
        log::trace!(
            "frame {} presented with {} draws",
            self.frames_presented,
            self.last_frame.len()
        );
    }
}
