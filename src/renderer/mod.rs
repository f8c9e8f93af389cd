//! Rendering adapter
//!
//! The game never touches pixels itself. Scenes describe each frame as
//! sprite and text draws against a `Renderer`; the platform layer decides
//! how those reach the screen.

pub mod recording;

pub use recording::{DrawCommand, RecordingRenderer};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    // Playing
    Background,
    Playground,
    Borders,
    Player,
    EnemyBasic,
    EnemyAdvanced,
    Bullet,
    Coin,
    // Menus
    MenuBackground,
    PlayButton,
    QuitButton,
    DocumentIcon,
    InstructionBackground,
    GameOverBackground,
}

/// RGB text color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);
    pub const SILVER: Color = Color(192, 192, 192);
}

/// Text alignment anchor for `draw_text`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    /// `pos` is the center of the text
    Center,
    /// `pos` is the top-right corner of the text
    TopRight,
}

/// Render adapter consumed by scenes
pub trait Renderer {
    /// Draw a sprite with its top-left corner at `pos`
    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2);

    /// Draw a line of text
    fn draw_text(&mut self, text: &str, pos: Vec2, anchor: Anchor, size: f32, color: Color);

    /// Show everything drawn since the last present
    fn present_frame(&mut self);
}
