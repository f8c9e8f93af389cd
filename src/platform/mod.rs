//! Platform abstraction layer
//!
//! Narrow input interface the scenes consume:
//! - Discrete events (quit, key presses, mouse clicks) for transitions and shooting
//! - Continuous key state for movement

pub mod headless;

pub use headless::ScriptedInput;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Escape,
    I,
    Q,
}

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Window close request
    Quit,
    KeyDown(Key),
    /// Mouse button press at a screen position
    MouseClick(Vec2),
}

/// Input adapter
pub trait InputSource {
    /// Events since the last poll; called once per frame
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Whether `key` is currently held down
    fn is_key_held(&self, key: Key) -> bool;
}
