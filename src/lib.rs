//! Battle City - a top-down arena shooter
//!
//! Core modules:
//! - `sim`: Simulation (movement, mask collisions, damage, respawns)
//! - `scene`: Scene state machine (menu, instructions, playing, game over)
//! - `renderer`: Render adapter interface
//! - `platform`: Input adapter interface
//! - `audio`: Audio adapter interface
//! - `assets`: Sprite masks and the obstacle map
//! - `settings`: Runtime configuration

pub mod assets;
pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use game::Game;
pub use settings::Settings;

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Window dimensions
    pub const SCREEN_WIDTH: f32 = 583.0;
    pub const SCREEN_HEIGHT: f32 = 546.0;

    /// Default frame cadence (one simulation tick per frame)
    pub const DEFAULT_FRAME_RATE: u32 = 60;

    /// Sprite sizes (square, pixels)
    pub const PLAYER_SIZE: u32 = 25;
    pub const ENEMY_SIZE: u32 = 25;
    pub const BULLET_SIZE: u32 = 15;
    pub const COIN_SIZE: u32 = 20;

    /// Playfield edges shared by the player and bullet bounds
    pub const FIELD_MIN_X: f32 = 8.0;
    pub const FIELD_MIN_Y: f32 = 60.0;
    pub const FIELD_MAX_X: f32 = 462.8;
    pub const FIELD_MAX_Y: f32 = 485.0;

    /// Enemies have their own, offset movement rectangle
    pub const ENEMY_MIN_X: f32 = 75.0;
    pub const ENEMY_MIN_Y: f32 = 125.0;
    pub const ENEMY_MAX_X: f32 = 583.0 - 25.0;
    pub const ENEMY_MAX_Y: f32 = 546.0 - 25.0;

    /// Player defaults
    pub const PLAYER_START_HEALTH: i32 = 150;
    pub const PLAYER_START_X: f32 = 150.0;
    pub const PLAYER_START_Y: f32 = 450.0;
    /// Pixels per held arrow key per tick
    pub const PLAYER_STEP: f32 = 2.0;

    /// Bullet defaults
    pub const BULLET_DAMAGE: i32 = 10;
    /// Pixels per tick along the facing direction
    pub const BULLET_SPEED: f32 = 8.0;

    /// Enemy defaults
    pub const BASIC_ENEMY_HEALTH: i32 = 50;
    pub const ADVANCED_ENEMY_HEALTH: i32 = 100;
    pub const BASIC_ENEMY_COUNT: usize = 4;
    pub const ADVANCED_ENEMY_COUNT: usize = 4;
    /// Damage dealt to the player per tick of overlap, regardless of kind
    pub const ENEMY_CONTACT_DAMAGE: i32 = 10;
    /// Enemy spawn region (inclusive, integer pixels)
    pub const ENEMY_SPAWN_MIN: (i32, i32) = (100, 200);
    pub const ENEMY_SPAWN_MAX: (i32, i32) = (462 - 40, 485 - 40);

    /// Dead enemies come back after this long
    pub const RESPAWN_DELAY: Duration = Duration::from_secs(3);

    /// Coins awarded straight to the score when an enemy dies
    pub const COINS_PER_KILL: usize = 5;
    /// Chance per tick of placing a coin while coin generation is on
    pub const COIN_SPAWN_CHANCE: f64 = 0.01;
    /// Coin spawn region (inclusive, integer pixels)
    pub const COIN_SPAWN_MIN: (i32, i32) = (8, 60);
    pub const COIN_SPAWN_MAX: (i32, i32) = (462 - 40, 485 - 40);

    /// Random placement gives up after this many rejected samples
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;
}

/// Integer pixel offset from `from` to `to`, truncated toward zero per axis
#[inline]
pub fn pixel_offset(from: Vec2, to: Vec2) -> IVec2 {
    let d = to - from;
    IVec2::new(d.x as i32, d.y as i32)
}

/// Integer pixel position, truncated toward zero
#[inline]
pub fn pixel_pos(pos: Vec2) -> IVec2 {
    IVec2::new(pos.x as i32, pos.y as i32)
}
