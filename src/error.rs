//! Error types
//!
//! The simulation itself never fails at runtime; these cover the edges where
//! outside data enters: enemy kind tags, assets, and the settings file.

use thiserror::Error;

use crate::renderer::Sprite;

/// Top-level error for startup and scene construction
#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown enemy kind: {0:?}")]
    UnknownEnemyKind(String),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Asset provider failures (fatal at startup)
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no asset for sprite {0:?}")]
    Missing(Sprite),
    #[error("mask for {sprite:?} is {width}x{height}, expected {expected}x{expected}")]
    MaskSize {
        sprite: Sprite,
        width: u32,
        height: u32,
        expected: u32,
    },
    #[error("pixel buffer has {len} bytes, expected {expected} for {width}x{height} RGBA")]
    PixelBuffer {
        width: u32,
        height: u32,
        len: usize,
        expected: usize,
    },
}

/// Settings file failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
