//! Asset provider interface and built-in assets
//!
//! The core only needs collision masks from the asset layer: one per mobile
//! sprite and one obstacle map for the level. Image handles stay with the
//! platform renderer.

use std::rc::Rc;

use crate::consts::*;
use crate::error::AssetError;
use crate::renderer::Sprite;
use crate::sim::{ALPHA_THRESHOLD, Arena, CollisionMask, MaskSet, World};

/// Brick walls in the built-in level: (x, y, width, height)
pub const WALLS: [(u32, u32, u32, u32); 4] = [
    (200, 150, 60, 30),
    (300, 250, 30, 90),
    (120, 300, 80, 30),
    (350, 400, 60, 30),
];

/// Source of collision masks
pub trait AssetProvider {
    /// Mask for a mobile sprite at its in-game size
    fn mask(&self, sprite: Sprite) -> Result<CollisionMask, AssetError>;

    /// Obstacle map covering the whole screen
    fn obstacle_mask(&self) -> Result<CollisionMask, AssetError>;
}

/// In-game size of each mobile sprite
pub fn expected_size(sprite: Sprite) -> Option<u32> {
    match sprite {
        Sprite::Player => Some(PLAYER_SIZE),
        Sprite::EnemyBasic | Sprite::EnemyAdvanced => Some(ENEMY_SIZE),
        Sprite::Bullet => Some(BULLET_SIZE),
        Sprite::Coin => Some(COIN_SIZE),
        _ => None,
    }
}

fn checked_mask<P: AssetProvider + ?Sized>(
    provider: &P,
    sprite: Sprite,
) -> Result<Rc<CollisionMask>, AssetError> {
    let mask = provider.mask(sprite)?;
    let expected = expected_size(sprite).ok_or(AssetError::Missing(sprite))?;
    if mask.width() != expected || mask.height() != expected {
        return Err(AssetError::MaskSize {
            sprite,
            width: mask.width(),
            height: mask.height(),
            expected,
        });
    }
    Ok(Rc::new(mask))
}

/// Fetch and size-check every sprite mask
pub fn load_masks<P: AssetProvider + ?Sized>(provider: &P) -> Result<MaskSet, AssetError> {
    Ok(MaskSet {
        player: checked_mask(provider, Sprite::Player)?,
        enemy_basic: checked_mask(provider, Sprite::EnemyBasic)?,
        enemy_advanced: checked_mask(provider, Sprite::EnemyAdvanced)?,
        bullet: checked_mask(provider, Sprite::Bullet)?,
        coin: checked_mask(provider, Sprite::Coin)?,
    })
}

/// Build a world from the provider's masks
pub fn load_world<P: AssetProvider + ?Sized>(provider: &P, seed: u64) -> Result<World, AssetError> {
    let masks = load_masks(provider)?;
    let arena = Arena::new(provider.obstacle_mask()?);
    log::info!(
        "Assets loaded: obstacle map {} opaque pixels",
        arena.obstacle().count()
    );
    Ok(World::new(arena, masks, seed))
}

/// Procedurally generated assets: square tanks and bullets, a round coin,
/// and the walled level.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinAssets;

impl BuiltinAssets {
    /// RGBA pixels of a filled disc on a transparent square
    fn disc_rgba(size: u32) -> Vec<u8> {
        let r = size as f32 / 2.0;
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 + 0.5 - r;
                let dy = y as f32 + 0.5 - r;
                let alpha = if dx * dx + dy * dy <= r * r { 255 } else { 0 };
                pixels.extend_from_slice(&[230, 190, 40, alpha]);
            }
        }
        pixels
    }
}

impl AssetProvider for BuiltinAssets {
    fn mask(&self, sprite: Sprite) -> Result<CollisionMask, AssetError> {
        match sprite {
            Sprite::Coin => CollisionMask::from_rgba(
                COIN_SIZE,
                COIN_SIZE,
                &Self::disc_rgba(COIN_SIZE),
                ALPHA_THRESHOLD,
            ),
            other => {
                let size = expected_size(other).ok_or(AssetError::Missing(other))?;
                Ok(CollisionMask::filled(size, size))
            }
        }
    }

    fn obstacle_mask(&self) -> Result<CollisionMask, AssetError> {
        let mut mask = CollisionMask::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
        for (x, y, w, h) in WALLS {
            mask.fill_rect(x, y, w, h);
        }
        Ok(mask)
    }
}
