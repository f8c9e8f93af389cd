//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of platform code:
//! - Seeded RNG only
//! - Time passed in by the caller, sampled once per tick
//! - Stable iteration order (by entity ID)
//! - Removal during a scan goes through snapshots or mark-and-sweep

pub mod arena;
pub mod entity;
pub mod mask;
pub mod respawn;
pub mod state;
pub mod tick;

pub use arena::{Arena, BULLET_BOUNDS, Bounds, ENEMY_BOUNDS, PLAYER_BOUNDS};
pub use entity::{Bullet, BulletFate, Coin, Enemy, EnemyKind, EntityId, Hostile, Player};
pub use mask::{ALPHA_THRESHOLD, CollisionMask};
pub use respawn::{RespawnEntry, RespawnQueue};
pub use state::{GameEvent, MaskSet, World};
pub use tick::{
    TickInput, apply_input, respawn_enemies, tick, update_bullets, update_coins, update_enemies,
};
