//! World state shared by every scene
//!
//! The `World` owns the projectiles, coins, score and pending respawns for
//! the whole program run. The player and live enemies belong to the Playing
//! scene and are passed in explicitly where the simulation needs them.

use std::rc::Rc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::entity::{Bullet, Coin, Enemy, EnemyKind, EntityId, Player};
use super::mask::CollisionMask;
use super::respawn::RespawnQueue;
use crate::consts::*;
use crate::error::GameError;

/// Something that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Shot { bullet_id: EntityId },
    EnemyHit { enemy_id: EntityId },
    EnemyKilled { enemy_id: EntityId, kind: EnemyKind },
    EnemyRespawned { enemy_id: EntityId },
    PlayerHit { health: i32 },
    CoinSpawned { coin_id: EntityId },
    CoinCollected { coin_id: EntityId },
}

/// Collision masks for each mobile sprite, shared by every entity of that type
#[derive(Debug, Clone)]
pub struct MaskSet {
    pub player: Rc<CollisionMask>,
    pub enemy_basic: Rc<CollisionMask>,
    pub enemy_advanced: Rc<CollisionMask>,
    pub bullet: Rc<CollisionMask>,
    pub coin: Rc<CollisionMask>,
}

impl MaskSet {
    /// Fully opaque squares at the standard sprite sizes
    pub fn solid() -> Self {
        Self {
            player: Rc::new(CollisionMask::filled(PLAYER_SIZE, PLAYER_SIZE)),
            enemy_basic: Rc::new(CollisionMask::filled(ENEMY_SIZE, ENEMY_SIZE)),
            enemy_advanced: Rc::new(CollisionMask::filled(ENEMY_SIZE, ENEMY_SIZE)),
            bullet: Rc::new(CollisionMask::filled(BULLET_SIZE, BULLET_SIZE)),
            coin: Rc::new(CollisionMask::filled(COIN_SIZE, COIN_SIZE)),
        }
    }

    pub fn enemy(&self, kind: EnemyKind) -> Rc<CollisionMask> {
        match kind {
            EnemyKind::Basic => self.enemy_basic.clone(),
            EnemyKind::Advanced => self.enemy_advanced.clone(),
        }
    }
}

/// Program-wide simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub arena: Arena,
    pub masks: MaskSet,
    /// Live bullets (sorted by id)
    pub bullets: Vec<Bullet>,
    /// Coins waiting on the field to be picked up (sorted by id)
    pub coins: Vec<Coin>,
    /// Coins earned, in collection order; its length is the score
    pub collected_coins: Vec<Coin>,
    /// Dead enemies waiting to come back
    pub respawns: RespawnQueue,
    /// Whether periodic coin spawning is on
    pub coins_enabled: bool,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    next_id: EntityId,
}

impl World {
    pub fn new(arena: Arena, masks: MaskSet, seed: u64) -> Self {
        Self {
            arena,
            masks,
            bullets: Vec::new(),
            coins: Vec::new(),
            collected_coins: Vec::new(),
            respawns: RespawnQueue::new(),
            coins_enabled: false,
            events: Vec::new(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// A world with no obstacles and solid sprite masks
    pub fn open(seed: u64) -> Self {
        Self::new(Arena::open(), MaskSet::solid(), seed)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Current score: the number of collected coins
    pub fn score(&self) -> usize {
        self.collected_coins.len()
    }

    pub fn start_coin_generation(&mut self) {
        self.coins_enabled = true;
    }

    pub fn stop_coin_generation(&mut self) {
        self.coins_enabled = false;
    }

    /// A fresh player at the starting position
    pub fn new_player(&self) -> Player {
        Player::new(
            PLAYER_START_HEALTH,
            Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            self.masks.player.clone(),
        )
    }

    /// Build an enemy of the given kind
    pub fn new_enemy(&mut self, kind: EnemyKind, health: i32, pos: Vec2) -> Enemy {
        let id = self.next_entity_id();
        Enemy::new(id, kind, health, pos, self.masks.enemy(kind))
    }

    /// Build an enemy from a kind tag, rejecting unknown tags
    pub fn new_enemy_tagged(
        &mut self,
        tag: &str,
        health: i32,
        pos: Vec2,
    ) -> Result<Enemy, GameError> {
        let kind = tag.parse::<EnemyKind>()?;
        Ok(self.new_enemy(kind, health, pos))
    }

    /// Random obstacle-free position for an enemy inside the spawn region
    pub fn random_enemy_position(&mut self, kind: EnemyKind) -> Option<Vec2> {
        let mask = self.masks.enemy(kind);
        self.arena
            .random_free_position(&mut self.rng, ENEMY_SPAWN_MIN, ENEMY_SPAWN_MAX, &mask)
    }

    /// Fire a bullet from the player
    pub fn spawn_bullet(&mut self, player: &Player) -> EntityId {
        let id = self.next_entity_id();
        let bullet = player.shoot(id, self.masks.bullet.clone());
        self.bullets.push(bullet);
        self.events.push(GameEvent::Shot { bullet_id: id });
        id
    }

    /// Remove a bullet by id. Removing one that is already gone is a no-op.
    pub fn remove_bullet(&mut self, id: EntityId) -> bool {
        let before = self.bullets.len();
        self.bullets.retain(|b| b.id != id);
        self.bullets.len() != before
    }

    /// Place a coin on the field
    pub fn spawn_coin_at(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.coins.push(Coin::new(id, pos, self.masks.coin.clone()));
        self.events.push(GameEvent::CoinSpawned { coin_id: id });
        id
    }

    /// Place a coin at a random obstacle-free spot in the coin region
    pub fn spawn_random_coin(&mut self) -> Option<EntityId> {
        let mask = self.masks.coin.clone();
        match self
            .arena
            .random_free_position(&mut self.rng, COIN_SPAWN_MIN, COIN_SPAWN_MAX, &mask)
        {
            Some(pos) => Some(self.spawn_coin_at(pos)),
            None => {
                log::warn!("no free spot for a coin, skipping spawn");
                None
            }
        }
    }

    /// Credit `count` coins at `pos` straight to the score, skipping pickup
    pub fn award_coins(&mut self, pos: Vec2, count: usize) {
        for _ in 0..count {
            let id = self.next_entity_id();
            self.collected_coins
                .push(Coin::new(id, pos, self.masks.coin.clone()));
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop everything tied to a Playing session: bullets, coins, score and
    /// pending respawns.
    pub fn clear_session(&mut self) {
        self.bullets.clear();
        self.coins.clear();
        self.collected_coins.clear();
        self.respawns.clear();
        self.events.clear();
    }
}
