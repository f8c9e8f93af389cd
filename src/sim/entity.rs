//! Mobile entities: the player, enemies, bullets and coins
//!
//! Every entity owns its position and shares its sprite's collision mask.

use std::rc::Rc;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, BULLET_BOUNDS, ENEMY_BOUNDS, PLAYER_BOUNDS};
use super::mask::CollisionMask;
use crate::consts::*;
use crate::error::GameError;
use crate::pixel_offset;
use crate::renderer::Sprite;

/// Monotonic entity identifier, unique within a `World`
pub type EntityId = u32;

/// The player's tank
#[derive(Debug, Clone)]
pub struct Player {
    pub health: i32,
    pub pos: Vec2,
    /// Unit direction of the last successful move; bullets fly this way
    pub facing: Vec2,
    pub mask: Rc<CollisionMask>,
}

impl Player {
    pub fn new(health: i32, pos: Vec2, mask: Rc<CollisionMask>) -> Self {
        Self {
            health,
            pos,
            facing: Vec2::NEG_Y,
            mask,
        }
    }

    /// Attempt to move by `delta`. Rejected moves leave the player in place
    /// and keep the old facing.
    pub fn try_move(&mut self, delta: Vec2, arena: &Arena) -> bool {
        let next = self.pos + delta;
        if !arena.can_occupy(next, &self.mask, &PLAYER_BOUNDS) {
            return false;
        }
        self.pos = next;
        let dir = delta.normalize_or_zero();
        if dir != Vec2::ZERO {
            self.facing = dir;
        }
        true
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Fire a bullet from the player's position along its facing
    pub fn shoot(&self, id: EntityId, mask: Rc<CollisionMask>) -> Bullet {
        Bullet::new(id, BULLET_DAMAGE, self.pos, self.facing, mask)
    }
}

/// Enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Basic,
    Advanced,
}

impl EnemyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Advanced => "advanced",
        }
    }

    /// Nominal contact damage carried by the variant.
    ///
    /// Contact with the player always deals `ENEMY_CONTACT_DAMAGE`; this value
    /// is kept on the enemy but not applied.
    pub fn damage_on_collision(&self) -> i32 {
        match self {
            EnemyKind::Basic => 10,
            EnemyKind::Advanced => 50,
        }
    }

    /// Pixels moved per axis per tick
    pub fn step(&self) -> f32 {
        match self {
            EnemyKind::Basic => 1.0,
            EnemyKind::Advanced => 1.0,
        }
    }

    pub fn sprite(&self) -> Sprite {
        match self {
            EnemyKind::Basic => Sprite::EnemyBasic,
            EnemyKind::Advanced => Sprite::EnemyAdvanced,
        }
    }
}

impl FromStr for EnemyKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(EnemyKind::Basic),
            "advanced" => Ok(EnemyKind::Advanced),
            _ => Err(GameError::UnknownEnemyKind(s.to_string())),
        }
    }
}

/// An enemy tank
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub health: i32,
    pub initial_health: i32,
    pub pos: Vec2,
    pub damage_on_collision: i32,
    pub mask: Rc<CollisionMask>,
}

impl Enemy {
    pub fn new(
        id: EntityId,
        kind: EnemyKind,
        health: i32,
        pos: Vec2,
        mask: Rc<CollisionMask>,
    ) -> Self {
        Self {
            id,
            kind,
            health,
            initial_health: health,
            pos,
            damage_on_collision: kind.damage_on_collision(),
            mask,
        }
    }

    /// Subtract `amount` from health, flooring at zero. Returns true if this
    /// killed the enemy.
    pub fn apply_damage(&mut self, amount: i32) -> bool {
        self.health = (self.health - amount).max(0);
        self.health == 0
    }

    pub fn reset_health(&mut self) {
        self.health = self.initial_health;
    }
}

/// What an enemy can do to the player each tick
pub trait Hostile {
    /// Step toward `target`. Returns whether the move was accepted.
    fn pursue(&mut self, target: Vec2, arena: &Arena) -> bool;

    /// Damage the player if the masks overlap. Returns whether they touched.
    fn collide_with_player(&self, player: &mut Player) -> bool;
}

impl Hostile for Enemy {
    fn pursue(&mut self, target: Vec2, arena: &Arena) -> bool {
        let dir = target - self.pos;
        // A zero delta still steps in the positive direction
        let sx = if dir.x < 0.0 { -1.0 } else { 1.0 };
        let sy = if dir.y < 0.0 { -1.0 } else { 1.0 };
        let next = self.pos + Vec2::new(sx, sy) * self.kind.step();

        if arena.can_occupy(next, &self.mask, &ENEMY_BOUNDS) {
            self.pos = next;
            true
        } else {
            false
        }
    }

    fn collide_with_player(&self, player: &mut Player) -> bool {
        let offset = pixel_offset(self.pos, player.pos);
        if self.mask.overlaps(&player.mask, offset) {
            player.take_damage(ENEMY_CONTACT_DAMAGE);
            true
        } else {
            false
        }
    }
}

/// Result of advancing one bullet for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletFate {
    /// Moved and still in flight
    Live,
    /// Next step would leave the bullet bounds
    OutOfBounds,
    /// Next step would touch the obstacle map
    HitObstacle,
    /// Struck an enemy and was consumed
    HitEnemy { enemy_id: EntityId, killed: bool },
}

/// A player projectile
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: EntityId,
    pub damage: i32,
    pub pos: Vec2,
    pub direction: Vec2,
    pub mask: Rc<CollisionMask>,
}

impl Bullet {
    pub fn new(
        id: EntityId,
        damage: i32,
        pos: Vec2,
        direction: Vec2,
        mask: Rc<CollisionMask>,
    ) -> Self {
        Self {
            id,
            damage,
            pos,
            direction,
            mask,
        }
    }

    /// Move one step. A bullet never stalls: a rejected step means it is
    /// destroyed, reported as `OutOfBounds` or `HitObstacle`.
    pub fn advance(&mut self, arena: &Arena) -> BulletFate {
        let next = self.pos + self.direction * BULLET_SPEED;
        if !BULLET_BOUNDS.contains(next) {
            return BulletFate::OutOfBounds;
        }
        if arena.blocked(next, &self.mask) {
            return BulletFate::HitObstacle;
        }
        self.pos = next;
        BulletFate::Live
    }

    pub fn hits(&self, enemy: &Enemy) -> bool {
        self.mask.overlaps(&enemy.mask, pixel_offset(self.pos, enemy.pos))
    }
}

/// A currency token
#[derive(Debug, Clone)]
pub struct Coin {
    pub id: EntityId,
    pub pos: Vec2,
    pub mask: Rc<CollisionMask>,
}

impl Coin {
    pub fn new(id: EntityId, pos: Vec2, mask: Rc<CollisionMask>) -> Self {
        Self { id, pos, mask }
    }

    pub fn touches(&self, player: &Player) -> bool {
        self.mask.overlaps(&player.mask, pixel_offset(self.pos, player.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: u32) -> Rc<CollisionMask> {
        Rc::new(CollisionMask::filled(size, size))
    }

    #[test]
    fn test_enemy_kind_from_str() {
        assert_eq!("basic".parse::<EnemyKind>().unwrap(), EnemyKind::Basic);
        assert_eq!("Advanced".parse::<EnemyKind>().unwrap(), EnemyKind::Advanced);
        let err = "boss".parse::<EnemyKind>();
        assert!(matches!(err, Err(GameError::UnknownEnemyKind(ref s)) if s == "boss"));
    }

    #[test]
    fn test_player_move_updates_facing() {
        let arena = Arena::open();
        let mut player = Player::new(150, Vec2::new(150.0, 450.0), square(PLAYER_SIZE));
        assert_eq!(player.facing, Vec2::NEG_Y);

        assert!(player.try_move(Vec2::new(-2.0, 0.0), &arena));
        assert_eq!(player.pos, Vec2::new(148.0, 450.0));
        assert_eq!(player.facing, Vec2::NEG_X);
    }

    #[test]
    fn test_player_rejected_move_stays_put() {
        let arena = Arena::open();
        let mut player = Player::new(150, Vec2::new(8.0, 60.0), square(PLAYER_SIZE));
        assert!(!player.try_move(Vec2::new(-2.0, 0.0), &arena));
        assert_eq!(player.pos, Vec2::new(8.0, 60.0));
        // Facing only follows accepted moves
        assert_eq!(player.facing, Vec2::NEG_Y);
    }

    #[test]
    fn test_enemy_pursue_tie_steps_positive() {
        let arena = Arena::open();
        let start = Vec2::new(200.0, 300.0);
        let mut enemy = Enemy::new(1, EnemyKind::Basic, 50, start, square(ENEMY_SIZE));
        assert!(enemy.pursue(Vec2::new(200.0, 100.0), &arena));
        assert_eq!(enemy.pos, Vec2::new(201.0, 299.0));
    }

    #[test]
    fn test_enemy_pursue_blocked_by_bounds() {
        let arena = Arena::open();
        let start = Vec2::new(ENEMY_MIN_X, 300.0);
        let mut enemy = Enemy::new(1, EnemyKind::Advanced, 100, start, square(ENEMY_SIZE));
        assert!(!enemy.pursue(Vec2::new(0.0, 400.0), &arena));
        assert_eq!(enemy.pos, start);
    }

    #[test]
    fn test_contact_damage_is_flat() {
        let mut player = Player::new(150, Vec2::new(150.0, 450.0), square(PLAYER_SIZE));
        for kind in [EnemyKind::Basic, EnemyKind::Advanced] {
            let enemy = Enemy::new(1, kind, 50, Vec2::new(160.0, 455.0), square(ENEMY_SIZE));
            let before = player.health;
            assert!(enemy.collide_with_player(&mut player));
            assert_eq!(player.health, before - ENEMY_CONTACT_DAMAGE);
        }
        assert_eq!(EnemyKind::Advanced.damage_on_collision(), 50);
    }

    #[test]
    fn test_enemy_damage_floors_at_zero() {
        let start = Vec2::new(200.0, 300.0);
        let mut enemy = Enemy::new(1, EnemyKind::Basic, 15, start, square(ENEMY_SIZE));
        assert!(!enemy.apply_damage(10));
        assert_eq!(enemy.health, 5);
        assert!(enemy.apply_damage(10));
        assert_eq!(enemy.health, 0);
        enemy.reset_health();
        assert_eq!(enemy.health, 15);
    }

    #[test]
    fn test_bullet_advance_fates() {
        let mut obstacle = CollisionMask::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
        obstacle.fill_rect(300, 100, 10, 10);
        let arena = Arena::new(obstacle);

        let mut b = Bullet::new(1, 10, Vec2::new(100.0, 200.0), Vec2::X, square(BULLET_SIZE));
        assert_eq!(b.advance(&arena), BulletFate::Live);
        assert_eq!(b.pos, Vec2::new(108.0, 200.0));

        let mut b = Bullet::new(2, 10, Vec2::new(100.0, 62.0), Vec2::NEG_Y, square(BULLET_SIZE));
        assert_eq!(b.advance(&arena), BulletFate::OutOfBounds);
        assert_eq!(b.pos, Vec2::new(100.0, 62.0));

        let mut b = Bullet::new(3, 10, Vec2::new(282.0, 100.0), Vec2::X, square(BULLET_SIZE));
        assert_eq!(b.advance(&arena), BulletFate::HitObstacle);
    }
}
