//! Arena geometry: per-type movement rectangles and the static obstacle map

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::mask::CollisionMask;
use crate::consts::*;
use crate::pixel_pos;

/// Inclusive axis-aligned rectangle a position must stay inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }
}

/// Where the player's top-left corner may go
pub const PLAYER_BOUNDS: Bounds = Bounds::new(
    FIELD_MIN_X,
    FIELD_MIN_Y,
    FIELD_MAX_X - PLAYER_SIZE as f32,
    FIELD_MAX_Y - PLAYER_SIZE as f32,
);

/// Where a bullet may travel before it is destroyed
pub const BULLET_BOUNDS: Bounds = Bounds::new(
    FIELD_MIN_X,
    FIELD_MIN_Y,
    FIELD_MAX_X - BULLET_SIZE as f32,
    FIELD_MAX_Y - BULLET_SIZE as f32,
);

/// Enemy movement rectangle
pub const ENEMY_BOUNDS: Bounds = Bounds::new(ENEMY_MIN_X, ENEMY_MIN_Y, ENEMY_MAX_X, ENEMY_MAX_Y);

/// The static level: an obstacle bitmap covering the whole screen, origin at (0, 0)
#[derive(Debug, Clone)]
pub struct Arena {
    obstacle: CollisionMask,
}

impl Arena {
    pub fn new(obstacle: CollisionMask) -> Self {
        Self { obstacle }
    }

    /// An arena with no obstacles (bounds still apply)
    pub fn open() -> Self {
        Self::new(CollisionMask::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32))
    }

    pub fn obstacle(&self) -> &CollisionMask {
        &self.obstacle
    }

    /// Whether a sprite with `mask` at `pos` touches an obstacle pixel
    #[inline]
    pub fn blocked(&self, pos: Vec2, mask: &CollisionMask) -> bool {
        self.obstacle.overlaps(mask, pixel_pos(pos))
    }

    /// Whether a sprite may stand at `pos`: inside `bounds` and clear of obstacles
    #[inline]
    pub fn can_occupy(&self, pos: Vec2, mask: &CollisionMask, bounds: &Bounds) -> bool {
        bounds.contains(pos) && !self.blocked(pos, mask)
    }

    /// Pick a uniformly random integer position in the inclusive region whose
    /// sprite does not touch an obstacle.
    ///
    /// Rejected samples are redrawn up to `MAX_PLACEMENT_ATTEMPTS` times, then
    /// the region is scanned row by row. Returns `None` only when every cell
    /// in the region is blocked.
    pub fn random_free_position<R: Rng>(
        &self,
        rng: &mut R,
        min: (i32, i32),
        max: (i32, i32),
        mask: &CollisionMask,
    ) -> Option<Vec2> {
        if min.0 > max.0 || min.1 > max.1 {
            return None;
        }

        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let x = rng.random_range(min.0..=max.0);
            let y = rng.random_range(min.1..=max.1);
            let pos = Vec2::new(x as f32, y as f32);
            if !self.blocked(pos, mask) {
                return Some(pos);
            }
        }

        log::warn!(
            "random placement gave up after {} attempts, scanning region",
            MAX_PLACEMENT_ATTEMPTS
        );
        (min.1..=max.1)
            .flat_map(|y| (min.0..=max.0).map(move |x| Vec2::new(x as f32, y as f32)))
            .find(|&pos| !self.blocked(pos, mask))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn walled_arena() -> Arena {
        let mut obstacle = CollisionMask::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
        obstacle.fill_rect(200, 200, 50, 50);
        Arena::new(obstacle)
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(PLAYER_BOUNDS.contains(Vec2::new(8.0, 60.0)));
        assert!(PLAYER_BOUNDS.contains(Vec2::new(437.8, 460.0)));
        assert!(!PLAYER_BOUNDS.contains(Vec2::new(7.9, 60.0)));
        assert!(!PLAYER_BOUNDS.contains(Vec2::new(100.0, 460.5)));
        assert!(ENEMY_BOUNDS.contains(Vec2::new(558.0, 521.0)));
        assert!(!ENEMY_BOUNDS.contains(Vec2::new(74.0, 200.0)));
    }

    #[test]
    fn test_can_occupy_respects_obstacles() {
        let arena = walled_arena();
        let mask = CollisionMask::filled(25, 25);
        // Overlapping the wall's top-left corner
        assert!(!arena.can_occupy(Vec2::new(180.0, 180.0), &mask, &PLAYER_BOUNDS));
        // Just clear of it
        assert!(arena.can_occupy(Vec2::new(175.0, 175.0), &mask, &PLAYER_BOUNDS));
        // Clear of walls but outside bounds
        assert!(!arena.can_occupy(Vec2::new(0.0, 0.0), &mask, &PLAYER_BOUNDS));
    }

    #[test]
    fn test_random_free_position_avoids_walls() {
        let arena = walled_arena();
        let mask = CollisionMask::filled(20, 20);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let pos = arena
                .random_free_position(&mut rng, (150, 150), (260, 260), &mask)
                .unwrap();
            assert!(!arena.blocked(pos, &mask));
            assert!(pos.x >= 150.0 && pos.x <= 260.0);
        }
    }

    #[test]
    fn test_random_free_position_fully_blocked() {
        let arena = Arena::new(CollisionMask::filled(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32));
        let mask = CollisionMask::filled(20, 20);
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(arena.random_free_position(&mut rng, (10, 10), (12, 12), &mask).is_none());
    }
}
