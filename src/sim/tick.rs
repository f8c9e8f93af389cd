//! Per-frame simulation tick
//!
//! One call to `tick` advances the Playing session by exactly one frame:
//! player input, bullets, enemies, coins, then respawns.

use std::time::Duration;

use glam::Vec2;
use rand::Rng;

use super::entity::{BulletFate, Enemy, EntityId, Hostile, Player};
use super::state::{GameEvent, World};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire a bullet this tick
    pub shoot: bool,
}

/// Advance the Playing session by one tick.
///
/// `now` is the session clock sampled once for this frame; respawn deadlines
/// are compared against it.
pub fn tick(
    world: &mut World,
    player: &mut Player,
    enemies: &mut Vec<Enemy>,
    input: &TickInput,
    now: Duration,
) {
    apply_input(world, player, input);
    update_bullets(world, enemies, now);
    update_enemies(world, player, enemies);
    update_coins(world, player);
    respawn_enemies(world, enemies, now);

    log::trace!(
        "tick {:?}: bullets={} enemies={} coins={} score={}",
        now,
        world.bullets.len(),
        enemies.len(),
        world.coins.len(),
        world.score()
    );
}

/// Move the player one axis at a time, then fire if requested
pub fn apply_input(world: &mut World, player: &mut Player, input: &TickInput) {
    let moves = [
        (input.left, Vec2::new(-PLAYER_STEP, 0.0)),
        (input.right, Vec2::new(PLAYER_STEP, 0.0)),
        (input.up, Vec2::new(0.0, -PLAYER_STEP)),
        (input.down, Vec2::new(0.0, PLAYER_STEP)),
    ];
    for (held, delta) in moves {
        if held {
            player.try_move(delta, &world.arena);
        }
    }

    if input.shoot {
        world.spawn_bullet(player);
    }
}

/// Advance every live bullet and resolve hits.
///
/// Works on a snapshot of the bullet list: each bullet gets exactly one fate
/// and only `Live` bullets are put back. Returns the fate of every bullet
/// that was live at the start of the call, in id order.
pub fn update_bullets(
    world: &mut World,
    enemies: &mut Vec<Enemy>,
    now: Duration,
) -> Vec<(EntityId, BulletFate)> {
    let snapshot = std::mem::take(&mut world.bullets);
    let mut fates = Vec::with_capacity(snapshot.len());

    for mut bullet in snapshot {
        let fate = match bullet.advance(&world.arena) {
            BulletFate::Live => strike_first_enemy(world, &bullet, enemies, now),
            fate => fate,
        };
        fates.push((bullet.id, fate));
        if fate == BulletFate::Live {
            world.bullets.push(bullet);
        }
    }

    fates
}

/// Damage the first enemy (in collection order) the bullet overlaps.
/// Kills move the enemy to the respawn queue and award coins.
fn strike_first_enemy(
    world: &mut World,
    bullet: &super::entity::Bullet,
    enemies: &mut Vec<Enemy>,
    now: Duration,
) -> BulletFate {
    let Some(idx) = enemies.iter().position(|e| bullet.hits(e)) else {
        return BulletFate::Live;
    };

    let enemy_id = enemies[idx].id;
    let killed = enemies[idx].apply_damage(bullet.damage);

    if killed {
        let enemy = enemies.remove(idx);
        log::debug!(
            "enemy {} ({}) destroyed at ({}, {})",
            enemy.id,
            enemy.kind.as_str(),
            enemy.pos.x,
            enemy.pos.y
        );
        world.award_coins(enemy.pos, COINS_PER_KILL);
        world.events.push(GameEvent::EnemyKilled {
            enemy_id,
            kind: enemy.kind,
        });
        world.respawns.schedule(enemy, now + RESPAWN_DELAY);
    } else {
        world.events.push(GameEvent::EnemyHit { enemy_id });
    }

    BulletFate::HitEnemy { enemy_id, killed }
}

/// Each enemy steps toward the player, then hurts it on contact
pub fn update_enemies(world: &mut World, player: &mut Player, enemies: &mut [Enemy]) {
    for enemy in enemies.iter_mut() {
        enemy.pursue(player.pos, &world.arena);
        if enemy.collide_with_player(player) {
            log::debug!("player hit by enemy {}, health {}", enemy.id, player.health);
            world.events.push(GameEvent::PlayerHit {
                health: player.health,
            });
        }
    }
}

/// Maybe spawn a coin, then move every coin the player touches to the score
pub fn update_coins(world: &mut World, player: &Player) {
    if world.coins_enabled && world.rng_mut().random_bool(COIN_SPAWN_CHANCE) {
        world.spawn_random_coin();
    }

    let (picked, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut world.coins)
        .into_iter()
        .partition(|coin| coin.touches(player));
    world.coins = remaining;

    for coin in picked {
        log::debug!("coin {} collected", coin.id);
        world.events.push(GameEvent::CoinCollected { coin_id: coin.id });
        world.collected_coins.push(coin);
    }
}

/// Bring back every enemy whose respawn deadline has passed, at full health
pub fn respawn_enemies(world: &mut World, enemies: &mut Vec<Enemy>, now: Duration) {
    let due = world.respawns.drain_due(now);
    if due.is_empty() {
        return;
    }

    for mut enemy in due {
        enemy.reset_health();
        log::debug!("enemy {} respawned", enemy.id);
        world.events.push(GameEvent::EnemyRespawned { enemy_id: enemy.id });
        enemies.push(enemy);
    }
    // Keep scan order stable by id
    enemies.sort_by_key(|e| e.id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EnemyKind;
    use proptest::prelude::*;

    fn setup() -> (World, Player, Vec<Enemy>) {
        let world = World::open(12345);
        let player = world.new_player();
        (world, player, Vec::new())
    }

    #[test]
    fn test_enemy_contact_costs_ten_health() {
        let (mut world, mut player, mut enemies) = setup();
        player.pos = Vec2::new(150.0, 450.0);
        enemies.push(world.new_enemy(EnemyKind::Basic, 50, Vec2::new(152.0, 450.0)));

        let before = player.health;
        tick(&mut world, &mut player, &mut enemies, &TickInput::default(), Duration::ZERO);
        assert_eq!(player.health, before - 10);
    }

    #[test]
    fn test_contact_damage_repeats_every_tick() {
        let (mut world, mut player, mut enemies) = setup();
        enemies.push(world.new_enemy(EnemyKind::Advanced, 100, Vec2::new(152.0, 450.0)));

        let before = player.health;
        for i in 0..3 {
            let now = Duration::from_millis(16 * i);
            tick(&mut world, &mut player, &mut enemies, &TickInput::default(), now);
        }
        assert_eq!(player.health, before - 30);
    }

    #[test]
    fn test_bullet_hits_enemy_above() {
        let (mut world, mut player, mut enemies) = setup();
        player.pos = Vec2::new(150.0, 450.0);
        player.facing = Vec2::NEG_Y;
        world.spawn_bullet(&player);
        enemies.push(world.new_enemy(EnemyKind::Basic, 50, Vec2::new(150.0, 430.0)));

        let fates = update_bullets(&mut world, &mut enemies, Duration::ZERO);
        assert_eq!(fates.len(), 1);
        assert!(matches!(fates[0].1, BulletFate::HitEnemy { killed: false, .. }));
        assert!(world.bullets.is_empty());
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].health, 40);
    }

    #[test]
    fn test_bullet_hits_only_first_enemy() {
        let (mut world, player, mut enemies) = setup();
        world.spawn_bullet(&player);
        // Two enemies stacked on the bullet's path
        enemies.push(world.new_enemy(EnemyKind::Basic, 50, Vec2::new(150.0, 430.0)));
        enemies.push(world.new_enemy(EnemyKind::Basic, 50, Vec2::new(150.0, 432.0)));

        update_bullets(&mut world, &mut enemies, Duration::ZERO);
        assert_eq!(enemies[0].health, 40);
        assert_eq!(enemies[1].health, 50);
    }

    #[test]
    fn test_two_hits_in_one_tick_stack() {
        let (mut world, player, mut enemies) = setup();
        world.spawn_bullet(&player);
        world.spawn_bullet(&player);
        enemies.push(world.new_enemy(EnemyKind::Basic, 15, Vec2::new(150.0, 430.0)));

        let fates = update_bullets(&mut world, &mut enemies, Duration::ZERO);
        assert!(matches!(fates[1].1, BulletFate::HitEnemy { killed: true, .. }));
        assert!(enemies.is_empty());
        assert_eq!(world.respawns.len(), 1);
    }

    #[test]
    fn test_kill_awards_five_coins_and_respawns_after_delay() {
        let (mut world, mut player, mut enemies) = setup();
        world.spawn_bullet(&player);
        player.pos = Vec2::new(400.0, 100.0);
        enemies.push(world.new_enemy(EnemyKind::Basic, 10, Vec2::new(150.0, 430.0)));

        let t0 = Duration::from_secs(10);
        tick(&mut world, &mut player, &mut enemies, &TickInput::default(), t0);
        assert!(enemies.is_empty());
        assert_eq!(world.score(), 5);
        assert!(world.coins.is_empty());
        assert_eq!(world.respawns.len(), 1);

        let almost = t0 + RESPAWN_DELAY - Duration::from_millis(1);
        tick(&mut world, &mut player, &mut enemies, &TickInput::default(), almost);
        assert!(enemies.is_empty());

        tick(&mut world, &mut player, &mut enemies, &TickInput::default(), t0 + RESPAWN_DELAY);
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].health, enemies[0].initial_health);
        assert!(world.respawns.is_empty());
    }

    #[test]
    fn test_coin_pickup_transfers_coin() {
        let (mut world, player, _) = setup();
        world.spawn_coin_at(player.pos + Vec2::new(5.0, 5.0));
        world.spawn_coin_at(Vec2::new(20.0, 80.0));

        update_coins(&mut world, &player);
        assert_eq!(world.coins.len(), 1);
        assert_eq!(world.collected_coins.len(), 1);
        assert_eq!(world.coins.len() + world.collected_coins.len(), 2);
        let events = world.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::CoinCollected { .. })));
    }

    #[test]
    fn test_coin_generation_disabled_spawns_nothing() {
        let (mut world, mut player, mut enemies) = setup();
        world.stop_coin_generation();
        for i in 0..5000 {
            let now = Duration::from_millis(16 * i);
            tick(&mut world, &mut player, &mut enemies, &TickInput::default(), now);
            assert!(world.coins.is_empty());
        }
    }

    #[test]
    fn test_coin_generation_enabled_spawns_coins() {
        let (mut world, mut player, mut enemies) = setup();
        // Park the player in a corner so it does not pick everything up
        player.pos = Vec2::new(437.0, 460.0);
        world.start_coin_generation();
        let mut spawned = 0;
        for i in 0..3000 {
            let now = Duration::from_millis(16 * i);
            tick(&mut world, &mut player, &mut enemies, &TickInput::default(), now);
            spawned += world
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::CoinSpawned { .. }))
                .count();
        }
        assert!(spawned > 0);
        assert_eq!(world.coins.len() + world.collected_coins.len(), spawned);
    }

    #[test]
    fn test_input_moves_each_axis_and_shoots() {
        let (mut world, mut player, _) = setup();
        let start = player.pos;
        let input = TickInput {
            left: true,
            up: true,
            shoot: true,
            ..Default::default()
        };
        apply_input(&mut world, &mut player, &input);
        assert_eq!(player.pos, start + Vec2::new(-2.0, -2.0));
        // Last accepted move wins
        assert_eq!(player.facing, Vec2::NEG_Y);
        assert_eq!(world.bullets.len(), 1);
        assert_eq!(world.bullets[0].direction, Vec2::NEG_Y);
    }

    proptest! {
        #[test]
        fn prop_each_bullet_gets_exactly_one_fate(
            shots in proptest::collection::vec((8.0f32..440.0, 60.0f32..465.0, 0usize..4), 1..20),
            foes in proptest::collection::vec((75.0f32..420.0, 125.0f32..440.0), 0..6),
        ) {
            let mut world = World::open(3);
            let mut enemies: Vec<Enemy> = foes
                .iter()
                .map(|&(x, y)| world.new_enemy(EnemyKind::Basic, 50, Vec2::new(x, y)))
                .collect();
            let dirs = [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y];
            let mut ids = Vec::new();
            for &(x, y, d) in &shots {
                let mut shooter = world.new_player();
                shooter.pos = Vec2::new(x, y);
                shooter.facing = dirs[d];
                ids.push(world.spawn_bullet(&shooter));
            }

            let fates = update_bullets(&mut world, &mut enemies, Duration::ZERO);

            let fate_ids: Vec<_> = fates.iter().map(|(id, _)| *id).collect();
            prop_assert_eq!(&fate_ids, &ids);
            let live: Vec<_> = fates
                .iter()
                .filter(|(_, f)| *f == BulletFate::Live)
                .map(|(id, _)| *id)
                .collect();
            let kept: Vec<_> = world.bullets.iter().map(|b| b.id).collect();
            prop_assert_eq!(live, kept);

            let hits_on = |id: EntityId| {
                fates
                    .iter()
                    .filter(|(_, f)| {
                        matches!(f, BulletFate::HitEnemy { enemy_id, .. } if *enemy_id == id)
                    })
                    .count() as i32
            };
            for enemy in &enemies {
                prop_assert_eq!(enemy.health, 50 - hits_on(enemy.id) * BULLET_DAMAGE);
                prop_assert!(enemy.health > 0);
            }
            let killed = fates
                .iter()
                .filter(|(_, f)| matches!(f, BulletFate::HitEnemy { killed: true, .. }))
                .count();
            prop_assert_eq!(killed, foes.len() - enemies.len());
            prop_assert_eq!(killed, world.respawns.len());
            prop_assert_eq!(world.score(), killed * COINS_PER_KILL);
        }
    }
}
