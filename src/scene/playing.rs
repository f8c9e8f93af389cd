//! The Playing session: owns the player and the living enemies

use std::time::Duration;

use glam::Vec2;

use super::{SceneKind, Transition};
use crate::consts::*;
use crate::platform::{InputEvent, InputSource, Key};
use crate::renderer::{Anchor, Color, Renderer, Sprite};
use crate::sim::{Enemy, EnemyKind, Player, TickInput, World, tick};

/// Initial enemy roster: kind, health, count
const ROSTER: [(EnemyKind, i32, usize); 2] = [
    (EnemyKind::Basic, BASIC_ENEMY_HEALTH, BASIC_ENEMY_COUNT),
    (EnemyKind::Advanced, ADVANCED_ENEMY_HEALTH, ADVANCED_ENEMY_COUNT),
];

const HUD_X: f32 = 563.0;
const HUD_SCORE_Y: f32 = 150.0;
const HUD_HEALTH_Y: f32 = 190.0;
const HUD_TEXT_SIZE: f32 = 36.0;

#[derive(Debug)]
pub struct Playing {
    pub player: Player,
    pub enemies: Vec<Enemy>,
}

impl Playing {
    /// Start a fresh session: new player, full roster, coins per `coin_generation`
    pub fn start(world: &mut World, coin_generation: bool) -> Self {
        world.clear_session();

        let player = world.new_player();
        let mut enemies = Vec::new();
        for (kind, health, count) in ROSTER {
            for _ in 0..count {
                match world.random_enemy_position(kind) {
                    Some(pos) => enemies.push(world.new_enemy(kind, health, pos)),
                    None => log::warn!("no free spawn spot for {} enemy, skipping", kind.as_str()),
                }
            }
        }

        if coin_generation {
            world.start_coin_generation();
        }

        log::info!(
            "Session started: {} enemies, coin generation {}",
            enemies.len(),
            if coin_generation { "on" } else { "off" }
        );
        Self { player, enemies }
    }

    /// End the session, returning the final score.
    ///
    /// Enemies, bullets, coins and pending respawns are all dropped; the
    /// score is read before anything is cleared.
    pub fn finish(self, world: &mut World) -> usize {
        let score = world.score();
        world.stop_coin_generation();
        world.clear_session();
        log::info!("Session over, score {}", score);
        score
    }

    /// Handle this frame's events, then advance the simulation one tick
    pub fn update<I: InputSource + ?Sized>(
        &mut self,
        world: &mut World,
        input: &I,
        events: &[InputEvent],
        now: Duration,
    ) -> Transition {
        let mut tick_input = TickInput {
            left: input.is_key_held(Key::Left),
            right: input.is_key_held(Key::Right),
            up: input.is_key_held(Key::Up),
            down: input.is_key_held(Key::Down),
            shoot: false,
        };

        for event in events {
            match event {
                InputEvent::Quit => return Transition::Exit,
                InputEvent::KeyDown(Key::Q) => return Transition::Goto(SceneKind::GameOver),
                InputEvent::KeyDown(Key::Space) => tick_input.shoot = true,
                _ => {}
            }
        }

        tick(world, &mut self.player, &mut self.enemies, &tick_input, now);

        if self.player.is_dead() {
            log::info!("Player destroyed");
            return Transition::Goto(SceneKind::GameOver);
        }
        Transition::Stay
    }

    pub fn draw<R: Renderer + ?Sized>(&self, world: &World, renderer: &mut R) {
        renderer.draw_sprite(Sprite::Background, Vec2::ZERO);
        renderer.draw_sprite(Sprite::Playground, Vec2::ZERO);
        renderer.draw_sprite(Sprite::Borders, Vec2::ZERO);

        renderer.draw_sprite(Sprite::Player, self.player.pos);
        for bullet in &world.bullets {
            renderer.draw_sprite(Sprite::Bullet, bullet.pos);
        }
        for enemy in &self.enemies {
            renderer.draw_sprite(enemy.kind.sprite(), enemy.pos);
        }
        for coin in &world.coins {
            renderer.draw_sprite(Sprite::Coin, coin.pos);
        }

        renderer.draw_text(
            &format!("Score: {}", world.score()),
            Vec2::new(HUD_X, HUD_SCORE_Y),
            Anchor::TopRight,
            HUD_TEXT_SIZE,
            Color::BLACK,
        );
        renderer.draw_text(
            &format!("Health: {}", self.player.health),
            Vec2::new(HUD_X, HUD_HEALTH_Y),
            Anchor::TopRight,
            HUD_TEXT_SIZE,
            Color::BLACK,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ScriptedInput;
    use crate::renderer::RecordingRenderer;

    fn started(seed: u64) -> (World, Playing) {
        let mut world = World::open(seed);
        let playing = Playing::start(&mut world, false);
        (world, playing)
    }

    #[test]
    fn test_start_spawns_full_roster() {
        let (world, playing) = started(3);
        let basic = playing.enemies.iter().filter(|e| e.kind == EnemyKind::Basic).count();
        let advanced = playing.enemies.iter().filter(|e| e.kind == EnemyKind::Advanced).count();
        assert_eq!(basic, BASIC_ENEMY_COUNT);
        assert_eq!(advanced, ADVANCED_ENEMY_COUNT);
        assert_eq!(playing.player.health, PLAYER_START_HEALTH);
        assert!(!world.coins_enabled);
        for enemy in &playing.enemies {
            let (x, y) = (enemy.pos.x as i32, enemy.pos.y as i32);
            assert!((ENEMY_SPAWN_MIN.0..=ENEMY_SPAWN_MAX.0).contains(&x));
            assert!((ENEMY_SPAWN_MIN.1..=ENEMY_SPAWN_MAX.1).contains(&y));
        }
    }

    #[test]
    fn test_start_enables_coins_when_asked() {
        let mut world = World::open(3);
        Playing::start(&mut world, true);
        assert!(world.coins_enabled);
    }

    #[test]
    fn test_space_fires_and_q_ends() {
        let (mut world, mut playing) = started(5);
        playing.enemies.clear();
        let input = ScriptedInput::new();

        let fire = [InputEvent::KeyDown(Key::Space)];
        let t = playing.update(&mut world, &input, &fire, Duration::ZERO);
        assert_eq!(t, Transition::Stay);
        assert_eq!(world.bullets.len(), 1);

        let t = playing.update(&mut world, &input, &[InputEvent::KeyDown(Key::Q)], Duration::ZERO);
        assert_eq!(t, Transition::Goto(SceneKind::GameOver));
        // Q ends the session before the tick runs
        assert_eq!(world.bullets.len(), 1);
    }

    #[test]
    fn test_held_keys_move_player() {
        let (mut world, mut playing) = started(5);
        playing.enemies.clear();
        let mut input = ScriptedInput::new().hold(Key::Up, 0..1);
        let events = input.poll_events();

        playing.update(&mut world, &input, &events, Duration::ZERO);
        assert_eq!(playing.player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y - PLAYER_STEP));
    }

    #[test]
    fn test_player_death_ends_session() {
        let (mut world, mut playing) = started(5);
        playing.enemies.clear();
        playing.player.health = 10;
        let enemy = world.new_enemy(EnemyKind::Basic, 50, playing.player.pos);
        playing.enemies.push(enemy);

        let t = playing.update(&mut world, &ScriptedInput::new(), &[], Duration::ZERO);
        assert_eq!(t, Transition::Goto(SceneKind::GameOver));
    }

    #[test]
    fn test_finish_reports_score_then_clears() {
        let (mut world, playing) = started(9);
        world.award_coins(Vec2::new(200.0, 200.0), 5);
        world.spawn_coin_at(Vec2::new(300.0, 300.0));

        let score = playing.finish(&mut world);
        assert_eq!(score, 5);
        assert_eq!(world.score(), 0);
        assert!(world.coins.is_empty());
        assert!(world.bullets.is_empty());
        assert!(world.respawns.is_empty());
        assert!(!world.coins_enabled);
    }

    #[test]
    fn test_draw_shows_every_entity_and_hud() {
        let (mut world, playing) = started(11);
        world.spawn_coin_at(Vec2::new(300.0, 300.0));
        let mut renderer = RecordingRenderer::new();

        playing.draw(&world, &mut renderer);
        renderer.present_frame();

        assert_eq!(renderer.sprite_count(Sprite::Player), 1);
        let enemy_sprites = renderer.sprite_count(Sprite::EnemyBasic)
            + renderer.sprite_count(Sprite::EnemyAdvanced);
        assert_eq!(enemy_sprites, playing.enemies.len());
        assert_eq!(renderer.sprite_count(Sprite::Coin), 1);
        assert!(renderer.has_text("Score: 0"));
        assert!(renderer.has_text("Health: 150"));
    }
}
