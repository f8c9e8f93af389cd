//! Scene state machine
//!
//! MainMenu -> Instruction <-> MainMenu, MainMenu -> Playing -> GameOver.
//! Every scene can exit the program. Only Playing runs the simulation.

pub mod game_over;
pub mod menu;
pub mod playing;

pub use game_over::GameOver;
pub use menu::{DOCUMENT_ICON, Instruction, MainMenu, PLAY_BUTTON, QUIT_BUTTON, Rect};
pub use playing::Playing;

use std::time::Duration;

use crate::platform::InputSource;
use crate::renderer::Renderer;
use crate::sim::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    MainMenu,
    Instruction,
    Playing,
    GameOver,
}

/// What a scene asks the game loop to do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Goto(SceneKind),
    /// Leave the program
    Exit,
}

#[derive(Debug)]
pub enum Scene {
    MainMenu(MainMenu),
    Instruction(Instruction),
    Playing(Playing),
    GameOver(GameOver),
}

impl Scene {
    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::MainMenu(_) => SceneKind::MainMenu,
            Scene::Instruction(_) => SceneKind::Instruction,
            Scene::Playing(_) => SceneKind::Playing,
            Scene::GameOver(_) => SceneKind::GameOver,
        }
    }

    /// Poll input once and run one frame of the active scene
    pub fn update<I: InputSource + ?Sized>(
        &mut self,
        world: &mut World,
        input: &mut I,
        now: Duration,
    ) -> Transition {
        let events = input.poll_events();
        match self {
            Scene::MainMenu(menu) => menu.handle_events(&events),
            Scene::Instruction(screen) => screen.handle_events(&events),
            Scene::Playing(playing) => playing.update(world, &*input, &events, now),
            Scene::GameOver(screen) => screen.handle_events(&events),
        }
    }

    pub fn draw<R: Renderer + ?Sized>(&self, world: &World, renderer: &mut R) {
        match self {
            Scene::MainMenu(menu) => menu.draw(renderer),
            Scene::Instruction(screen) => screen.draw(renderer),
            Scene::Playing(playing) => playing.draw(world, renderer),
            Scene::GameOver(screen) => screen.draw(renderer),
        }
        renderer.present_frame();
    }

    /// Leave this scene for `to`.
    ///
    /// Leaving Playing tears the session down; GameOver shows the score read
    /// just before that teardown.
    pub fn change(self, to: SceneKind, world: &mut World, coin_generation: bool) -> Scene {
        let final_score = match self {
            Scene::Playing(playing) => Some(playing.finish(world)),
            _ => None,
        };

        log::info!("Scene -> {:?}", to);
        match to {
            SceneKind::MainMenu => Scene::MainMenu(MainMenu::new()),
            SceneKind::Instruction => Scene::Instruction(Instruction::new()),
            SceneKind::Playing => Scene::Playing(Playing::start(world, coin_generation)),
            SceneKind::GameOver => {
                Scene::GameOver(GameOver::new(final_score.unwrap_or_else(|| world.score())))
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::MainMenu(MainMenu::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{InputEvent, Key, ScriptedInput};
    use glam::Vec2;

    #[test]
    fn test_menu_to_playing_to_game_over() {
        let mut world = World::open(21);
        let mut input = ScriptedInput::new()
            .at(0, InputEvent::MouseClick(PLAY_BUTTON.center()))
            .at(2, InputEvent::KeyDown(Key::Q));

        let mut scene = Scene::default();
        let t = scene.update(&mut world, &mut input, Duration::ZERO);
        assert_eq!(t, Transition::Goto(SceneKind::Playing));
        scene = scene.change(SceneKind::Playing, &mut world, true);
        assert_eq!(scene.kind(), SceneKind::Playing);
        assert!(world.coins_enabled);

        assert_eq!(scene.update(&mut world, &mut input, Duration::ZERO), Transition::Stay);
        world.award_coins(Vec2::new(100.0, 100.0), 5);

        let t = scene.update(&mut world, &mut input, Duration::ZERO);
        assert_eq!(t, Transition::Goto(SceneKind::GameOver));
        scene = scene.change(SceneKind::GameOver, &mut world, true);

        match &scene {
            Scene::GameOver(screen) => assert_eq!(screen.score, 5),
            other => panic!("expected GameOver, got {:?}", other.kind()),
        }
        assert_eq!(world.score(), 0);
        assert!(!world.coins_enabled);
    }

    #[test]
    fn test_instruction_round_trip() {
        let mut world = World::open(1);
        let scene = Scene::default().change(SceneKind::Instruction, &mut world, false);
        assert_eq!(scene.kind(), SceneKind::Instruction);
        let scene = scene.change(SceneKind::MainMenu, &mut world, false);
        assert_eq!(scene.kind(), SceneKind::MainMenu);
    }
}
