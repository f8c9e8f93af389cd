//! Final score screen

use glam::Vec2;

use super::Transition;
use crate::consts::SCREEN_WIDTH;
use crate::platform::{InputEvent, Key};
use crate::renderer::{Anchor, Color, Renderer, Sprite};

#[derive(Debug, Clone)]
pub struct GameOver {
    /// Score captured when the session ended
    pub score: usize,
}

impl GameOver {
    pub fn new(score: usize) -> Self {
        Self { score }
    }

    pub fn handle_events(&mut self, events: &[InputEvent]) -> Transition {
        let quit = events
            .iter()
            .any(|e| matches!(e, InputEvent::Quit | InputEvent::KeyDown(Key::Q)));
        if quit { Transition::Exit } else { Transition::Stay }
    }

    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let cx = (SCREEN_WIDTH as i32 / 2) as f32;
        renderer.draw_sprite(Sprite::GameOverBackground, Vec2::ZERO);
        renderer.draw_text("Game Over", Vec2::new(cx, 100.0), Anchor::Center, 36.0, Color::WHITE);
        renderer.draw_text(
            &format!("Score: {}", self.score),
            Vec2::new(cx, 150.0),
            Anchor::Center,
            36.0,
            Color::WHITE,
        );
    }
}
