//! Main menu and instruction screens

use glam::Vec2;

use super::{SceneKind, Transition};
use crate::consts::SCREEN_WIDTH;
use crate::platform::{InputEvent, Key};
use crate::renderer::{Anchor, Color, Renderer, Sprite};

/// Half-open screen rectangle for click targets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.x <= p.x && p.x < self.x + self.w && self.y <= p.y && p.y < self.y + self.h
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

const BUTTON_W: f32 = 150.0;
const BUTTON_H: f32 = 50.0;
const ICON_SIZE: f32 = 50.0;
const ICON_MARGIN: f32 = 10.0;

pub const PLAY_BUTTON: Rect = Rect::new(
    (SCREEN_WIDTH as i32 / 2) as f32 - BUTTON_W / 2.0,
    300.0,
    BUTTON_W,
    BUTTON_H,
);
pub const QUIT_BUTTON: Rect = Rect::new(
    (SCREEN_WIDTH as i32 / 2) as f32 - BUTTON_W / 2.0,
    400.0,
    BUTTON_W,
    BUTTON_H,
);
/// Instructions toggle, top-right corner
pub const DOCUMENT_ICON: Rect = Rect::new(
    SCREEN_WIDTH - ICON_MARGIN - ICON_SIZE,
    ICON_MARGIN,
    ICON_SIZE,
    ICON_SIZE,
);

pub const INSTRUCTIONS: [&str; 7] = [
    "Instructions:",
    "Move with arrow keys.",
    "Shoot with spacebar.",
    "Avoid enemies.",
    "One collide with enemy - end.",
    "Collect coins.",
    "Survive as long as possible!",
];

/// Title screen
#[derive(Debug, Clone, Default)]
pub struct MainMenu;

impl MainMenu {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_events(&mut self, events: &[InputEvent]) -> Transition {
        for event in events {
            match *event {
                InputEvent::Quit | InputEvent::KeyDown(Key::Q) => return Transition::Exit,
                InputEvent::KeyDown(Key::Enter) => return Transition::Goto(SceneKind::Playing),
                InputEvent::KeyDown(Key::I) => return Transition::Goto(SceneKind::Instruction),
                InputEvent::MouseClick(p) => {
                    if PLAY_BUTTON.contains(p) {
                        return Transition::Goto(SceneKind::Playing);
                    } else if QUIT_BUTTON.contains(p) {
                        return Transition::Exit;
                    } else if DOCUMENT_ICON.contains(p) {
                        return Transition::Goto(SceneKind::Instruction);
                    }
                }
                _ => {}
            }
        }
        Transition::Stay
    }

    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw_sprite(Sprite::MenuBackground, Vec2::ZERO);
        renderer.draw_sprite(Sprite::PlayButton, PLAY_BUTTON.top_left());
        renderer.draw_sprite(Sprite::QuitButton, QUIT_BUTTON.top_left());
        renderer.draw_sprite(Sprite::DocumentIcon, DOCUMENT_ICON.top_left());
    }
}

/// How-to-play screen
#[derive(Debug, Clone, Default)]
pub struct Instruction;

impl Instruction {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_events(&mut self, events: &[InputEvent]) -> Transition {
        for event in events {
            match *event {
                InputEvent::Quit | InputEvent::KeyDown(Key::Q) => return Transition::Exit,
                InputEvent::KeyDown(Key::I) | InputEvent::KeyDown(Key::Escape) => {
                    return Transition::Goto(SceneKind::MainMenu);
                }
                InputEvent::MouseClick(p) if DOCUMENT_ICON.contains(p) => {
                    return Transition::Goto(SceneKind::MainMenu);
                }
                _ => {}
            }
        }
        Transition::Stay
    }

    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw_sprite(Sprite::InstructionBackground, Vec2::ZERO);
        renderer.draw_sprite(Sprite::DocumentIcon, DOCUMENT_ICON.top_left());
        let cx = (SCREEN_WIDTH as i32 / 2) as f32;
        for (i, line) in INSTRUCTIONS.iter().enumerate() {
            let pos = Vec2::new(cx, 200.0 + i as f32 * 40.0);
            renderer.draw_text(line, pos, Anchor::Center, 36.0, Color::SILVER);
        }
    }
}
