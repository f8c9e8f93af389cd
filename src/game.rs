//! Game loop driver
//!
//! `Game` owns the world, the active scene and the three platform adapters.
//! Each `update` is one frame: poll input, run the scene, route events to
//! audio, apply any transition, then draw.

use std::time::Duration;

use crate::audio::{AudioBackend, AudioManager, SoundEffect};
use crate::platform::InputSource;
use crate::renderer::Renderer;
use crate::scene::{Scene, SceneKind, Transition};
use crate::settings::Settings;
use crate::sim::{GameEvent, World};

/// Cap on frames run by a single `advance` call
const MAX_SUBSTEPS: u32 = 8;
/// Most frame time `advance` will try to catch up on; the session clock
/// itself still moves by the full gap
const MAX_FRAME_GAP: Duration = Duration::from_millis(250);

pub struct Game<I: InputSource, R: Renderer, A: AudioBackend> {
    world: World,
    scene: Scene,
    input: I,
    renderer: R,
    audio: AudioManager<A>,
    settings: Settings,
    /// Session time: wall time fed to `advance`, or the latest `now`
    clock: Duration,
    frame_dt: Duration,
    accumulator: Duration,
    frames: u64,
    running: bool,
}

impl<I: InputSource, R: Renderer, A: AudioBackend> Game<I, R, A> {
    /// Start at the main menu
    pub fn new(world: World, settings: Settings, input: I, renderer: R, audio_backend: A) -> Self {
        let audio = AudioManager::from_settings(audio_backend, &settings);
        let frame_dt = Duration::from_secs_f64(1.0 / settings.frame_rate.max(1) as f64);
        let mut game = Self {
            world,
            scene: Scene::default(),
            input,
            renderer,
            audio,
            settings,
            clock: Duration::ZERO,
            frame_dt,
            accumulator: Duration::ZERO,
            frames: 0,
            running: true,
        };
        log::info!("Game ready, world seed {}", game.world.seed);
        game.audio.play(SoundEffect::MenuTheme);
        game
    }

    /// Move the session clock forward by `dt` of wall time and run as many
    /// whole frames as it covers.
    ///
    /// Long gaps run at most `MAX_SUBSTEPS` frames, but every frame sees the
    /// full elapsed time, so respawn deadlines stay on the wall clock.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.clock += dt;
        self.accumulator = (self.accumulator + dt).min(MAX_FRAME_GAP);

        let mut substeps = 0;
        while self.accumulator >= self.frame_dt && substeps < MAX_SUBSTEPS && self.running {
            self.update(self.clock);
            self.accumulator -= self.frame_dt;
            substeps += 1;
        }
        substeps
    }

    /// Run one frame, then move the session clock on by one frame duration
    pub fn step(&mut self) -> bool {
        let running = self.update(self.clock);
        self.clock += self.frame_dt;
        running
    }

    /// Run exactly one frame with `now` as the session time. Returns whether
    /// the game is still running.
    pub fn update(&mut self, now: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.clock = self.clock.max(now);

        let transition = self.scene.update(&mut self.world, &mut self.input, now);
        self.route_events();

        match transition {
            Transition::Stay => {}
            Transition::Goto(kind) => self.enter(kind),
            Transition::Exit => {
                log::info!("Exit requested from {:?}", self.scene.kind());
                self.running = false;
            }
        }

        if self.running {
            self.scene.draw(&self.world, &mut self.renderer);
        }

        self.frames += 1;
        self.running
    }

    fn enter(&mut self, kind: SceneKind) {
        let previous = std::mem::take(&mut self.scene);
        self.scene = previous.change(kind, &mut self.world, self.settings.coin_generation);
        match kind {
            SceneKind::MainMenu => self.audio.play(SoundEffect::MenuTheme),
            SceneKind::Playing => self.audio.stop(SoundEffect::MenuTheme),
            _ => {}
        }
    }

    /// Hand this frame's simulation events to audio and the log
    fn route_events(&mut self) {
        for event in self.world.drain_events() {
            match event {
                GameEvent::CoinCollected { .. } => self.audio.play(SoundEffect::CoinCollect),
                other => log::trace!("frame {}: {:?}", self.frames, other),
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_dt
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &AudioManager<A> {
        &self.audio
    }
}
