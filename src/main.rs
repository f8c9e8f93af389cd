//! Battle City headless runner
//!
//! Plays a scripted session against the built-in assets: click Play, drive
//! the tank around while firing, quit to the Game Over screen, then exit.

use std::process::ExitCode;
use std::time::Instant;

use battle_city::assets::{BuiltinAssets, load_world};
use battle_city::audio::LogAudio;
use battle_city::platform::{InputEvent, Key, ScriptedInput};
use battle_city::renderer::RecordingRenderer;
use battle_city::scene::{PLAY_BUTTON, Scene};
use battle_city::{Game, GameError, Settings};

/// Frames between shots in the demo script
const FIRE_INTERVAL: u64 = 15;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Battle City (native) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), GameError> {
    let settings = Settings::load();
    let world = load_world(&BuiltinAssets, settings.effective_seed())?;
    let input = demo_script(settings.demo_frames);
    let max_frames = settings.demo_frames;
    let mut game = Game::new(
        world,
        settings,
        input,
        RecordingRenderer::new(),
        LogAudio::default(),
    );

    // One frame per tick of the cadence, stamped with real session time
    let frame_dt = game.frame_duration();
    let start = Instant::now();
    let mut next_frame = start;
    while game.is_running() && game.frames() < max_frames {
        game.update(start.elapsed());
        next_frame += frame_dt;
        std::thread::sleep(next_frame.saturating_duration_since(Instant::now()));
    }

    if let Scene::GameOver(screen) = game.scene() {
        log::info!("Final score: {}", screen.score);
    }
    log::info!(
        "Stopped after {} frames ({} presented) in {:?}, {} sounds played",
        game.frames(),
        game.renderer().frames_presented(),
        start.elapsed(),
        game.audio().backend().played.len()
    );
    Ok(())
}

/// Scripted input for a session of `frames` frames
fn demo_script(frames: u64) -> ScriptedInput {
    let quit_to_game_over = frames.saturating_sub(60).max(10);
    let exit = frames.saturating_sub(30).max(quit_to_game_over + 1);

    let mut input = ScriptedInput::new()
        .at(5, InputEvent::MouseClick(PLAY_BUTTON.center()))
        .hold(Key::Up, 10..60)
        .hold(Key::Right, 60..120)
        .hold(Key::Left, 200..260)
        .hold(Key::Down, 300..340)
        .at(quit_to_game_over, InputEvent::KeyDown(Key::Q))
        .at(exit, InputEvent::KeyDown(Key::Q));

    let mut frame = 10;
    while frame < quit_to_game_over {
        input = input.at(frame, InputEvent::KeyDown(Key::Space));
        frame += FIRE_INTERVAL;
    }
    input
}
