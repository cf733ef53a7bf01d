//! Headless Space Junk run
//!
//! Usage: `space_junk [config.toml|config.ron]`
//!
//! Plays one session with a scripted set of touches, logging audio and scene
//! changes instead of producing them.

use arcade_engine::audio::LogAudio;
use arcade_engine::config::Config;
use arcade_engine::foundation::logging;
use arcade_engine::input::{InputEvent, InputScript, Touch};
use arcade_engine::scene::LogPresenter;
use arcade_engine::Engine;
use space_junk::{catalog_for, GameConfig, GameSession};

const DEFAULT_CONFIG: &str = "config/space_junk.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = GameConfig::load_or_default(&path)?;
    log::info!("Loaded configuration from {}", path);

    let audio = LogAudio::new()
        .with_sound(config.audio.background_music.as_str())
        .with_sound(config.audio.explosion_sound.as_str());
    let presenter = LogPresenter::new().with_scene(config.assets.game_over_scene.as_str());
    let engine_config = config.session.engine_config();
    let script = demo_script(config.session.width);

    let mut session = GameSession::new(config.clone(), catalog_for(&config), audio, presenter)?;
    let report = Engine::run(engine_config, &mut session, script)?;

    let stats = session.stats();
    log::info!(
        "Finished in state {:?} after {} frames ({:.1}s): \
         {} spawned, {} recycled, {} reaped, {} destroyed",
        session.state(),
        report.frames,
        report.simulated_time,
        stats.spawned,
        stats.recycled,
        stats.reaped,
        stats.destroyed
    );
    Ok(())
}

/// Taps on alternating sides, then a slow drag across the screen
fn demo_script(width: f32) -> InputScript {
    let mut script = InputScript::new();
    for step in 0..10u8 {
        let x = if step % 2 == 0 { 0.0 } else { width };
        let touch = Touch::new(0, x, 100.0);
        script.push(f32::from(step) * 0.75 + 0.5, InputEvent::TouchBegan(vec![touch]));
    }
    for step in 0..=20u8 {
        let x = width * f32::from(step) / 20.0;
        let touch = Touch::new(1, x, 100.0);
        script.push(8.0 + f32::from(step) * 0.1, InputEvent::TouchMoved(vec![touch]));
    }
    script
}
