//! Headless shooter runner
//!
//! Plays a scripted round at a fixed time step and logs how it went.
//! Usage: `shooter [config.toml|config.ron] [animations.ron]`

use hybrid_engine::config::Config;
use hybrid_engine::foundation::logging;
use hybrid_engine::render::RecordingRenderer;
use shooter::{assets, Game, GameConfig, InputSource, Keys};

const DEFAULT_CONFIG: &str = "shooter.toml";
const DEFAULT_ANIMATIONS: &str = "assets/animations.ron";

/// Sweeps left and right while holding fire
struct DemoPilot {
    tick: u32,
}

impl InputSource for DemoPilot {
    fn poll(&mut self) -> Keys {
        self.tick += 1;
        let sweep = if (self.tick / 90) % 2 == 0 { Keys::LEFT } else { Keys::RIGHT };
        sweep | Keys::FIRE
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let animations_path = args.next().unwrap_or_else(|| DEFAULT_ANIMATIONS.to_string());

    let config = GameConfig::load_or_default(&config_path).map_err(|e| {
        log::error!("Failed to load {}: {}", config_path, e);
        e
    })?;
    let library = assets::load_library(&animations_path)?;

    let timestep = config.simulation.timestep;
    let duration = config.simulation.duration;
    let mut game = Game::new(config, &library).map_err(|e| {
        log::error!("Failed to start: {}", e);
        e
    })?;

    let mut pilot = DemoPilot { tick: 0 };
    let mut renderer = RecordingRenderer::new();
    let mut next_report = 1.0;

    log::info!("Running for {:.1}s at {:.4}s per frame", duration, timestep);
    while game.elapsed() < duration {
        game.tick(timestep, &mut pilot, &mut renderer);

        if game.elapsed() >= next_report {
            next_report += 1.0;
            log::info!(
                "t={:.1}s entities={} enemies={} bullets={} effects={} draws={}",
                game.elapsed(),
                game.world().len(),
                game.enemies().len(),
                game.arena().bullets.active_count(),
                game.arena().effects.active_count(),
                renderer.last_frame().len()
            );
        }
    }

    let stats = game.stats();
    log::info!(
        "Finished after {} frames: {} shots, {} aliens, {} destroyed, player {}",
        game.frame_count(),
        stats.shots_fired,
        stats.aliens_spawned,
        stats.enemies_destroyed,
        if game.player().is_some() { "alive" } else { "destroyed" }
    );
    Ok(())
}
