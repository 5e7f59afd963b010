//! Teleport Dodge entry point
//!
//! Loads settings, sets up the terminal and runs the game loop.

use std::fs::File;
use std::io::{self, BufWriter, stdout};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use env_logger::Target;

use teleport_dodge::input::MovementMode;
use teleport_dodge::platform::SystemClock;
use teleport_dodge::platform::terminal::{TerminalCanvas, TerminalEvents, TerminalSession};
use teleport_dodge::sim::CollisionPolicy;
use teleport_dodge::{Game, Settings, game};

/// Dodge enemy fire, grow your teleporter, blink into enemies to destroy them.
///
/// W/A/S/D or arrows move, Space holds the teleporter size, R restarts and
/// Q quits after a game over.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Run seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// Keep moving while movement keys are held
    #[arg(long)]
    held_keys: bool,
    /// Destroy every enemy inside the teleporter, not just the first
    #[arg(long)]
    exhaustive_collisions: bool,
    /// Frame cap, 0 for uncapped
    #[arg(long)]
    max_fps: Option<u32>,
    /// Write logs here (filtered by RUST_LOG); discarded otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> Settings {
        let mut settings = self
            .settings
            .as_deref()
            .map(Settings::load)
            .unwrap_or_default();

        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if self.held_keys {
            settings.movement_mode = MovementMode::Held;
        }
        if self.exhaustive_collisions {
            settings.collision_policy = CollisionPolicy::Exhaustive;
        }
        if let Some(max_fps) = self.max_fps {
            settings.max_fps = max_fps;
        }
        settings
    }
}

/// Where log lines go. Never the terminal, which the game owns.
fn log_target(path: Option<&Path>) -> anyhow::Result<Target> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            Ok(Target::Pipe(Box::new(file)))
        }
        None => Ok(Target::Pipe(Box::new(io::sink()))),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_default_env()
        .target(log_target(cli.log_file.as_deref())?)
        .init();
    let settings = cli.settings();
    log::info!("Teleport Dodge starting...");
    log::debug!("{:?}", settings);

    let mut game = Game::new(&settings);

    let mut out = BufWriter::new(stdout());
    let session = TerminalSession::enter(&mut out).context("failed to set up terminal")?;
    let mut events = TerminalEvents::new(session.keyboard_enhanced());
    let mut canvas = TerminalCanvas::fullscreen(out).context("failed to size terminal")?;

    let result = game::run(
        &mut game,
        &mut events,
        &mut canvas,
        &SystemClock::new(),
        settings.frame_interval_ms(),
    );

    // Restore the terminal before reporting anything
    drop(canvas);
    drop(session);

    result.context("game loop failed")?;
    println!("Thanks for playing Teleport Dodge! (seed {})", game.state.seed);
    Ok(())
}
