//! Headless Maze Runner
//!
//! Run with: `cargo run --bin maze_runner -- --ticks 600 --script forward`
//!
//! Loads a maze (the built-in layout unless `--maze` is given), starts a
//! session and drives it with a scripted input sequence, logging every event.
//! Useful for checking authored mazes and config files without a window.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use maze_runner_engine::game::{GameConfig, GameSession, HudView, MazeWorld, SessionEvent};
use maze_runner_engine::input::{KeyCode, KeyboardState};

/// Scripted input sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Script {
    /// Never press anything after starting
    Idle,
    /// Hold forward the whole run
    Forward,
    /// Enter ghost mode on the second tick and fly forward
    Ghost,
}

#[derive(Parser, Debug)]
#[command(name = "maze_runner")]
#[command(about = "Run a headless maze session and report what happened")]
struct Args {
    /// Maze file (one row of digit codes per line)
    #[arg(long)]
    maze: Option<PathBuf>,

    /// JSON config file; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Print every placement record as JSON and exit
    #[arg(long)]
    dump_placements: bool,

    /// Input script to drive the session with
    #[arg(long, value_enum, default_value_t = Script::Forward)]
    script: Script,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("maze_runner=info,maze_runner_engine=info")
                }),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let world = match &args.maze {
        Some(path) => MazeWorld::load(path, &config)?,
        None => MazeWorld::builtin(&config)?,
    };

    if args.dump_placements {
        for record in world.placements() {
            println!("{}", serde_json::to_string(record)?);
        }
        return Ok(());
    }

    let mut session = GameSession::new(world, config);
    let mut keyboard = KeyboardState::new();

    keyboard.handle_key(KeyCode::Enter, true);
    keyboard.handle_key(KeyCode::Enter, false);
    if args.script == Script::Forward {
        keyboard.handle_key(KeyCode::W, true);
    }

    for tick in 0..args.ticks {
        if args.script == Script::Ghost && tick == 1 {
            keyboard.handle_key(KeyCode::G, true);
            keyboard.handle_key(KeyCode::G, false);
            keyboard.handle_key(KeyCode::W, true);
        }

        let input = keyboard.snapshot();
        let report = session.tick(&input, args.dt);
        for event in &report.events {
            match event {
                SessionEvent::Collided(collision) => {
                    tracing::info!(tick, "{}", collision.message)
                }
                SessionEvent::Won { elapsed } => tracing::info!(tick, elapsed, "goal reached"),
                other => tracing::debug!(tick, event = ?other, "session event"),
            }
        }
        if session.state().is_won() {
            break;
        }
    }

    let (player, agents) = session.actor_positions();
    let frame = session.render_frame();
    tracing::info!(
        player = ?player,
        agents = agents.len(),
        eye = ?frame.view.inverse().w_axis.truncate(),
        "final positions"
    );
    println!("{}", HudView::from_session(&session));
    Ok(())
}
