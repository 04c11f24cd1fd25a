//! Alien Invaders headless driver
//!
//! Runs one match with the fixed-step game loop, feeding input from a simple
//! autopilot, and reports how it ended.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use alien_invaders::consts::{MAX_SUBSTEPS, SIM_DT};
use alien_invaders::renderer::{AsciiCanvas, render};
use alien_invaders::sim::{GamePhase, GameRng, Match, MatchSummary, Wave};
use alien_invaders::{GameConfig, TickInput};

#[derive(Parser, Debug)]
#[command(name = "alien-invaders")]
#[command(about = "Headless runner for the Alien Invaders simulation")]
struct Cli {
    /// Seed for the enemy fire and homing draws
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// JSON file overriding gameplay tunables
    #[arg(long)]
    config: Option<PathBuf>,
    /// Stop after this much simulated time
    #[arg(long, default_value_t = 600.0)]
    max_seconds: f32,
    /// Wall-clock length of one driver frame, in milliseconds
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f32,
    /// Leave the ship idle instead of letting the autopilot play
    #[arg(long)]
    no_autopilot: bool,
    /// Write the final match state as JSON
    #[arg(long)]
    dump_final: Option<PathBuf>,
    /// Print the last frame as text
    #[arg(long)]
    show_frame: bool,
}

#[derive(Serialize)]
struct FinalState<'a> {
    seed: u64,
    summary: MatchSummary,
    wave: Option<&'a Wave>,
}

/// Decide the keys to hold for the next tick
fn autopilot(game: &Match) -> TickInput {
    let mut input = TickInput::default();
    match game.phase() {
        GamePhase::Idle => input.start = true,
        GamePhase::Paused => input.resume = true,
        GamePhase::Active => {
            let Some(wave) = game.wave() else {
                return input;
            };
            let ship = wave.ship();
            let target = wave
                .aliens()
                .iter()
                .map(|(_, alien)| alien.pos.x)
                .min_by(|a, b| (a - ship.pos.x).abs().total_cmp(&(b - ship.pos.x).abs()));
            if let Some(x) = target {
                let dx = x - ship.pos.x;
                input.left = dx < -ship.step;
                input.right = dx > ship.step;
            }
            input.fire = true;
        }
        GamePhase::Spawning | GamePhase::Resuming | GamePhase::Over => {}
    }
    input
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let rng = GameRng::new(cli.seed);
    let seed = rng.seed();
    let mut game = Match::new(config, rng).context("invalid game configuration")?;
    log::info!("Alien Invaders starting (seed {seed})");

    anyhow::ensure!(cli.frame_ms > 0.0, "--frame-ms must be positive");
    let frame_dt = (cli.frame_ms / 1000.0).min(0.1);
    let mut accumulator = 0.0;
    let mut elapsed = 0.0;

    while game.phase() != GamePhase::Over && elapsed < cli.max_seconds {
        accumulator += frame_dt;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = if cli.no_autopilot {
                // Still start and acknowledge pauses so the match can end
                TickInput {
                    start: game.phase() == GamePhase::Idle,
                    resume: game.phase() == GamePhase::Paused,
                    ..Default::default()
                }
            } else {
                autopilot(&game)
            };
            game.tick(&input, SIM_DT);
            accumulator -= SIM_DT;
            elapsed += SIM_DT;
            substeps += 1;
        }
    }

    let summary = game.summary();
    log::info!("Finished after {:.1}s of simulated time", elapsed);

    if cli.show_frame {
        let config = game.config();
        let mut canvas = AsciiCanvas::new(
            80,
            35,
            glam::Vec2::new(config.game_width, config.game_height),
        );
        render(&game, &mut canvas);
        print!("{canvas}");
    }

    if let Some(path) = &cli.dump_final {
        let state = FinalState {
            seed,
            summary: summary.clone(),
            wave: game.wave(),
        };
        let encoded = serde_json::to_vec_pretty(&state)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, encoded).with_context(|| format!("failed to write {}", path.display()))?;
        println!("wrote={}", path.display());
    }

    let outcome = game.outcome().map_or("unfinished", |o| o.message());
    println!("seed={seed}");
    println!("outcome={outcome}");
    println!("score={}", summary.score);
    println!("kills={}", summary.kills);
    println!("missed={}", summary.missed_shots);
    println!("lives={}", summary.lives);
    println!("ticks={}", summary.ticks);
    Ok(())
}
