//! Evade entry point
//!
//! Loads configuration, picks a host and runs the frame loop.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use evade::audio::AudioManager;
use evade::platform::headless::HeadlessHost;
use evade::platform::terminal::TerminalHost;
use evade::platform::{self, RunSummary};
use evade::sim::{GameState, TickInput};
use evade::{Settings, WorldConfig};

#[derive(Parser, Debug)]
#[command(name = "evade")]
#[command(about = "Dodge the chasers, grab powerups, keep your score alive")]
struct Args {
    /// World configuration JSON (screen, speeds, spawn tables)
    #[arg(long)]
    world: Option<PathBuf>,

    /// Host settings JSON (frame rate, sound, key hold window)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Override the world seed
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a terminal and print a summary
    #[arg(long)]
    headless: bool,

    /// Frames to simulate when headless
    #[arg(long, default_value_t = 3600)]
    frames: u64,

    /// Start with the autopilot steering
    #[arg(long)]
    idle: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let filter = if args.headless { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let mut config = match &args.world {
        Some(path) => WorldConfig::load(path)?,
        None => WorldConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let settings = Settings::load(args.settings.as_deref())?;
    log::info!("Evade starting (seed {})", config.seed);

    let screen = config.screen;
    let mut state = GameState::new(config);
    let audio = AudioManager::from_settings(&settings);

    let summary = if args.headless {
        let mut host = HeadlessHost::new(TickInput {
            idle_mode: args.idle,
            ..Default::default()
        });
        platform::run(&mut state, &mut host, &audio, Some(args.frames))?
    } else {
        let mut host =
            TerminalHost::new(&settings, screen, args.idle).context("setting up the terminal")?;
        platform::run(&mut state, &mut host, &audio, None)?
    };

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("Frames:     {}", summary.frames);
    println!("Catches:    {}", summary.catches);
    println!("Powerups:   {}", summary.powerups_collected);
    println!("High score: {}", summary.high_score);
}
