//! Channel Miner headless runner
//!
//! Drives the title and game scenes with the autopilot at a fixed timestep,
//! then reports how the run went.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use channel_miner::audio::LogAudio;
use channel_miner::consts::SIM_DT;
use channel_miner::renderer::RecordingRenderer;
use channel_miner::scene::SceneManager;
use channel_miner::sim::{Autopilot, GeneratorKind, Snapshot, TickInput};
use channel_miner::{Tuning, logging};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level generator: path, pattern or rule
    #[arg(short, long, default_value_t = GeneratorKind::default())]
    generator: GeneratorKind,

    /// Seed for the level layout
    #[arg(short, long, default_value_t = channel_miner::sim::rng::DEFAULT_SEED)]
    seed: u32,

    /// Longest run to simulate, in game seconds
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,

    /// JSON file overriding the default balance
    #[arg(short, long)]
    tuning: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    #[serde(flatten)]
    snapshot: Snapshot,
    frames: u32,
    seconds: f32,
    sound_cues: usize,
    draw_commands: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.verbose);

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    log::info!("Generator: {}, seed {}", args.generator, args.seed);

    let summary = run(&args, tuning).ok_or("run never started")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let snap = &summary.snapshot;
        log::info!(
            "Finished after {:.1}s: score {}, level {}, energy {}",
            summary.seconds,
            channel_miner::round(snap.score),
            snap.level,
            channel_miner::round(snap.energy)
        );
    }
    Ok(())
}

/// Play one run from the title screen until game over or the time limit
fn run(args: &Args, tuning: Tuning) -> Option<RunSummary> {
    let mut scenes = SceneManager::new(tuning, args.generator.factory(), args.seed);
    let mut audio = LogAudio::default();
    let mut pilot = Autopilot::new();
    let max_frames = (args.seconds.max(0.0) / SIM_DT) as u32;

    // Press A until the title hands over to a run
    let start = TickInput {
        toggle_upper: true,
        ..Default::default()
    };
    while scenes.game().is_none() {
        scenes.update(&start, SIM_DT, &mut audio);
    }

    let mut frames = 0;
    while frames < max_frames {
        let game = scenes.game()?;
        if game.is_game_over() {
            break;
        }
        let input = pilot.next_input(game);
        scenes.update(&input, SIM_DT, &mut audio);
        frames += 1;
    }

    let mut renderer = RecordingRenderer::new();
    scenes.draw(&mut renderer);

    let game = scenes.game()?;
    Some(RunSummary {
        snapshot: game.snapshot(),
        frames,
        seconds: frames as f32 * SIM_DT,
        sound_cues: audio.cues_played,
        draw_commands: renderer.commands.len(),
    })
}
