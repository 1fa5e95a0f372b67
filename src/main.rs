//! Mirror Shot entry point
//!
//! Headless native runner: the autopilot plays a seeded game at a fixed frame
//! rate and the final report is printed when it ends.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use mirror_shot::Settings;
use mirror_shot::consts::*;
use mirror_shot::renderer::{SceneSnapshot, vertex_bytes};
use mirror_shot::sim::{FinalReport, GameState, TickInput, tick};

/// Frame length of the simulated host loop
const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "mirror-shot")]
#[command(about = "Reflect a laser off mirrors to destroy falling black blocks", long_about = None)]
struct Args {
    /// RNG seed for mirror layout and spawns
    #[arg(long, default_value_t = 0xC0FFEE)]
    seed: u64,

    /// JSON settings file (missing or invalid falls back to defaults)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Stop after this many simulated seconds
    #[arg(long, default_value_t = 60.0)]
    seconds: f64,

    /// Write the final report as JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print the default settings as JSON and exit
    #[arg(long, default_value_t = false)]
    dump_settings: bool,
}

/// Host loop state
struct Game {
    state: GameState,
    accumulator: f32,
    input: TickInput,
    frames: u64,
}

impl Game {
    fn new(seed: u64, settings: Settings) -> Self {
        Self {
            state: GameState::with_settings(seed, settings),
            accumulator: 0.0,
            input: TickInput {
                idle_mode: true,
                ..Default::default()
            },
            frames: 0,
        }
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.fire = false;
            self.input.faster = false;
            self.input.slower = false;
            self.input.quit = false;
        }
        self.frames += 1;
    }

    /// Build the frame a windowed host would upload
    fn render(&self) -> usize {
        let scene = SceneSnapshot::capture(&self.state);
        let vertices = scene.build_vertices();
        vertex_bytes(&vertices).len()
    }
}

fn print_report(report: &FinalReport) {
    println!("Game over after {:.1}s (seed {})", report.seconds, report.seed);
    println!("  score:           {}", report.score);
    println!("  red collected:   {}", report.red_collected);
    println!("  green collected: {}", report.green_collected);
    println!("  black hits:      {}", report.black_hits);
    println!("  wrong hits:      {}", report.wrong_hits);
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.dump_settings {
        let json = serde_json::to_string_pretty(&Settings::default())?;
        println!("{json}");
        return Ok(());
    }

    let settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    log::info!("Mirror Shot (headless) starting, seed {}", args.seed);

    let mut game = Game::new(args.seed, settings);
    while !game.state.is_over() {
        if game.state.elapsed_secs >= args.seconds {
            game.input.quit = true;
        }
        game.update(FRAME_DT);

        if game.frames % 60 == 0 {
            let bytes = game.render();
            log::debug!(
                "t={:.1}s score={} blocks={} frame={}B",
                game.state.elapsed_secs,
                game.state.score,
                game.state.blocks.len(),
                bytes
            );
        }
    }

    let report = game.state.report();
    print_report(&report);

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json).with_context(|| format!("writing report to {}", path.display()))?;
        log::info!("Report written to {}", path.display());
    }
    Ok(())
}
