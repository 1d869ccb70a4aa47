//! Terrainator - headless session driver
//!
//! Runs a scripted walk over the planet at 60 simulated frames per second:
//! walk, look around, raise, lower, flatten, then regrow the grass. State is
//! saved to a directory store, so a second run resumes the sculpted planet.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use terrainator::core::Error;
use terrainator::core::input::{FrameInput, MovementKeys};
use terrainator::core::logging;
use terrainator::core::types::Vec2;
use terrainator::persistence::FileStore;
use terrainator::simulation::{LoadStatus, Simulation, SimulationConfig};
use terrainator::terrain::SculptMode;

const DEFAULT_STORE_DIR: &str = "terrainator-save";
const DEFAULT_FRAMES: u32 = 600;
const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Debug)]
struct Args {
    store_dir: PathBuf,
    frames: u32,
    config: Option<PathBuf>,
    seed: Option<f64>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);

    let mut store_dir = PathBuf::from(DEFAULT_STORE_DIR);
    let mut frames = DEFAULT_FRAMES;
    let mut config = None;
    let mut seed = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-s" | "--store" => {
                let v = args.next().ok_or("--store needs a directory")?;
                store_dir = PathBuf::from(v);
            }
            "-n" | "--frames" => {
                let v = args.next().ok_or("--frames needs a count")?;
                frames = v.parse().map_err(|_| format!("invalid frame count: {v}"))?;
            }
            "-c" | "--config" => {
                let v = args.next().ok_or("--config needs a file")?;
                config = Some(PathBuf::from(v));
            }
            "--seed" => {
                let v = args.next().ok_or("--seed needs a number")?;
                seed = Some(v.parse().map_err(|_| format!("invalid seed: {v}"))?);
            }
            "-h" | "--help" | "help" => {
                return Err("show_help".to_string());
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(Args { store_dir, frames, config, seed })
}

fn print_help() {
    println!("Terrainator");
    println!("===========");
    println!();
    println!("Usage: terrainator [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -s, --store <DIR>     Save directory (default: terrainator-save)");
    println!("  -n, --frames <N>      Frames to simulate (default: 600)");
    println!("  -c, --config <FILE>   JSON config overrides");
    println!("      --seed <N>        Planet seed for a fresh planet");
}

/// Scripted input for frame `frame` of `total`
fn scripted_input(frame: u32, total: u32) -> FrameInput {
    let phase = (frame as u64 * 6 / total.max(1) as u64) as u32;
    let phase_start = (phase as u64 * total as u64).div_ceil(6) as u32;
    let mut input = FrameInput {
        interacted: frame == 0,
        ..FrameInput::locked()
    };
    match phase {
        0 => {
            input.movement = MovementKeys { forward: true, ..Default::default() };
            if frame % 90 == 45 {
                input.jump = true;
            }
        }
        1 => {
            // Turn while tilting the gaze below the horizon
            input.look_delta = Vec2::new(4.0, 3.0);
            input.wheel_delta = -2.0;
        }
        2 => input.sculpt = Some(SculptMode::Raise),
        3 => input.sculpt = Some(SculptMode::Lower),
        4 => input.sculpt = Some(SculptMode::Flatten),
        _ => input.regenerate_grass = frame == phase_start,
    }
    input
}

fn run(args: &Args) -> terrainator::core::Result<()> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let store = FileStore::open(&args.store_dir)?;
    let mut sim = Simulation::new(config, store);

    if let LoadStatus::Failed(message) = sim.start() {
        return Err(Error::Generation(message.clone()));
    }

    let start = Instant::now();
    let mut sculpted_frames = 0u32;
    let mut terrain_writes = 0u32;
    let mut camera_writes = 0u32;

    for frame in 0..args.frames {
        let input = scripted_input(frame, args.frames);
        let now = start + Duration::from_secs_f32(frame as f32 * FRAME_DT);
        let report = sim.tick(&input, FRAME_DT, now);

        if report.sculpted.is_some() {
            sculpted_frames += 1;
        }
        terrain_writes += report.writes.terrain as u32;
        camera_writes += report.writes.camera as u32;
        if report.grass_regenerated {
            log::info!("Frame {}: grass regrown", frame);
        }
        if frame % 120 == 0 {
            log::debug!(
                "Frame {}: altitude {:.2}, grounded {}",
                frame,
                report.step.altitude,
                report.step.grounded
            );
        }
    }

    let flushed = sim.shutdown()?;
    let state = sim.state();
    let gains = sim.audio().gains();
    log::info!(
        "Session done: {} frames, {} sculpt ticks, brush radius {:.3}",
        sim.frames(),
        sculpted_frames,
        state.brush.radius()
    );
    log::info!(
        "Writes: {} terrain, {} camera, final flush {}",
        terrain_writes,
        camera_writes,
        flushed
    );
    log::info!(
        "Player at altitude {:.2}, sky blend {:.2}, meadow gain {:.2}",
        state.camera.position.length(),
        sim.atmosphere().state().blend,
        gains.meadow
    );
    if let Some(grass) = sim.grass().mesh() {
        log::info!("Grass: {} blades (generation {})", grass.blade_count(), sim.grass().generation());
    }
    Ok(())
}

fn main() {
    logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            if e == "show_help" {
                print_help();
                return;
            }
            eprintln!("Error: {}", e);
            print_help();
            std::process::exit(1);
        }
    };

    log::info!("Terrainator starting (store: {})", args.store_dir.display());

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
