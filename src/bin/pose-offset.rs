use std::{path::PathBuf, time::Duration};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use pose_offset::{
    animation::{OffsetAnimator, Phase},
    config::RunConfig,
    io::{export_offsets, load_pose_set, offsets_to_json},
    solve_with_settings, AnimationSettings, PivotPolicy, SolverSettings,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(name = env!("CARGO_BIN_NAME"), version)]
struct Args {
    #[clap(subcommand)]
    subcommand: Subcommand,
}

#[derive(Debug, clap::Subcommand)]
enum Subcommand {
    /// Find the offsets mapping the model pose set onto the space pose set.
    Solve {
        /// JSON file with the model poses.
        #[clap(long)]
        model: PathBuf,
        /// JSON file with the space poses.
        #[clap(long)]
        space: PathBuf,
        /// Pose equality tolerance (summed squared row distance).
        #[clap(long, default_value_t = SolverSettings::default().tolerance)]
        tolerance: f64,
        /// Fail if the first model pose is not invertible.
        #[clap(long)]
        strict: bool,
        /// Write offsets here instead of stdout.
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Same as `solve`, with inputs and settings read from a TOML file.
    Run {
        /// Path to the run config.
        config: PathBuf,
    },
    /// Print a headless preview of the animation through exported offsets.
    Animate {
        /// JSON file with offsets, as written by `solve`.
        #[clap(long)]
        offsets: PathBuf,
        /// Interpolation frames between two offsets.
        #[clap(long, default_value_t = AnimationSettings::default().frames)]
        frames: u32,
        /// Hold time on each offset, in seconds.
        #[clap(long, default_value_t = 3.0)]
        pause_secs: f64,
        /// Simulated frame rate.
        #[clap(long, default_value_t = 60.0)]
        fps: f64,
        /// How many times to go through the whole list.
        #[clap(long, default_value_t = 1)]
        cycles: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    debug!(?args);

    match args.subcommand {
        Subcommand::Solve {
            model,
            space,
            tolerance,
            strict,
            output,
        } => {
            let settings = SolverSettings {
                tolerance,
                pivot_policy: if strict {
                    PivotPolicy::Strict
                } else {
                    PivotPolicy::Lenient
                },
            };
            run_solve(model, space, settings, output)
        }
        Subcommand::Run { config } => {
            let config = RunConfig::new(&config)?;
            let settings = config.solver_settings();
            run_solve(config.model, config.space, settings, config.output)
        }
        Subcommand::Animate {
            offsets,
            frames,
            pause_secs,
            fps,
            cycles,
        } => {
            let settings = AnimationSettings {
                frames,
                pause: Duration::try_from_secs_f64(pause_secs)
                    .with_context(|| format!("invalid pause {pause_secs}"))?,
            };
            run_animate(offsets, settings, frame_step(fps)?, cycles)
        }
    }
}

/// Simulated time between two frames. Must be non-zero, or a pause never
/// elapses.
fn frame_step(fps: f64) -> Result<Duration> {
    ensure!(
        fps.is_finite() && fps > 0.0,
        "fps must be positive and finite, got {fps}"
    );
    let dt = Duration::from_secs_f64(1.0 / fps);
    ensure!(!dt.is_zero(), "fps {fps} is too high to simulate");
    Ok(dt)
}

fn run_solve(
    model: PathBuf,
    space: PathBuf,
    settings: SolverSettings,
    output: Option<PathBuf>,
) -> Result<()> {
    let model = load_pose_set(&model)?;
    let space = load_pose_set(&space)?;
    let result = solve_with_settings(&model, &space, settings)?;
    info!(
        "found {} offsets ({} candidates, {} model poses, {} space poses)",
        result.len(),
        result.candidates_evaluated,
        model.len(),
        space.len()
    );
    for (offset, source) in result.offsets.iter().zip(&result.sources) {
        debug!(source, position = ?offset.position(), "accepted offset");
    }

    match output {
        Some(path) => {
            export_offsets(&path, &result.offsets)?;
            info!("offsets written to {}", path.display());
        }
        None => println!("{}", offsets_to_json(&result.offsets)?),
    }
    Ok(())
}

fn run_animate(
    offsets: PathBuf,
    settings: AnimationSettings,
    dt: Duration,
    cycles: usize,
) -> Result<()> {
    let offsets = load_pose_set(&offsets)?.into_inner();
    let legs = offsets.len() * cycles;
    let mut animator = OffsetAnimator::new(offsets, settings)?;

    while animator.completed_legs() < legs {
        let holding = matches!(animator.phase(), Phase::Pausing { .. });
        let before = animator.completed_legs();
        let pose = animator.tick(dt);
        if animator.completed_legs() == legs || (holding && animator.completed_legs() == before) {
            continue;
        }
        let p = pose.position();
        println!(
            "{:>3} -> {:<3} [{:.4}, {:.4}, {:.4}]",
            animator.current_index(),
            animator.next_index(),
            p.x,
            p.y,
            p.z
        );
    }
    Ok(())
}
