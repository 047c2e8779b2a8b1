#![deny(unsafe_code)]
//! CLI binary for the aurora field synthesis engine.
//!
//! Subcommands:
//! - `animate <generator>` — sample a frame sequence, write a looping GIF
//! - `render <generator>` — sample a single frame, write a PNG
//! - `list` — print available generators and colormaps

mod error;

use aurora_core::sequencer::{FrameSchedule, FrameSequencer};
use aurora_core::ParticleGenerator;
use aurora_oval::SpiralParticles;
use aurora_pipeline::animate::{write_gif, FrameRenderer};
use aurora_pipeline::background::Backdrop;
use aurora_pipeline::colormap::Colormap;
use aurora_pipeline::snapshot::write_rgba_png;
use aurora_pipeline::GeneratorKind;
use clap::{Args, Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process;

/// Display range fields are normalized into before colormapping.
const DISPLAY_RANGE: (f64, f64) = (-1.0, 1.0);

#[derive(Parser)]
#[command(name = "aurora", about = "Aurora intensity field synthesis CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Flags shared by `animate` and `render`.
#[derive(Args)]
struct SceneArgs {
    /// Generator name (harmonic, perlin, oval).
    generator: String,

    /// Raster width in pixels (and grid columns).
    #[arg(short = 'W', long, default_value_t = 800)]
    width: usize,

    /// Raster height in pixels (and grid rows).
    #[arg(short = 'H', long, default_value_t = 300)]
    height: usize,

    /// Lower x bound; defaults per generator.
    #[arg(long)]
    x_min: Option<f64>,

    /// Upper x bound; defaults per generator.
    #[arg(long)]
    x_max: Option<f64>,

    /// Lower y bound; defaults per generator.
    #[arg(long)]
    y_min: Option<f64>,

    /// Upper y bound; defaults per generator.
    #[arg(long)]
    y_max: Option<f64>,

    /// Noise seed for deterministic output (perlin only).
    #[arg(long, default_value_t = 42)]
    seed: u32,

    /// Colormap name (plasma, viridis, inferno, magma, aurora).
    #[arg(short, long, default_value = "plasma")]
    colormap: String,

    /// Field overlay opacity in [0, 1].
    #[arg(long, default_value_t = 1.0)]
    alpha: f64,

    /// Background image composited beneath the field.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Generator parameters as a JSON string.
    #[arg(long, default_value = "{}")]
    params: String,
}

#[derive(Subcommand)]
enum Command {
    /// Sample a frame sequence and write a looping animated GIF.
    Animate {
        #[command(flatten)]
        scene: SceneArgs,

        /// Number of frames.
        #[arg(short, long, default_value_t = 200)]
        frames: usize,

        /// Time step between frames.
        #[arg(long, default_value_t = 0.5)]
        step: f64,

        /// Playback rate in frames per second.
        #[arg(long, default_value_t = 20)]
        fps: u32,

        /// Overlay N spiral particles (oval generator only).
        #[arg(long)]
        particles: Option<usize>,

        /// Output file path.
        #[arg(short, long, default_value = "aurora.gif")]
        output: PathBuf,
    },
    /// Sample one frame and write a PNG snapshot.
    Render {
        #[command(flatten)]
        scene: SceneArgs,

        /// The time to sample the field at.
        #[arg(short, long, default_value_t = 0.0)]
        time: f64,

        /// Output file path.
        #[arg(short, long, default_value = "aurora.png")]
        output: PathBuf,
    },
    /// List available generators and colormaps.
    List,
}

/// Everything `animate` and `render` need, resolved from [`SceneArgs`].
struct Scene {
    generator: GeneratorKind,
    grid: aurora_core::Grid,
    renderer: FrameRenderer,
}

fn build_scene(args: &SceneArgs) -> Result<Scene, CliError> {
    let params: serde_json::Value = serde_json::from_str(&args.params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

    let colormap =
        Colormap::from_name(&args.colormap).map_err(|e| CliError::Input(e.to_string()))?;

    let generator = GeneratorKind::from_name(&args.generator, args.seed, &params)?;

    let ((dx_lo, dx_hi), (dy_lo, dy_hi)) = generator.default_domain();
    let x_range = (args.x_min.unwrap_or(dx_lo), args.x_max.unwrap_or(dx_hi));
    let y_range = (args.y_min.unwrap_or(dy_lo), args.y_max.unwrap_or(dy_hi));

    let grid = aurora_core::Grid::new(x_range, y_range, args.width, args.height)?;

    let mut renderer = FrameRenderer::new(
        args.width,
        args.height,
        DISPLAY_RANGE,
        colormap,
        y_range,
    )
    .with_alpha(args.alpha);
    if let Some(path) = &args.background {
        let backdrop = Backdrop::load(path)?;
        renderer = renderer.with_backdrop(&backdrop)?;
    }

    Ok(Scene {
        generator,
        grid,
        renderer,
    })
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let generators = GeneratorKind::list_generators();
            let colormaps = Colormap::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "generators": generators,
                    "colormaps": colormaps,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Generators:");
                for name in generators {
                    println!("  {name}");
                }
                println!("Colormaps:");
                println!("  {}", colormaps.join(", "));
            }
        }
        Command::Animate {
            scene,
            frames,
            step,
            fps,
            particles,
            output,
        } => {
            let particle_gen = match particles {
                Some(n) => {
                    if scene.generator != "oval" {
                        return Err(CliError::Input(
                            "--particles only applies to the oval generator".into(),
                        ));
                    }
                    Some(SpiralParticles::with_defaults(n)?)
                }
                None => None,
            };

            let built = build_scene(&scene)?;
            let schedule = FrameSchedule::new(0.0, step, frames)?;
            let mut sequencer =
                FrameSequencer::new(&built.grid, &built.generator, schedule, DISPLAY_RANGE)?;
            if let Some(p) = &particle_gen {
                sequencer = sequencer.with_particles(p as &dyn ParticleGenerator);
            }

            log::info!(
                "animating {} ({}x{}, {frames} frames, step {step})",
                scene.generator,
                scene.width,
                scene.height
            );
            let written = write_gif(sequencer, &built.renderer, fps, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "generator": scene.generator,
                    "width": scene.width,
                    "height": scene.height,
                    "frames": written,
                    "step": step,
                    "fps": fps,
                    "seed": scene.seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "animated {} ({}x{}, {written} frames, step {step}) -> {}",
                    scene.generator,
                    scene.width,
                    scene.height,
                    output.display()
                );
            }
        }
        Command::Render {
            scene,
            time,
            output,
        } => {
            let built = build_scene(&scene)?;
            // A one-frame schedule starting at the requested time.
            let schedule = FrameSchedule::new(time, 1.0, 1)?;
            let mut sequencer =
                FrameSequencer::new(&built.grid, &built.generator, schedule, DISPLAY_RANGE)?;
            let frame = sequencer
                .next()
                .ok_or_else(|| CliError::Input("empty frame schedule".into()))??;

            let rgba = built.renderer.render(&frame)?;
            write_rgba_png(rgba, scene.width, scene.height, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "generator": scene.generator,
                    "width": scene.width,
                    "height": scene.height,
                    "time": time,
                    "seed": scene.seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, t = {time}) -> {}",
                    scene.generator,
                    scene.width,
                    scene.height,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
