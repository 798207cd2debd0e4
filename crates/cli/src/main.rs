#![deny(unsafe_code)]
//! CLI binary for the particle field.
//!
//! Subcommands:
//! - `render` — build a field, step it N times, write a PNG
//! - `replay <seed.json>` — re-render a saved seed
//! - `list` — print available palettes

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use particle_field_core::{Color, Palette, Seed};
use particle_field_raster::{render_seed, snapshot, DEFAULT_BACKGROUND};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "particle-field", about = "Interactive particle field renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Step a field N times and write a PNG snapshot.
    Render {
        /// Plane width in pixels.
        #[arg(short = 'W', long, default_value_t = 1280)]
        width: usize,

        /// Plane height in pixels.
        #[arg(short = 'H', long, default_value_t = 720)]
        height: usize,

        /// Number of simulation steps.
        #[arg(short, long, default_value_t = 120)]
        steps: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Palette name (overrides any `palette` key in --params).
        #[arg(short, long)]
        palette: Option<String>,

        /// Pointer position held for every step, as `x,y`.
        #[arg(long, value_parser = parse_pointer, allow_hyphen_values = true)]
        pointer: Option<[f64; 2]>,

        /// Background color (hex or rgba()).
        #[arg(long)]
        background: Option<String>,

        /// Output file path.
        #[arg(short, long, default_value = "field.png")]
        output: PathBuf,

        /// Also save the replay seed as JSON to this path.
        #[arg(long)]
        save_seed: Option<PathBuf>,

        /// Field parameters as a JSON string (`palette`, `colors`, `density`).
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Re-render a seed file written by `render --save-seed`.
    Replay {
        /// Seed JSON file.
        seed_file: PathBuf,

        /// Background color (hex or rgba()).
        #[arg(long)]
        background: Option<String>,

        /// Output file path.
        #[arg(short, long, default_value = "field.png")]
        output: PathBuf,
    },
    /// List available palettes.
    List,
}

/// Parses `x,y` into a pointer position.
fn parse_pointer(s: &str) -> Result<[f64; 2], String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got {s:?}"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate {v:?}: {e}"))
    };
    Ok([coord(x)?, coord(y)?])
}

fn parse_background(background: Option<&str>) -> Result<Color, CliError> {
    background.map_or(Ok(DEFAULT_BACKGROUND), |b| {
        Color::parse(b).map_err(|e| CliError::Input(e.to_string()))
    })
}

fn render_to(seed: &Seed, background: Color, output: &Path) -> Result<(), CliError> {
    let surface = render_seed(seed, background)?;
    snapshot::write_png(&surface, output)?;
    Ok(())
}

fn report(json: bool, seed: &Seed, output: &Path) -> Result<(), CliError> {
    if json {
        let info = serde_json::json!({
            "seed": seed,
            "output": output.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!(
            "rendered {}x{} ({} steps, seed {}) -> {}",
            seed.width,
            seed.height,
            seed.steps,
            seed.seed,
            output.display()
        );
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let palettes = Palette::list_names();
            if cli.json {
                let info = serde_json::json!({ "palettes": palettes });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Palettes:");
                for name in palettes {
                    println!("  {name}");
                }
            }
        }
        Command::Render {
            width,
            height,
            steps,
            seed,
            palette,
            pointer,
            background,
            output,
            save_seed,
            params,
        } => {
            let mut params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            if let Some(name) = palette {
                let obj = params
                    .as_object_mut()
                    .ok_or_else(|| CliError::Input("--params must be a JSON object".into()))?;
                obj.insert("palette".into(), serde_json::Value::String(name));
            }

            let mut replay = Seed::new(width, height, seed);
            replay.steps = steps;
            replay.params = params;
            if let Some(pointer) = pointer {
                replay.pointer = pointer;
            }

            let background = parse_background(background.as_deref())?;
            render_to(&replay, background, &output)?;

            if let Some(path) = save_seed {
                std::fs::write(&path, serde_json::to_string_pretty(&replay)?)?;
                log::info!("saved seed to {}", path.display());
            }
            report(cli.json, &replay, &output)?;
        }
        Command::Replay {
            seed_file,
            background,
            output,
        } => {
            let text = std::fs::read_to_string(&seed_file)?;
            let replay: Seed = serde_json::from_str(&text).map_err(|e| {
                CliError::Input(format!("invalid seed file {}: {e}", seed_file.display()))
            })?;
            let background = parse_background(background.as_deref())?;
            render_to(&replay, background, &output)?;
            report(cli.json, &replay, &output)?;
        }
    }

    Ok(())
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

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
