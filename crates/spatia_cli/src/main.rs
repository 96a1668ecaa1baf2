//! Spatia CLI
//!
//! Replays scripted controller sessions against spatial panels and prints
//! what the panels did: selection changes, activations, haptic pulses and,
//! optionally, per-frame fades and depth moves.

mod script;
mod simulate;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use spatia_ui::UiConfig;

use crate::script::Script;
use crate::simulate::{Simulation, SimulationOptions, TraceEntry, TraceKind};

#[derive(Parser, Debug)]
#[command(name = "spatia")]
#[command(about = "Replay controller sessions against spatial panels")]
#[command(version)]
struct Cli {
    /// Verbose logging (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Panel configuration file (spatia.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a session script
    Simulate {
        /// Session script (TOML)
        script: PathBuf,

        /// Frames per second for the replay clock
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Include per-frame fades, depth moves and head distance
        #[arg(long)]
        frames: bool,

        /// Print one JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// Print the effective panel configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate {
            script,
            fps,
            frames,
            json,
        } => cmd_simulate(&script, config, fps, frames, json),
        Commands::Config => cmd_config(&config),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<UiConfig> {
    match path {
        Some(path) => {
            let config = UiConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(UiConfig::default()),
    }
}

fn cmd_simulate(path: &Path, config: UiConfig, fps: u32, frames: bool, json: bool) -> Result<()> {
    let script = Script::load(path)?;
    let options = SimulationOptions { fps, frames };
    let trace = Simulation::new(&script, config, options).run(&script);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for entry in &trace {
        if json {
            let line = serde_json::to_string(entry).context("Failed to encode trace entry")?;
            writeln!(out, "{line}")?;
        } else {
            writeln!(out, "{}", format_entry(entry))?;
        }
    }

    info!(entries = trace.len(), "replay finished");
    Ok(())
}

fn cmd_config(config: &UiConfig) -> Result<()> {
    let text = config.to_toml_string()?;
    print!("{text}");
    Ok(())
}

fn format_entry(entry: &TraceEntry) -> String {
    let detail = match &entry.kind {
        TraceKind::Selected { button: Some(button) } => format!("selected {button}"),
        TraceKind::Selected { button: None } => "selection cleared".to_string(),
        TraceKind::Activated { button } => format!("activated {button}"),
        TraceKind::Clicked { button } => format!("clicked {button}"),
        TraceKind::Haptic { pulses } => format!("haptic x{pulses}"),
        TraceKind::PanelChanged { from } => format!("panel {from:?} -> {:?}", entry.panel),
        TraceKind::Alpha { value } => format!("alpha {value:.3}"),
        TraceKind::Depth { button, offset } => format!("depth {button} {offset:+.3}"),
        TraceKind::Distance { meters } => format!("distance {meters:.3}m"),
    };
    format!("{:>8.3}s {:<6} {}", entry.at, format!("{:?}", entry.panel), detail)
}
