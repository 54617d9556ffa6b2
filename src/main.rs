//! Air-canvas replay tool: renders a recorded hand-landmark session to a PNG.

use air_canvas::app::{ReplayApp, ReplayScript};
use air_canvas::config::Config;
use anyhow::Result;
use clap::Parser;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Recorded landmark script (YAML) to replay
    #[arg(short, long)]
    input: String,

    /// Output PNG path for the rendered canvas
    #[arg(short, long, default_value = "canvas.png")]
    output: String,

    /// Canvas width override (source video native resolution)
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height override
    #[arg(long)]
    height: Option<u32>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Air Canvas - gesture drawing replay");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {e}. Using defaults.");
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(width) = args.width {
        config.canvas.width = width;
    }
    if let Some(height) = args.height {
        config.canvas.height = height;
    }

    let script = ReplayScript::from_file(&args.input)?;

    let mut app = ReplayApp::new(config)?;
    app.run(&script)?;
    app.save(&args.output)?;

    info!("Done");
    Ok(())
}
