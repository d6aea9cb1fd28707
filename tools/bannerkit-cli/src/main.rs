//! Bannerkit CLI: compose social-media banners from the command line.
//!
//! Usage:
//!   bannerkit render <IMAGE> [OPTIONS]   Compose and export a banner
//!   bannerkit preset init <FILE>         Write a default preset
//!   bannerkit preset show <FILE>         Validate and print a preset
//!   bannerkit check                      Report fonts and export formats

use clap::{Parser, Subcommand};

use bannerkit_common::config::{AppConfig, LoggingConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "bannerkit",
    about = "Compose branded social-media images",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a banner over an image and export it
    Render(commands::render::RenderArgs),

    /// Create or inspect style preset files
    #[command(subcommand)]
    Preset(commands::preset::PresetCommand),

    /// Check fonts and supported export formats
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, config_error) = match AppConfig::try_load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    bannerkit_common::logging::init_logging(&LoggingConfig {
        level,
        ..config.logging.clone()
    });
    if let Some(e) = config_error {
        tracing::warn!("{e}; using default configuration");
    }

    match cli.command {
        Commands::Render(args) => commands::render::run(args, &config),
        Commands::Preset(command) => commands::preset::run(command),
        Commands::Check => commands::check::run(&config),
    }
}
