// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use composing_camera::backends::camera::Facing;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "composing-camera")]
#[command(about = "Composition-guide camera with gallery persistence and editor handoff")]
#[command(version = composing_camera::constants::app_version())]
struct Cli {
    /// Photo directory (default: ~/Pictures/composing-camera)
    #[arg(long, global = true, visible_alias = "output-dir")]
    photo_dir: Option<PathBuf>,

    /// Per-stage timeout in milliseconds (0 disables the bound)
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List composition overlays
    Overlays {
        /// Overlay ids to toggle on before listing
        #[arg(short, long)]
        active: Vec<String>,
    },

    /// List virtual cameras and their capture formats
    List {
        /// Image served by the virtual camera
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Take a photo
    Photo {
        /// Image served by the virtual camera
        #[arg(short, long)]
        source: PathBuf,

        /// Camera facing to bind
        #[arg(short, long, default_value = "back")]
        facing: Facing,

        /// Open the photo in an editor afterwards (default editor if no id is given)
        #[arg(long, num_args = 0..=1)]
        open: Option<Option<String>>,
    },

    /// Print the effective configuration as JSON
    Config,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=composing_camera=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let mut config = composing_camera::Config::default();
    if let Some(dir) = cli.photo_dir {
        config.photo_directory = Some(dir);
    }
    if let Some(ms) = cli.timeout_ms {
        config.stage_timeout_ms = (ms > 0).then_some(ms);
    }

    match cli.command {
        Commands::Overlays { active } => cli::list_overlays(&active),
        Commands::List { source } => cli::list_cameras(source),
        Commands::Photo {
            source,
            facing,
            open,
        } => {
            config.facing = facing;
            cli::take_photo(config, source, open)
        }
        Commands::Config => cli::print_config(&config),
    }
}
