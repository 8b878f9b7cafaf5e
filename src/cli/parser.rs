use clap::{Parser, Subcommand};

/// Command-line interface definition for floormap
/// CLI application to resolve a staff directory onto a floor plan and
/// render display maps
#[derive(Parser)]
#[command(
    name = "floormap",
    version = env!("CARGO_PKG_VERSION"),
    about = "Resolve a positioned staff directory and render interactive and TV-display maps",
    long_about = None
)]
pub struct Cli {
    /// Override the data directory (useful for tests or custom layouts)
    #[arg(global = true, long = "data-dir")]
    pub data_dir: Option<String>,

    /// Override the output directory
    #[arg(global = true, long = "output-dir")]
    pub output_dir: Option<String>,

    /// Run date (YYYY-MM-DD); all date-based decisions use this single
    /// value. Defaults to today.
    #[arg(global = true, long = "date")]
    pub date: Option<String>,

    /// Fix the RNG seed so message-asset text choice is reproducible
    #[arg(global = true, long = "seed")]
    pub seed: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and data directory skeleton
    Init,

    /// Run the full pipeline: resolve the directory, write the interactive
    /// document and the TV images
    Generate {
        /// Render only this unit's TV image (default: all staff + one per unit)
        #[arg(long)]
        unit: Option<String>,

        /// Skip the TV raster images
        #[arg(long = "skip-tv")]
        skip_tv: bool,

        /// Skip the interactive document
        #[arg(long = "skip-document")]
        skip_document: bool,
    },

    /// Resolve matching and overrides only, print the directory as JSON
    Resolve {
        #[arg(long, help = "Pretty-print the JSON output")]
        pretty: bool,
    },

    /// List discovered events and which are active on the run date
    Events,

    /// Exit 0 if a display override is active for the run date, 1 otherwise
    Check,
}
