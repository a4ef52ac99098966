use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "releasepost")]
#[command(about = "CLI tool for identifying media releases and assembling catalog-backed posts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify a release, match it in the catalog and print the post
    Post {
        /// Path (or bare name) of the video file
        file: PathBuf,

        /// Caption the file was shared with
        #[arg(long)]
        caption: Option<String>,

        /// File size in bytes (defaults to the size on disk)
        #[arg(long)]
        size: Option<u64>,

        /// Read track data from a MediaInfo JSON dump instead of probing
        #[arg(long)]
        mediainfo: Option<PathBuf>,

        /// Skip the mediainfo probe
        #[arg(long)]
        no_probe: bool,

        /// Link to a published synopsis article
        #[arg(long)]
        synopsis_url: Option<String>,

        /// Output the post record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build posts for every video file under a directory
    PostAll {
        /// Directory to scan
        dir: PathBuf,

        /// Caption applied to every file
        #[arg(long)]
        caption: Option<String>,

        /// Skip the mediainfo probe
        #[arg(long)]
        no_probe: bool,
    },

    /// Print the identity guess for a file name
    Identify {
        /// Path (or bare name) of the video file
        file: PathBuf,

        /// Caption the file was shared with
        #[arg(long)]
        caption: Option<String>,
    },

    /// Show resolution and audio/subtitle languages of a file
    Tracks {
        /// Path to the video file
        file: PathBuf,

        /// Read track data from a MediaInfo JSON dump instead of probing
        #[arg(long)]
        mediainfo: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List available post template placeholders
    Fields,

    /// Create a config file interactively
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}
