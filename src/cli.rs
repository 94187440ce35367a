//! CLI argument parsing for bbget

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bbget")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve and download package releases from Bitbucket repositories", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve repository URLs into release download information
    #[command(visible_alias = "r")]
    Resolve {
        /// Bitbucket repository URLs (can specify multiple)
        urls: Vec<String>,

        /// Count prerelease tags as installable releases
        #[arg(short, long)]
        prereleases: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show repository information
    Info {
        /// Bitbucket repository URLs (can specify multiple)
        urls: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download the latest release archive of repositories
    #[command(visible_alias = "dl")]
    Download {
        /// Bitbucket repository URLs (can specify multiple)
        urls: Vec<String>,

        /// Directory to place downloaded archives in (defaults to the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Count prerelease tags as installable releases
        #[arg(short, long)]
        prereleases: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
