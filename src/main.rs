//! bbget - resolve and download package releases from Bitbucket repositories

mod cli;
mod commands;
mod core;
mod downloader;
mod providers;
mod utils;

use cli::{Cli, Commands};
use colored::Colorize;

fn main() {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Set verbose logging if requested
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    // Run the appropriate command
    let result = match cli.command {
        Commands::Resolve {
            urls,
            prereleases,
            json,
        } => commands::run_resolve(urls, prereleases, json),

        Commands::Info { urls, json } => commands::run_info(urls, json),

        Commands::Download {
            urls,
            output,
            prereleases,
        } => commands::run_download(urls, output, prereleases),
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
