//! Resolve command implementation

use crate::core::{Resolution, Settings};
use crate::providers::{BitBucketProvider, RepositoryProvider};
use anyhow::Result;
use colored::Colorize;

/// Resolve repository URLs into release download information
pub fn run(urls: Vec<String>, prereleases: bool, json: bool) -> Result<()> {
    if urls.is_empty() {
        println!("{}", "No repository URLs provided".yellow());
        println!("Usage: bbget resolve <url> [<url>...]");
        println!();
        println!("Examples:");
        println!("  bbget resolve https://bitbucket.org/user/repo");
        println!("  bbget resolve https://bitbucket.org/user/repo/src/stable");
        println!("  bbget resolve 'https://bitbucket.org/user/repo/#tags'");
        return Ok(());
    }

    let mut settings = Settings::load_default()?;
    if prereleases {
        settings.install_prereleases = true;
    }

    let provider = BitBucketProvider::new(&settings)?;

    let mut unresolved = 0;

    for url in &urls {
        match resolve_one(&provider, url, json) {
            Ok(true) => {}
            Ok(false) => unresolved += 1,
            Err(e) => {
                eprintln!("{} {}: {:#}", "Error".red().bold(), url, e);
                unresolved += 1;
            }
        }
    }

    if unresolved > 0 {
        anyhow::bail!("{} of {} URL(s) could not be resolved", unresolved, urls.len());
    }

    Ok(())
}

fn resolve_one(provider: &impl RepositoryProvider, url: &str, json: bool) -> Result<bool> {
    match provider.download_info(url)? {
        Resolution::NoMatch => {
            println!(
                "{} {}: not a recognized {} repository URL",
                "Skipped".yellow(),
                url,
                provider.name()
            );
            Ok(false)
        }
        Resolution::NoEligibleRelease => {
            println!(
                "{} {}: no tag is a valid release version",
                "Skipped".yellow(),
                url
            );
            Ok(false)
        }
        Resolution::Found(info) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{} {}", "Resolved".green(), url);
                println!("  Version:  {}", info.version.bold());
                println!("  Download: {}", info.url);
                println!("  Date:     {}", info.date);
            }
            Ok(true)
        }
    }
}
