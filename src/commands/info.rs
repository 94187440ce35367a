//! Info command implementation
//!
//! Shows repository metadata (description, homepage, readme, issue tracker)
//! for Bitbucket repository URLs.

use crate::core::Settings;
use crate::providers::{BitBucketProvider, RepositoryProvider};
use anyhow::Result;
use colored::Colorize;

/// Show repository information
pub fn run(urls: Vec<String>, json: bool) -> Result<()> {
    if urls.is_empty() {
        println!("{}", "No repository URLs provided".yellow());
        println!("Usage: bbget info <url> [<url>...]");
        println!();
        println!("Examples:");
        println!("  bbget info https://bitbucket.org/user/repo");
        println!("  bbget info https://bitbucket.org/user/repo/src/stable");
        return Ok(());
    }

    let settings = Settings::load_default()?;
    let provider = BitBucketProvider::new(&settings)?;

    let mut shown = 0;
    let mut failed = 0;

    for url in &urls {
        match provider.repo_info(url) {
            Ok(Some(info)) => {
                if shown > 0 && !json {
                    println!();
                    println!("{}", "─".repeat(60));
                    println!();
                }

                if json {
                    println!("{}", serde_json::to_string_pretty(&info)?);
                } else {
                    println!("{} {}", "Name:".bold(), info.name);
                    println!("{} {}", "Author:".bold(), info.author);
                    println!("{} {}", "Description:".bold(), info.description);
                    println!("{} {}", "Homepage:".bold(), info.homepage);
                    if let Some(readme) = &info.readme {
                        println!("{} {}", "Readme:".bold(), readme);
                    }
                    if let Some(issues) = &info.issues {
                        println!("{} {}", "Issues:".bold(), issues);
                    }
                    println!("{} {}", "Donate:".bold(), info.donate);
                }
                shown += 1;
            }
            Ok(None) => {
                eprintln!(
                    "{} {}: not a recognized {} repository URL",
                    "Error".red().bold(),
                    url,
                    provider.name()
                );
                failed += 1;
            }
            Err(e) => {
                eprintln!("{} {}: {:#}", "Error".red().bold(), url, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} URL(s) could not be queried", failed, urls.len());
    }

    Ok(())
}
