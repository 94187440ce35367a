//! Download command implementation
//!
//! Resolves repository URLs and streams the release archives to disk.

use crate::core::{Resolution, Settings};
use crate::downloader;
use crate::providers::{BitBucketProvider, RepositoryProvider};
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Download the latest release archive for repository URLs
pub fn run(urls: Vec<String>, output: Option<PathBuf>, prereleases: bool) -> Result<()> {
    if urls.is_empty() {
        println!("{}", "No repository URLs provided".yellow());
        println!("Usage: bbget download <url> [<url>...] [-o DIR]");
        return Ok(());
    }

    let mut settings = Settings::load_default()?;
    if prereleases {
        settings.install_prereleases = true;
    }

    let provider = BitBucketProvider::new(&settings)?;
    let dest_dir = output.unwrap_or_else(|| PathBuf::from("."));

    let mut downloaded = 0;
    let mut failed = 0;

    for url in &urls {
        if !provider.can_handle(url) {
            eprintln!(
                "{} {}: not a recognized {} repository URL",
                "Error".red().bold(),
                url,
                provider.name()
            );
            failed += 1;
            continue;
        }

        match download_one(&provider, url, &dest_dir) {
            Ok(true) => downloaded += 1,
            Ok(false) => failed += 1,
            Err(e) => {
                eprintln!("{} {}: {:#}", "Error".red().bold(), url, e);
                failed += 1;
            }
        }
    }

    if downloaded > 0 {
        println!();
        println!(
            "{}",
            format!("Downloaded {} archive(s)", downloaded).green().bold()
        );
    }

    if failed > 0 {
        anyhow::bail!("{} of {} URL(s) failed", failed, urls.len());
    }

    Ok(())
}

fn download_one(
    provider: &impl RepositoryProvider,
    url: &str,
    dest_dir: &std::path::Path,
) -> Result<bool> {
    match provider.download_info(url)? {
        Resolution::NoMatch => {
            // can_handle passed but the provider disagreed; treat as failure
            eprintln!("{} {}: no matching URL shape", "Error".red().bold(), url);
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
            let dest = dest_dir.join(artifact_file_name(&info.url, &info.version));
            let bytes = downloader::download_artifact(&info.url, &dest)?;

            println!(
                "{} {} v{} ({} bytes) -> {}",
                "Downloaded".green(),
                url,
                info.version.bold(),
                bytes,
                dest.display()
            );
            Ok(true)
        }
    }
}

/// Build a local file name for a release archive
///
/// The repository name is taken from the download URL
/// (`https://bitbucket.org/{user}/{repo}/get/{commit}.zip`).
fn artifact_file_name(download_url: &str, version: &str) -> String {
    let repo = download_url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .split('/')
        .nth(2)
        .filter(|segment| !segment.is_empty())
        .unwrap_or("package");

    format!("{}-{}.zip", repo, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_file_name() {
        assert_eq!(
            artifact_file_name("https://bitbucket.org/user/repo/get/v2.0.0.zip", "2.0.0"),
            "repo-2.0.0.zip"
        );
        assert_eq!(
            artifact_file_name(
                "https://bitbucket.org/user/repo/get/default.zip",
                "2013.10.05.22.15.30"
            ),
            "repo-2013.10.05.22.15.30.zip"
        );
    }

    #[test]
    fn test_artifact_file_name_fallback() {
        assert_eq!(artifact_file_name("garbage", "1.0.0"), "package-1.0.0.zip");
    }
}
