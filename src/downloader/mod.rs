//! Artifact downloader for bbget
//!
//! Streams a resolved release archive to disk. The Bitbucket `get/*.zip`
//! endpoints build archives on the fly, so the response often carries no
//! Content-Length; a spinner stands in for the bar in that case.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Download a release archive to a local path, returning the byte count
pub fn download_artifact(url: &str, dest: &Path) -> Result<u64> {
    log::info!("Downloading: {}", url);
    log::debug!("Destination: {}", dest.display());

    let client = reqwest::blocking::Client::builder()
        .user_agent(format!("bbget/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Failed to download from {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP {} for {}", response.status(), url);
    }

    let pb = match response.content_length() {
        Some(total) if total > 0 => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            pb
        }
        _ => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {bytes} downloaded")
                    .unwrap(),
            );
            pb
        }
    };

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    let mut file =
        File::create(dest).with_context(|| format!("Failed to create file: {}", dest.display()))?;

    let mut downloaded = 0u64;
    let mut buffer = vec![0; 8192];
    let mut reader = BufReader::new(response);

    loop {
        let n = reader.read(&mut buffer).context("Failed to read response")?;
        if n == 0 {
            break;
        }

        file.write_all(&buffer[..n])
            .context("Failed to write to file")?;

        downloaded += n as u64;
        pb.set_position(downloaded);
    }

    pb.finish_and_clear();

    log::info!("Downloaded {} bytes to {}", downloaded, dest.display());

    Ok(downloaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    #[ignore] // Requires network access
    fn test_download_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("nested").join("test.zip");

        let downloaded = download_artifact("https://httpbin.org/bytes/1024", &dest).unwrap();
        assert_eq!(downloaded, 1024);
        assert!(dest.exists());
    }
}
