//! Bitbucket provider implementation
//!
//! Talks to the Bitbucket 1.0 REST API to turn repository web URLs into
//! download links and repository metadata. Three URL shapes are understood:
//!
//! - `https://bitbucket.org/{user}/{repo}` - default branch
//! - `https://bitbucket.org/{user}/{repo}/src/{branch}` - explicit branch
//! - `https://bitbucket.org/{user}/{repo}/#tags` - newest semver tag

use super::base::RepositoryProvider;
use crate::core::{version_filter, version_sort, DownloadInfo, DownloadResolution};
use crate::core::{RepoInfo, Resolution, Settings};
use crate::utils::{FetchError, FetchJson, HttpClient};
use anyhow::Result;
use chrono::NaiveDateTime;
use regex::Regex;
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

// A predefined list of readme filenames to look for
const README_FILENAMES: [&str; 9] = [
    "readme",
    "readme.txt",
    "readme.md",
    "readme.mkd",
    "readme.mdown",
    "readme.markdown",
    "readme.textile",
    "readme.creole",
    "readme.rst",
];

static TAGS_URL: OnceLock<Regex> = OnceLock::new();
static REPO_URL: OnceLock<Regex> = OnceLock::new();
static BRANCH_URL: OnceLock<Regex> = OnceLock::new();

fn tags_url_pattern() -> &'static Regex {
    TAGS_URL.get_or_init(|| {
        Regex::new(r"^https?://bitbucket\.org/([^/]+/[^#/]+)/?#tags$").unwrap()
    })
}

fn repo_url_pattern() -> &'static Regex {
    REPO_URL.get_or_init(|| Regex::new(r"^https?://bitbucket\.org/([^/]+/[^/]+)/?$").unwrap())
}

fn branch_url_pattern() -> &'static Regex {
    BRANCH_URL.get_or_init(|| {
        Regex::new(r"^https?://bitbucket\.org/([^/]+/[^/]+)/src/([^/]+)/?$").unwrap()
    })
}

/// Generate a URL for the Bitbucket API
fn make_api_url(user_repo: &str, suffix: &str) -> String {
    format!(
        "https://api.bitbucket.org/1.0/repositories/{}{}",
        user_repo, suffix
    )
}

/// Truncate an API timestamp to whole seconds
///
/// The changesets resource reports timestamps like
/// "2014-03-12 10:00:00+00:00" (hg backends) or with a `T` separator (git
/// backends). Both normalize to "YYYY-MM-DD HH:MM:SS".
fn truncate_timestamp(raw: &str) -> Option<String> {
    let head = raw.get(..19).unwrap_or(raw);

    let parsed = NaiveDateTime::parse_from_str(head, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(head, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;

    Some(parsed.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Bitbucket provider
///
/// Generic over the fetch seam so resolution logic can run against canned
/// responses in tests; production code uses the default `HttpClient`.
pub struct BitBucketProvider<F = HttpClient> {
    fetch: F,
    install_prereleases: bool,
}

impl BitBucketProvider<HttpClient> {
    /// Create a new Bitbucket provider from user settings
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            fetch: HttpClient::with_timeout(settings.http_timeout())?,
            install_prereleases: settings.install_prereleases,
        })
    }
}

impl<F: FetchJson> BitBucketProvider<F> {
    /// Create a provider on top of an existing fetcher
    #[allow(dead_code)]
    pub fn with_fetcher(fetch: F, install_prereleases: bool) -> Self {
        Self {
            fetch,
            install_prereleases,
        }
    }

    /// Fetch info about the latest commit of a repository
    ///
    /// For a `#tags` URL this is the newest tag that is a valid semver
    /// version; otherwise it is the tip of the explicit or default branch.
    fn commit_info(&self, url: &str) -> Result<Resolution<CommitInfo>> {
        let mut version = None;

        let (user_repo, commit) = if let Some(captures) = tags_url_pattern().captures(url) {
            let user_repo = captures[1].to_string();

            let tags_url = make_api_url(&user_repo, "/tags");
            let tag_map: HashMap<String, IgnoredAny> = self.fetch.fetch_json(&tags_url, false)?;

            let tags = version_filter(tag_map.into_keys(), self.install_prereleases);
            let mut tags = version_sort(tags, true);
            if tags.is_empty() {
                return Ok(Resolution::NoEligibleRelease);
            }

            let commit = tags.remove(0);
            version = Some(commit.strip_prefix('v').unwrap_or(&commit).to_string());
            (user_repo, commit)
        } else {
            match self.user_repo_branch(url)? {
                Some(pair) => pair,
                None => return Ok(Resolution::NoMatch),
            }
        };

        let changeset_url = make_api_url(&user_repo, &format!("/changesets/{}", commit));
        let changeset: ChangesetResource = self.fetch.fetch_json(&changeset_url, false)?;

        let timestamp = truncate_timestamp(&changeset.timestamp).ok_or_else(|| {
            anyhow::anyhow!(
                "Unrecognized changeset timestamp for {}: {}",
                user_repo,
                changeset.timestamp
            )
        })?;

        // No tag to derive a version from: synthesize one from the timestamp
        let version = version.unwrap_or_else(|| timestamp.replace(['-', ':', ' '], "."));

        Ok(Resolution::Found(CommitInfo {
            user_repo,
            timestamp,
            commit,
            version,
        }))
    }

    /// Extract the user/repo and branch name from a repository URL
    ///
    /// Bare repository URLs cost one extra API call to discover the default
    /// branch. Returns `None` when the URL matches neither accepted shape.
    fn user_repo_branch(&self, url: &str) -> Result<Option<(String, String)>> {
        if let Some(captures) = repo_url_pattern().captures(url) {
            let user_repo = captures[1].to_string();
            let branch = self.main_branch_name(&user_repo)?;
            return Ok(Some((user_repo, branch)));
        }

        if let Some(captures) = branch_url_pattern().captures(url) {
            return Ok(Some((captures[1].to_string(), captures[2].to_string())));
        }

        Ok(None)
    }

    /// Fetch the name of the default branch
    ///
    /// `master` for git-backed repositories, `default` for hg-backed ones.
    fn main_branch_name(&self, user_repo: &str) -> Result<String, FetchError> {
        let main_branch_url = make_api_url(user_repo, "/main-branch");
        let main_branch: MainBranchResource = self.fetch.fetch_json(&main_branch_url, true)?;
        Ok(main_branch.name)
    }

    /// Scan the branch root directory listing for a readme
    ///
    /// The first entry whose filename matches the allow-list wins; its
    /// raw-content URL is returned.
    fn readme_url(
        &self,
        user_repo: &str,
        branch: &str,
        prefer_cached: bool,
    ) -> Result<Option<String>, FetchError> {
        let listing_url = make_api_url(user_repo, &format!("/src/{}/", branch));
        let listing: DirectoryListing = self.fetch.fetch_json(&listing_url, prefer_cached)?;

        for entry in listing.files {
            if README_FILENAMES.contains(&entry.path.to_lowercase().as_str()) {
                return Ok(Some(format!(
                    "https://bitbucket.org/{}/raw/{}/{}",
                    user_repo, branch, entry.path
                )));
            }
        }

        Ok(None)
    }
}

impl<F: FetchJson> RepositoryProvider for BitBucketProvider<F> {
    fn download_info(&self, url: &str) -> Result<DownloadResolution> {
        log::debug!("Resolving download info for: {}", url);

        let resolution = self.commit_info(url)?;

        Ok(resolution.map(|commit| DownloadInfo {
            url: format!(
                "https://bitbucket.org/{}/get/{}.zip",
                commit.user_repo, commit.commit
            ),
            version: commit.version,
            date: commit.timestamp,
        }))
    }

    fn repo_info(&self, url: &str) -> Result<Option<RepoInfo>> {
        log::debug!("Fetching repository info for: {}", url);

        let Some((user_repo, branch)) = self.user_repo_branch(url)? else {
            return Ok(None);
        };

        let api_url = make_api_url(&user_repo, "");
        let info: RepoResource = self.fetch.fetch_json(&api_url, false)?;

        let issues_url = format!("https://bitbucket.org/{}/issues", user_repo);
        let donate = format!("https://www.gittip.com/on/bitbucket/{}/", info.owner);

        Ok(Some(RepoInfo {
            name: info.name,
            description: info
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "No description provided".to_string()),
            homepage: info
                .website
                .filter(|w| !w.is_empty())
                .unwrap_or_else(|| url.to_string()),
            author: info.owner,
            donate,
            readme: self.readme_url(&user_repo, &branch, false)?,
            issues: info.has_issues.then_some(issues_url),
        }))
    }

    fn can_handle(&self, url: &str) -> bool {
        tags_url_pattern().is_match(url)
            || repo_url_pattern().is_match(url)
            || branch_url_pattern().is_match(url)
    }

    fn name(&self) -> &str {
        "Bitbucket"
    }
}

/// Info about the commit a download resolves to
#[derive(Debug)]
struct CommitInfo {
    /// The user/repo identifier
    user_repo: String,
    /// Commit timestamp, whole-second precision
    timestamp: String,
    /// The branch or tag name
    commit: String,
    /// The extracted or synthesized version number
    version: String,
}

// Bitbucket API response structures

/// Repository metadata resource
#[derive(Debug, Deserialize)]
struct RepoResource {
    name: String,
    description: Option<String>,
    website: Option<String>,
    owner: String,
    has_issues: bool,
}

/// Changeset resource (only the timestamp is consumed)
#[derive(Debug, Deserialize)]
struct ChangesetResource {
    timestamp: String,
}

/// Main-branch resource
#[derive(Debug, Deserialize)]
struct MainBranchResource {
    name: String,
}

/// Root directory listing of a branch
#[derive(Debug, Deserialize)]
struct DirectoryListing {
    files: Vec<DirectoryEntry>,
}

#[derive(Debug, Deserialize)]
struct DirectoryEntry {
    path: String,
}
