//! Release data structures for bbget
//!
//! This module defines the value types produced by repository providers:
//! - `DownloadInfo`: a concrete downloadable artifact plus its version
//! - `RepoInfo`: descriptive repository metadata
//! - `Resolution`: the three-way outcome of resolving a repository URL
//!
//! All of them are plain owned values, rebuilt fresh on every resolution.

use serde::{Deserialize, Serialize};

/// Outcome of resolving a repository URL
///
/// Distinguishes "this URL is not one we understand" from "the URL is fine
/// but the repository has nothing eligible to install".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    /// The URL did not match any recognized repository shape
    NoMatch,
    /// The URL matched, but no tag survived version filtering
    NoEligibleRelease,
    /// The URL resolved to concrete data
    Found(T),
}

impl<T> Resolution<T> {
    /// True if this resolution carries data
    #[allow(dead_code)]
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    /// Extract the data, if any
    #[allow(dead_code)]
    pub fn found(self) -> Option<T> {
        match self {
            Resolution::Found(data) => Some(data),
            _ => None,
        }
    }

    /// Map the carried data, preserving the other outcomes
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Resolution::NoMatch => Resolution::NoMatch,
            Resolution::NoEligibleRelease => Resolution::NoEligibleRelease,
            Resolution::Found(data) => Resolution::Found(f(data)),
        }
    }
}

/// Resolution of a download request
pub type DownloadResolution = Resolution<DownloadInfo>;

/// Information about downloading a release of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadInfo {
    /// Version identifier of the download (tag-derived or timestamp-derived)
    pub version: String,
    /// Fully-qualified URL of a zip archive of the package
    pub url: String,
    /// Timestamp of the underlying commit, whole-second precision
    pub date: String,
}

/// General information about a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    /// Repository name
    pub name: String,
    /// Repository description, or a placeholder when the repo has none
    pub description: String,
    /// Homepage URL; falls back to the repository URL itself
    pub homepage: String,
    /// Account name of the repository owner
    pub author: String,
    /// Donation page URL for the owner
    pub donate: String,
    /// URL of the repository readme, when one exists in the branch root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    /// URL of the issue tracker, when issue tracking is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_found() {
        let resolution = Resolution::Found(42);
        assert!(resolution.is_found());
        assert_eq!(resolution.found(), Some(42));
    }

    #[test]
    fn test_resolution_empty_outcomes() {
        let no_match: Resolution<i32> = Resolution::NoMatch;
        assert!(!no_match.is_found());
        assert_eq!(no_match.found(), None);

        let no_release: Resolution<i32> = Resolution::NoEligibleRelease;
        assert!(!no_release.is_found());
        assert_eq!(no_release.found(), None);
    }

    #[test]
    fn test_resolution_map() {
        let resolution = Resolution::Found("1.0.0").map(|v| v.len());
        assert_eq!(resolution, Resolution::Found(5));

        let no_match: Resolution<&str> = Resolution::NoMatch;
        assert_eq!(no_match.map(|v| v.len()), Resolution::NoMatch);
    }

    #[test]
    fn test_repo_info_json_skips_absent_links() {
        let info = RepoInfo {
            name: "package".to_string(),
            description: "A package".to_string(),
            homepage: "https://bitbucket.org/user/package".to_string(),
            author: "user".to_string(),
            donate: "https://www.gittip.com/on/bitbucket/user/".to_string(),
            readme: None,
            issues: None,
        };

        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("readme"));
        assert!(!json.contains("issues"));
    }
}
