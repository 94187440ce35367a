//! Base trait for repository providers

use crate::core::{DownloadResolution, RepoInfo};
use anyhow::Result;

/// Trait for repository hosting providers (Bitbucket, etc.)
pub trait RepositoryProvider {
    /// Resolve a repository URL into download information for its latest release
    ///
    /// # Arguments
    /// * `url` - Repository URL (e.g. "https://bitbucket.org/user/repo")
    ///
    /// # Returns
    /// The download resolution: `NoMatch` for URLs this provider does not
    /// recognize, `NoEligibleRelease` when the repository has no installable
    /// tag, or the concrete download data.
    fn download_info(&self, url: &str) -> Result<DownloadResolution>;

    /// Retrieve general information about a repository
    ///
    /// Returns `None` for URLs this provider does not recognize.
    fn repo_info(&self, url: &str) -> Result<Option<RepoInfo>>;

    /// Check if this provider can handle the given URL
    fn can_handle(&self, url: &str) -> bool;

    /// Get the provider name
    fn name(&self) -> &str;
}
