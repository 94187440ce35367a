//! Semantic version filtering and ordering for tag names
//!
//! Bitbucket tags carry arbitrary names; only the ones that parse as
//! semantic versions (with or without a leading `v`) are release candidates.

use semver::Version;

/// Parse a tag name as a semantic version
///
/// A leading `v` is stripped before parsing (e.g. "v1.2.0" -> 1.2.0).
/// Returns `None` for names that are not valid semantic versions.
pub fn parse_version(name: &str) -> Option<Version> {
    let trimmed = name.strip_prefix('v').unwrap_or(name);
    Version::parse(trimmed).ok()
}

/// Keep only the names that parse as semantic versions
///
/// Prerelease versions (e.g. "1.0.0-beta.1") are dropped unless
/// `include_prereleases` is set.
pub fn version_filter<I>(names: I, include_prereleases: bool) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    names
        .into_iter()
        .filter(|name| match parse_version(name) {
            Some(version) => include_prereleases || version.pre.is_empty(),
            None => false,
        })
        .collect()
}

/// Order names by their semantic version, dropping unparseable ones
///
/// The sort is stable, so names mapping to the same version keep their
/// relative order. With `reverse` the highest version comes first.
pub fn version_sort<I>(names: I, reverse: bool) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed: Vec<(Version, String)> = names
        .into_iter()
        .filter_map(|name| parse_version(&name).map(|version| (version, name)))
        .collect();

    parsed.sort_by(|a, b| a.0.cmp(&b.0));

    if reverse {
        parsed.reverse();
    }

    parsed.into_iter().map(|(_, name)| name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version() {
        assert_eq!(parse_version("1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(parse_version("v1.2.3"), Some(Version::new(1, 2, 3)));
        assert!(parse_version("not-a-version").is_none());
        assert!(parse_version("tip").is_none());
    }

    #[test]
    fn test_filter_drops_non_versions() {
        let names = vec![
            "v1.0.0".to_string(),
            "tip".to_string(),
            "release-notes".to_string(),
            "2.1.0".to_string(),
        ];

        let filtered = version_filter(names, false);
        assert_eq!(filtered, vec!["v1.0.0", "2.1.0"]);
    }

    #[test]
    fn test_filter_prereleases() {
        let names = vec!["v1.0.0".to_string(), "v2.0.0-beta.1".to_string()];

        let stable = version_filter(names.clone(), false);
        assert_eq!(stable, vec!["v1.0.0"]);

        let all = version_filter(names, true);
        assert_eq!(all, vec!["v1.0.0", "v2.0.0-beta.1"]);
    }

    #[test]
    fn test_sort_descending() {
        let names = vec![
            "v1.0.0".to_string(),
            "v2.0.0".to_string(),
            "v1.5.0".to_string(),
        ];

        let sorted = version_sort(names, true);
        assert_eq!(sorted, vec!["v2.0.0", "v1.5.0", "v1.0.0"]);
    }

    #[test]
    fn test_sort_ascending() {
        let names = vec!["0.10.0".to_string(), "0.2.0".to_string()];

        let sorted = version_sort(names, false);
        assert_eq!(sorted, vec!["0.2.0", "0.10.0"]);
    }

    #[test]
    fn test_sort_drops_unparseable() {
        let names = vec!["v1.0.0".to_string(), "tip".to_string()];

        let sorted = version_sort(names, true);
        assert_eq!(sorted, vec!["v1.0.0"]);
    }
}
