//! Repository references (`owner/name`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// A repository identifier that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoRefError {
    #[error("Invalid repository '{value}': expected owner/repo")]
    InvalidFormat { value: String },

    #[error("Cannot derive repository from URL '{url}'")]
    InvalidApiUrl { url: String },
}

/// Identifies one tracker repository.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RepoRef {
    owner: String,
    name: String,
}

impl RepoRef {
    /// Build a reference from already-validated segments.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the full name (owner/name).
    #[inline]
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Whether both repositories belong to the same owner (case-insensitive).
    #[must_use]
    pub fn same_owner(&self, other: &RepoRef) -> bool {
        self.owner.eq_ignore_ascii_case(&other.owner)
    }

    /// Derive the repository from a tracker API URL such as
    /// `https://api.github.com/repos/octo/hello` or
    /// `https://ghe.example.com/api/v3/repos/octo/hello`.
    ///
    /// The last three path segments must be `repos/{owner}/{name}`.
    pub fn from_api_url(api_url: &str) -> Result<Self, RepoRefError> {
        let invalid = || RepoRefError::InvalidApiUrl {
            url: api_url.to_string(),
        };

        let url = Url::parse(api_url).map_err(|_| invalid())?;
        let segments: Vec<&str> = url
            .path_segments()
            .ok_or_else(invalid)?
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [.., "repos", owner, name] => Ok(Self::new(*owner, *name)),
            _ => Err(invalid()),
        }
    }
}

impl FromStr for RepoRef {
    type Err = RepoRefError;

    /// Parse `owner/name`: exactly one `/` and two non-empty segments.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(RepoRefError::InvalidFormat {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_name() {
        let repo: RepoRef = "rust-lang/rust".parse().unwrap();
        assert_eq!(repo.owner(), "rust-lang");
        assert_eq!(repo.name(), "rust");
        assert_eq!(repo.full_name(), "rust-lang/rust");
        assert_eq!(repo.to_string(), "rust-lang/rust");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let repo: RepoRef = "  org/repo\n".parse().unwrap();
        assert_eq!(repo, RepoRef::new("org", "repo"));
    }

    #[test]
    fn rejects_malformed_shapes() {
        for bad in ["", "org", "/repo", "org/", "a/b/c", "org//repo", "/"] {
            let err = bad.parse::<RepoRef>().unwrap_err();
            assert!(
                matches!(err, RepoRefError::InvalidFormat { .. }),
                "expected InvalidFormat for {bad:?}"
            );
        }
    }

    #[test]
    fn same_owner_ignores_case() {
        let a = RepoRef::new("Org1", "a");
        let b = RepoRef::new("org1", "b");
        let c = RepoRef::new("org2", "a");
        assert!(a.same_owner(&b));
        assert!(!a.same_owner(&c));
    }

    #[test]
    fn from_api_url_reads_public_and_enterprise_urls() {
        let public = RepoRef::from_api_url("https://api.github.com/repos/octo/hello").unwrap();
        assert_eq!(public, RepoRef::new("octo", "hello"));

        let ghe =
            RepoRef::from_api_url("https://ghe.example.com/api/v3/repos/team/tool/").unwrap();
        assert_eq!(ghe, RepoRef::new("team", "tool"));
    }

    #[test]
    fn from_api_url_accepts_segments_named_repos() {
        let repo_named_repos =
            RepoRef::from_api_url("https://api.github.com/repos/someone/repos").unwrap();
        assert_eq!(repo_named_repos, RepoRef::new("someone", "repos"));

        let owner_named_repos =
            RepoRef::from_api_url("https://api.github.com/repos/repos/tool").unwrap();
        assert_eq!(owner_named_repos, RepoRef::new("repos", "tool"));

        let both = RepoRef::from_api_url("https://ghe.example.com/api/v3/repos/repos/repos").unwrap();
        assert_eq!(both, RepoRef::new("repos", "repos"));
    }

    #[test]
    fn from_api_url_rejects_unexpected_paths() {
        for bad in [
            "not a url",
            "https://api.github.com/users/octo",
            "https://api.github.com/repos/octo",
            "https://api.github.com/repos/octo/hello/issues/1",
        ] {
            assert!(
                matches!(
                    RepoRef::from_api_url(bad),
                    Err(RepoRefError::InvalidApiUrl { .. })
                ),
                "expected InvalidApiUrl for {bad:?}"
            );
        }
    }
}
