use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of a hosted repository in `owner/name` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryRef {
    pub full_name: String,
}

impl RepositoryRef {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.full_name
    }

    /// Case-insensitive identity, matching how the platform resolves names
    pub fn same_as(&self, other: &str) -> bool {
        self.full_name.eq_ignore_ascii_case(other)
    }
}

impl Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_name)
    }
}

impl From<&str> for RepositoryRef {
    fn from(full_name: &str) -> Self {
        Self::new(full_name)
    }
}

/// Repository metadata used by the quality gate
///
/// Fetched fresh for every request and dropped once the request completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub full_name: String,
    pub name: String,
    pub star_count: u64,
    pub open_issue_count: u64,
    pub last_pushed_at: DateTime<Utc>,
    pub topics: Vec<String>,
}

impl RepositoryInfo {
    pub fn repository_ref(&self) -> RepositoryRef {
        RepositoryRef::new(self.full_name.clone())
    }
}

// ============================================================================
// Code-hosting API Types
// ============================================================================

/// Raw payload of `GET /repos/{owner}/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRepository {
    pub full_name: String,
    pub name: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    /// Null for repositories that never received a push
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl From<ApiRepository> for RepositoryInfo {
    fn from(repo: ApiRepository) -> Self {
        RepositoryInfo {
            full_name: repo.full_name,
            name: repo.name,
            star_count: repo.stargazers_count,
            open_issue_count: repo.open_issues_count,
            // Epoch never counts as recent activity
            last_pushed_at: repo.pushed_at.unwrap_or_default(),
            topics: repo.topics,
        }
    }
}
