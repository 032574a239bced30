use serde::{Deserialize, Serialize};

use super::RepositoryRef;

/// An open issue as returned by the gateway, pull requests already removed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIssue {
    /// Platform-wide identifier
    pub id: u64,
    /// Per-repository issue number
    pub number: u64,
    pub title: String,
    pub url: String,
    pub body: String,
    pub labels: Vec<String>,
    pub reaction_total: u64,
    pub comment_count: u64,
    /// API URL of the owning repository, e.g. `https://api.github.com/repos/owner/name`
    pub repository_url: Option<String>,
    pub source_repository: RepositoryRef,
}

/// Issue flattened across repositories with its repository context attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedIssue {
    pub id: u64,
    pub title: String,
    pub html_url: String,
    pub repo_name: String,
    pub labels: Vec<String>,
    pub reactions: u64,
    pub comments: u64,
    pub repo_stars: u64,
}

/// Aggregated issue plus its ranking signals
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredIssue {
    pub issue: AggregatedIssue,
    pub label_boost: f64,
    pub final_score: f64,
}

/// Public projection of a ranked issue; ranking internals are not exposed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub id: u64,
    pub title: String,
    pub html_url: String,
    pub repo_name: String,
    pub labels: Vec<String>,
    pub reactions: u64,
    pub comments: u64,
}

impl From<AggregatedIssue> for IssueSummary {
    fn from(issue: AggregatedIssue) -> Self {
        IssueSummary {
            id: issue.id,
            title: issue.title,
            html_url: issue.html_url,
            repo_name: issue.repo_name,
            labels: issue.labels,
            reactions: issue.reactions,
            comments: issue.comments,
        }
    }
}

impl From<ScoredIssue> for IssueSummary {
    fn from(scored: ScoredIssue) -> Self {
        IssueSummary::from(scored.issue)
    }
}

// ============================================================================
// Code-hosting API Types
// ============================================================================

/// One element of `GET /repos/{owner}/{name}/issues`
///
/// The listing endpoint also returns pull requests; those carry a
/// `pull_request` object.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiIssue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub html_url: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Option<Vec<ApiLabel>>,
    #[serde(default)]
    pub reactions: Option<ApiReactions>,
    #[serde(default)]
    pub comments: Option<u64>,
    #[serde(default)]
    pub repository_url: Option<String>,
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

/// Labels arrive as objects, older payloads sometimes as bare names
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiLabel {
    Object {
        #[serde(default)]
        name: Option<String>,
    },
    Name(String),
}

impl ApiLabel {
    pub fn into_name(self) -> Option<String> {
        match self {
            ApiLabel::Object { name } => name,
            ApiLabel::Name(name) => Some(name),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiReactions {
    #[serde(default)]
    pub total_count: u64,
}

impl ApiIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Converts the payload, defaulting every optional signal to empty or zero
    pub fn into_raw(self, source: &RepositoryRef) -> RawIssue {
        RawIssue {
            id: self.id,
            number: self.number,
            title: self.title,
            url: self.html_url,
            body: self.body.unwrap_or_default(),
            labels: self
                .labels
                .unwrap_or_default()
                .into_iter()
                .filter_map(ApiLabel::into_name)
                .collect(),
            reaction_total: self.reactions.map(|r| r.total_count).unwrap_or(0),
            comment_count: self.comments.unwrap_or(0),
            repository_url: self.repository_url,
            source_repository: source.clone(),
        }
    }
}
