use std::collections::HashSet;

use crate::models::{AggregatedIssue, RawIssue, RepositoryInfo, RepositoryRef};

const UNKNOWN_REPOSITORY: &str = "unknown";

/// Last path segment of the issue's repository API URL
pub fn repository_display_name(issue: &RawIssue) -> String {
    issue
        .repository_url
        .as_deref()
        .and_then(|url| url.trim_end_matches('/').rsplit('/').next())
        .filter(|segment| !segment.is_empty())
        .unwrap_or(UNKNOWN_REPOSITORY)
        .to_string()
}

/// `owner/name` taken from the repository API URL, else the fetched-for reference
fn repository_identifier(issue: &RawIssue) -> RepositoryRef {
    issue
        .repository_url
        .as_deref()
        .and_then(|url| {
            let mut segments = url.trim_end_matches('/').rsplit('/');
            let name = segments.next()?;
            let owner = segments.next()?;
            Some(RepositoryRef::new(format!("{}/{}", owner, name)))
        })
        .unwrap_or_else(|| issue.source_repository.clone())
}

fn resolve_stars(issue: &RawIssue, repos: &[RepositoryInfo]) -> u64 {
    let identifier = repository_identifier(issue);
    match repos
        .iter()
        .find(|repo| identifier.same_as(&repo.full_name))
    {
        Some(repo) => repo.star_count,
        None => {
            tracing::debug!(
                repository = %identifier,
                issue = issue.number,
                "No repository metadata for issue, using zero stars"
            );
            0
        }
    }
}

/// Flattens per-repository issue lists and attaches repository context
pub fn collect_issues(repos: &[RepositoryInfo], issue_lists: Vec<Vec<RawIssue>>) -> Vec<AggregatedIssue> {
    issue_lists
        .into_iter()
        .flatten()
        .map(|issue| AggregatedIssue {
            repo_name: repository_display_name(&issue),
            repo_stars: resolve_stars(&issue, repos),
            id: issue.id,
            title: issue.title,
            html_url: issue.url,
            labels: issue.labels,
            reactions: issue.reaction_total,
            comments: issue.comment_count,
        })
        .collect()
}

/// Drops issues whose (title, repo name) pair was already seen, ignoring case
pub fn deduplicate_issues(issues: Vec<AggregatedIssue>) -> Vec<AggregatedIssue> {
    let mut seen = HashSet::new();
    issues
        .into_iter()
        .filter(|issue| seen.insert((issue.title.to_lowercase(), issue.repo_name.to_lowercase())))
        .collect()
}

/// Collects then deduplicates, keeping first occurrences
pub fn aggregate_issues(repos: &[RepositoryInfo], issue_lists: Vec<Vec<RawIssue>>) -> Vec<AggregatedIssue> {
    deduplicate_issues(collect_issues(repos, issue_lists))
}
