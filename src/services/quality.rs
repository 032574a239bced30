use chrono::{DateTime, Duration, Utc};

use crate::models::RepositoryInfo;

/// Popularity and activity gate for candidate repositories
///
/// All comparisons are strict: a repository must exceed both counts and have
/// been pushed to after `now - max_push_age`.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityThresholds {
    pub min_stars: u64,
    pub min_open_issues: u64,
    pub max_push_age: Duration,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_stars: 5000,
            min_open_issues: 10,
            max_push_age: Duration::days(90),
        }
    }
}

pub fn is_quality_repository(
    repo: &RepositoryInfo,
    now: DateTime<Utc>,
    thresholds: &QualityThresholds,
) -> bool {
    repo.star_count > thresholds.min_stars
        && repo.open_issue_count > thresholds.min_open_issues
        && repo.last_pushed_at > now - thresholds.max_push_age
}

/// Keeps qualifying repositories in their original order
pub fn filter_by_quality(
    repos: Vec<RepositoryInfo>,
    now: DateTime<Utc>,
    thresholds: &QualityThresholds,
) -> Vec<RepositoryInfo> {
    repos
        .into_iter()
        .filter(|repo| {
            let keep = is_quality_repository(repo, now, thresholds);
            if !keep {
                tracing::debug!(
                    repository = %repo.full_name,
                    stars = repo.star_count,
                    open_issues = repo.open_issue_count,
                    pushed_at = %repo.last_pushed_at,
                    "Repository rejected by quality filter"
                );
            }
            keep
        })
        .collect()
}
