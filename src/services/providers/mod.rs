use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::instrument;

/// Code-hosting data gateway abstraction
///
/// The pipeline only needs two reads per repository: its metadata and its
/// open issues. Implementations swallow their own failures (returning
/// `None` or an empty list and logging why) so that one bad repository never
/// fails a whole request.
use crate::{
    error::{AppError, AppResult},
    models::{RawIssue, RepositoryInfo, RepositoryRef},
};

pub mod github;

pub use github::GithubGateway;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositoryGateway: Send + Sync {
    /// Fetch repository metadata, `None` on any failure
    async fn fetch_repository_info(&self, repository: &RepositoryRef) -> Option<RepositoryInfo>;

    /// Fetch up to `per_page` open issues, pull requests excluded
    ///
    /// Returns an empty list on any failure.
    async fn fetch_open_issues(&self, repository: &RepositoryRef, per_page: u32) -> Vec<RawIssue>;

    /// Gateway name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Fetches metadata for every repository in parallel
///
/// Results are positional: entry `i` belongs to `repositories[i]`. A task that
/// fails to join counts as `None` for its position only.
#[instrument(skip(gateway, repositories), fields(repositories = repositories.len()))]
pub async fn fetch_repository_infos(
    gateway: Arc<dyn RepositoryGateway>,
    repositories: &[RepositoryRef],
) -> AppResult<Vec<Option<RepositoryInfo>>> {
    let mut tasks = Vec::with_capacity(repositories.len());

    for repository in repositories.iter().cloned() {
        let gateway = Arc::clone(&gateway);
        let task = tokio::spawn(async move { gateway.fetch_repository_info(&repository).await });
        tasks.push(task);
    }

    let results = join_positional(tasks, repositories, || None).await?;

    let missing = results.iter().filter(|info| info.is_none()).count();
    if missing > 0 {
        tracing::warn!(
            success_count = results.len() - missing,
            error_count = missing,
            gateway = gateway.name(),
            "Partial repository fetch failure"
        );
    }

    Ok(results)
}

/// Fetches open issues for every repository in parallel, positionally
///
/// A task that fails to join yields an empty list for its position.
#[instrument(skip(gateway, repositories), fields(repositories = repositories.len()))]
pub async fn fetch_issue_lists(
    gateway: Arc<dyn RepositoryGateway>,
    repositories: &[RepositoryRef],
    per_page: u32,
) -> AppResult<Vec<Vec<RawIssue>>> {
    let mut tasks = Vec::with_capacity(repositories.len());

    for repository in repositories.iter().cloned() {
        let gateway = Arc::clone(&gateway);
        let task = tokio::spawn(async move { gateway.fetch_open_issues(&repository, per_page).await });
        tasks.push(task);
    }

    join_positional(tasks, repositories, Vec::new).await
}

/// Awaits every task in input order
///
/// Failed joins are replaced by `on_failure()` so siblings keep their results.
/// Only when every task fails is the batch an internal error.
async fn join_positional<T>(
    tasks: Vec<JoinHandle<T>>,
    repositories: &[RepositoryRef],
    on_failure: impl Fn() -> T,
) -> AppResult<Vec<T>> {
    let mut results = Vec::with_capacity(tasks.len());
    let mut failed = 0;
    let mut last_error = None;

    for (task, repository) in tasks.into_iter().zip(repositories) {
        match task.await {
            Ok(value) => results.push(value),
            Err(e) => {
                tracing::error!(repository = %repository, error = %e, "Task join error");
                failed += 1;
                last_error = Some(e);
                results.push(on_failure());
            }
        }
    }

    match last_error {
        Some(e) if failed == results.len() => Err(AppError::Internal(e.to_string())),
        _ => Ok(results),
    }
}
