use chrono::Utc;
use std::sync::Arc;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{IssueSummary, RecommendationRequest, RecommendationResponse, RepositoryRef},
    services::{
        aggregation::aggregate_issues,
        candidates::select_candidates,
        level::{filter_by_level, LevelTier},
        providers::{fetch_issue_lists, fetch_repository_infos, RepositoryGateway},
        quality::{filter_by_quality, QualityThresholds},
        scoring::{rank_issues, score_issue},
    },
};

pub const MISSING_TOKEN_MESSAGE: &str = "Server misconfigured: missing GitHub token.";
pub const NO_REPOSITORIES_MESSAGE: &str = "No repositories found matching your criteria.";
pub const NO_ISSUES_MESSAGE: &str = "No issues found for the selected repositories.";
pub const NO_LEVEL_MATCHES_MESSAGE: &str = "No issues found matching your skill level.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected server error while fetching issues.";

/// Tunables of the recommendation pipeline
#[derive(Debug, Clone)]
pub struct RecommendationSettings {
    pub max_repositories: usize,
    pub max_results: usize,
    pub issues_per_page: u32,
    pub fallback_repository: RepositoryRef,
    pub quality: QualityThresholds,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            max_repositories: 10,
            max_results: 15,
            issues_per_page: 20,
            fallback_repository: RepositoryRef::new("facebook/react"),
            quality: QualityThresholds::default(),
        }
    }
}

impl From<&Config> for RecommendationSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_repositories: config.max_repositories,
            max_results: config.max_results,
            issues_per_page: config.issues_per_page,
            fallback_repository: RepositoryRef::new(config.fallback_repository.clone()),
            quality: QualityThresholds::default(),
        }
    }
}

/// Recommends open issues for a request
///
/// Soft outcomes (nothing qualifies, nothing open, nothing at this level)
/// come back as `Ok` with an explanatory message. `Err` is reserved for a
/// missing credential and for internal failures the fallback could not cover.
pub async fn recommend(
    gateway: Option<Arc<dyn RepositoryGateway>>,
    settings: &RecommendationSettings,
    request: RecommendationRequest,
) -> AppResult<RecommendationResponse> {
    let Some(gateway) = gateway else {
        tracing::error!("GitHub token missing");
        return Err(AppError::Configuration(MISSING_TOKEN_MESSAGE.to_string()));
    };

    match run_pipeline(Arc::clone(&gateway), settings, &request).await {
        Ok(response) => Ok(response),
        Err(e) => {
            tracing::error!(error = %e, "Recommendation pipeline failed, trying fallback");
            fallback(gateway, settings).await
        }
    }
}

async fn run_pipeline(
    gateway: Arc<dyn RepositoryGateway>,
    settings: &RecommendationSettings,
    request: &RecommendationRequest,
) -> AppResult<RecommendationResponse> {
    let tier = LevelTier::parse(&request.level);

    // 1. Candidate repositories
    let candidates = select_candidates(&request.skills, &request.interest, settings.max_repositories);
    tracing::info!(
        selected = candidates.len(),
        repositories = ?candidates.iter().map(RepositoryRef::as_str).collect::<Vec<_>>(),
        "Candidate repositories selected"
    );

    // 2. Metadata and quality gate
    let infos = fetch_repository_infos(Arc::clone(&gateway), &candidates)
        .await?
        .into_iter()
        .flatten()
        .collect();
    let qualifying = filter_by_quality(infos, Utc::now(), &settings.quality);
    tracing::info!(qualifying = qualifying.len(), "Repositories after quality filter");

    if qualifying.is_empty() {
        return Ok(RecommendationResponse::empty(NO_REPOSITORIES_MESSAGE));
    }

    // 3. Open issues per qualifying repository
    let refs: Vec<RepositoryRef> = qualifying.iter().map(|repo| repo.repository_ref()).collect();
    let issue_lists = fetch_issue_lists(gateway, &refs, settings.issues_per_page).await?;
    let raw_count: usize = issue_lists.iter().map(Vec::len).sum();
    tracing::info!(raw_issues = raw_count, "Open issues fetched");

    if raw_count == 0 {
        return Ok(RecommendationResponse::empty(NO_ISSUES_MESSAGE));
    }

    // 4. Aggregate, deduplicate, filter by level
    let unique = aggregate_issues(&qualifying, issue_lists);
    tracing::info!(unique_issues = unique.len(), "Issues deduplicated");

    let matched = filter_by_level(unique, &tier);
    tracing::info!(level = %tier, matched = matched.len(), "Issues filtered by level");

    if matched.is_empty() {
        return Ok(RecommendationResponse::empty(NO_LEVEL_MATCHES_MESSAGE));
    }

    // 5. Score and rank
    let scored = matched.into_iter().map(score_issue).collect();
    let ranked = rank_issues(scored, &mut rand::thread_rng(), settings.max_results);

    let issues: Vec<IssueSummary> = ranked.into_iter().map(IssueSummary::from).collect();
    tracing::info!(returned = issues.len(), "Recommendations ranked");

    Ok(RecommendationResponse::ranked(issues))
}

/// Last resort: unscored open issues of one well-known repository
async fn fallback(
    gateway: Arc<dyn RepositoryGateway>,
    settings: &RecommendationSettings,
) -> AppResult<RecommendationResponse> {
    let repository = &settings.fallback_repository;
    let per_page = u32::try_from(settings.max_results).unwrap_or(u32::MAX);

    let issues: Vec<IssueSummary> = gateway
        .fetch_open_issues(repository, per_page)
        .await
        .into_iter()
        .take(settings.max_results)
        .map(|issue| IssueSummary {
            id: issue.id,
            title: issue.title,
            html_url: issue.url,
            repo_name: repository.full_name.clone(),
            labels: issue.labels,
            reactions: issue.reaction_total,
            comments: issue.comment_count,
        })
        .collect();

    if issues.is_empty() {
        tracing::error!(repository = %repository, "Fallback returned no issues");
        return Err(AppError::Internal(UNEXPECTED_ERROR_MESSAGE.to_string()));
    }

    tracing::warn!(repository = %repository, returned = issues.len(), "Serving fallback issues");
    Ok(RecommendationResponse::ranked(issues))
}
