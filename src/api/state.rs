use std::sync::Arc;

use crate::{
    config::Config,
    services::{GithubGateway, RecommendationSettings, RepositoryGateway},
};

/// Shared application state
///
/// Read-only after startup; every request builds its own working data.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API token is configured
    pub gateway: Option<Arc<dyn RepositoryGateway>>,
    pub settings: Arc<RecommendationSettings>,
}

impl AppState {
    pub fn new(gateway: Option<Arc<dyn RepositoryGateway>>, settings: RecommendationSettings) -> Self {
        Self {
            gateway,
            settings: Arc::new(settings),
        }
    }

    /// Builds the GitHub-backed state from configuration
    pub fn from_config(config: &Config) -> Self {
        let gateway = config.github_token.clone().map(|token| {
            Arc::new(GithubGateway::new(
                config.github_api_url.clone(),
                token,
                config.user_agent.clone(),
            )) as Arc<dyn RepositoryGateway>
        });

        if gateway.is_none() {
            tracing::warn!("GITHUB_TOKEN is not set; recommendation requests will fail");
        }

        Self::new(gateway, RecommendationSettings::from(config))
    }
}
