use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Bearer token for the code-hosting API
    ///
    /// Optional at startup: requests fail with a configuration error while it is unset.
    #[serde(default)]
    pub github_token: Option<String>,

    /// Code-hosting REST API base URL
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    /// User-Agent sent upstream
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on candidate repositories per request
    #[serde(default = "default_max_repositories")]
    pub max_repositories: usize,

    /// Upper bound on returned issues
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Page size for the open-issue listing
    #[serde(default = "default_issues_per_page")]
    pub issues_per_page: u32,

    /// Repository queried when the pipeline fails unexpectedly
    #[serde(default = "default_fallback_repository")]
    pub fallback_repository: String,
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    "first-issue-finder".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_repositories() -> usize {
    10
}

fn default_max_results() -> usize {
    15
}

fn default_issues_per_page() -> u32 {
    20
}

fn default_fallback_repository() -> String {
    "facebook/react".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        // An exported-but-empty token is treated as missing
        if config
            .github_token
            .as_deref()
            .is_some_and(|token| token.trim().is_empty())
        {
            config.github_token = None;
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_token() {
        let config = Config::from_vars(vars(&[])).unwrap();

        assert_eq!(config.github_token, None);
        assert_eq!(config.github_api_url, "https://api.github.com");
        assert_eq!(config.max_repositories, 10);
        assert_eq!(config.max_results, 15);
        assert_eq!(config.issues_per_page, 20);
        assert_eq!(config.fallback_repository, "facebook/react");
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_reads_overrides() {
        let config = Config::from_vars(vars(&[
            ("GITHUB_TOKEN", "ghp_example"),
            ("PORT", "8080"),
            ("MAX_RESULTS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.github_token.as_deref(), Some("ghp_example"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_results, 5);
    }

    #[test]
    fn test_blank_token_is_missing() {
        let config = Config::from_vars(vars(&[("GITHUB_TOKEN", "  ")])).unwrap();
        assert_eq!(config.github_token, None);
    }

    #[test]
    fn test_invalid_port_fails() {
        let result = Config::from_vars(vars(&[("PORT", "not-a-port")]));
        assert!(result.is_err());
    }
}
