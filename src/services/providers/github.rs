/// GitHub REST API gateway
///
/// Reads repository metadata from `/repos/{owner}/{name}` and open issues from
/// `/repos/{owner}/{name}/issues`. Nothing is cached and nothing is retried:
/// each call hits the API exactly once.
use crate::{
    error::{AppError, AppResult},
    models::{ApiIssue, ApiRepository, RawIssue, RepositoryInfo, RepositoryRef},
    services::providers::RepositoryGateway,
};
use reqwest::{header, Client as HttpClient, RequestBuilder};
use tracing::instrument;

const ACCEPT_HEADER: &str = "application/vnd.github+json";

#[derive(Clone)]
pub struct GithubGateway {
    http_client: HttpClient,
    api_url: String,
    token: String,
    user_agent: String,
}

impl GithubGateway {
    pub fn new(api_url: String, token: String, user_agent: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            user_agent,
        }
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.http_client
            .get(url)
            .bearer_auth(&self.token)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::ACCEPT, ACCEPT_HEADER)
            .header(header::CACHE_CONTROL, "no-store")
    }

    async fn get_repository(&self, repository: &RepositoryRef) -> AppResult<RepositoryInfo> {
        let url = format!("{}/repos/{}", self.api_url, repository);
        let response = self.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "GitHub API returned status {}: {}",
                status, body
            )));
        }

        let repo: ApiRepository = response.json().await?;
        Ok(RepositoryInfo::from(repo))
    }

    async fn list_open_issues(&self, repository: &RepositoryRef, per_page: u32) -> AppResult<Vec<RawIssue>> {
        let url = format!("{}/repos/{}/issues", self.api_url, repository);
        let per_page = per_page.to_string();
        let response = self
            .get(&url)
            .query(&[("state", "open"), ("per_page", per_page.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "GitHub API returned status {}: {}",
                status, body
            )));
        }

        let items: serde_json::Value = response.json().await?;
        let items = items.as_array().ok_or_else(|| {
            AppError::ExternalApi("Invalid GitHub issues response format".to_string())
        })?;

        Ok(parse_issue_page(items, repository))
    }
}

/// Converts one issues page, skipping pull requests and unreadable items
fn parse_issue_page(items: &[serde_json::Value], repository: &RepositoryRef) -> Vec<RawIssue> {
    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<ApiIssue>(item.clone()) {
            Ok(issue) => Some(issue),
            Err(e) => {
                tracing::debug!(repository = %repository, error = %e, "Skipping unreadable issue");
                None
            }
        })
        .filter(|issue| !issue.is_pull_request())
        .map(|issue| issue.into_raw(repository))
        .collect()
}

#[async_trait::async_trait]
impl RepositoryGateway for GithubGateway {
    #[instrument(skip(self, repository), fields(repository = %repository))]
    async fn fetch_repository_info(&self, repository: &RepositoryRef) -> Option<RepositoryInfo> {
        match self.get_repository(repository).await {
            Ok(info) => {
                tracing::info!(
                    repository = %repository,
                    stars = info.star_count,
                    open_issues = info.open_issue_count,
                    gateway = self.name(),
                    "Repository info fetched"
                );
                Some(info)
            }
            Err(e) => {
                tracing::error!(repository = %repository, error = %e, "Failed to fetch repository info");
                None
            }
        }
    }

    #[instrument(skip(self, repository), fields(repository = %repository))]
    async fn fetch_open_issues(&self, repository: &RepositoryRef, per_page: u32) -> Vec<RawIssue> {
        match self.list_open_issues(repository, per_page).await {
            Ok(issues) => {
                tracing::info!(
                    repository = %repository,
                    issues = issues.len(),
                    gateway = self.name(),
                    "Open issues fetched"
                );
                issues
            }
            Err(e) => {
                tracing::error!(repository = %repository, error = %e, "Failed to fetch issues");
                Vec::new()
            }
        }
    }

    fn name(&self) -> &'static str {
        "github"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn create_test_gateway(url: &str) -> GithubGateway {
        GithubGateway::new(url.to_string(), "test-token".to_string(), "first-issue-finder".to_string())
    }

    fn issues_query() -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("state".into(), "open".into()),
            Matcher::UrlEncoded("per_page".into(), "20".into()),
        ])
    }

    #[test]
    fn test_parse_issue_page_filters_pull_requests() {
        let items = vec![
            json!({
                "id": 1, "number": 1, "title": "Issue", "html_url": "https://github.com/o/r/issues/1",
                "labels": [{ "name": "good first issue" }]
            }),
            json!({
                "id": 2, "number": 2, "title": "PR", "html_url": "https://github.com/o/r/pull/2",
                "pull_request": { "url": "https://api.github.com/repos/o/r/pulls/2" }
            }),
            json!({ "number": 3 }),
        ];

        let issues = parse_issue_page(&items, &RepositoryRef::new("o/r"));

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].title, "Issue");
        assert_eq!(issues[0].labels, vec!["good first issue"]);
    }

    #[tokio::test]
    async fn test_fetch_repository_info_success() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/facebook/react")
            .match_header("authorization", "Bearer test-token")
            .match_header("accept", ACCEPT_HEADER)
            .match_header("user-agent", "first-issue-finder")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "full_name": "facebook/react",
                    "name": "react",
                    "stargazers_count": 230000,
                    "open_issues_count": 900,
                    "pushed_at": "2026-10-16T08:00:00Z",
                    "topics": ["ui"]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let gateway = create_test_gateway(&server.url());
        let info = gateway
            .fetch_repository_info(&RepositoryRef::new("facebook/react"))
            .await
            .unwrap();

        assert_eq!(info.full_name, "facebook/react");
        assert_eq!(info.star_count, 230000);
        assert_eq!(info.open_issue_count, 900);
    }

    #[tokio::test]
    async fn test_fetch_repository_info_not_found_is_absent() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/nobody/nothing")
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let gateway = create_test_gateway(&server.url());
        let info = gateway
            .fetch_repository_info(&RepositoryRef::new("nobody/nothing"))
            .await;

        assert!(info.is_none());
    }

    #[tokio::test]
    async fn test_fetch_repository_info_transport_failure_is_absent() {
        // Nothing listens on port 9 locally
        let gateway = create_test_gateway("http://127.0.0.1:9");
        let info = gateway
            .fetch_repository_info(&RepositoryRef::new("facebook/react"))
            .await;

        assert!(info.is_none());
    }

    #[tokio::test]
    async fn test_fetch_open_issues_maps_and_filters() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/vuejs/vue/issues")
            .match_query(issues_query())
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    {
                        "id": 11, "number": 101, "title": "Typo in docs",
                        "html_url": "https://github.com/vuejs/vue/issues/101",
                        "body": null,
                        "labels": [{ "name": "documentation" }, { "name": "good first issue" }],
                        "reactions": { "total_count": 2 },
                        "comments": 4,
                        "repository_url": "https://api.github.com/repos/vuejs/vue"
                    },
                    {
                        "id": 12, "number": 102, "title": "Refactor compiler",
                        "html_url": "https://github.com/vuejs/vue/pull/102",
                        "pull_request": {}
                    },
                    {
                        "id": 13, "number": 103, "title": "No extras",
                        "html_url": "https://github.com/vuejs/vue/issues/103"
                    }
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let gateway = create_test_gateway(&server.url());
        let issues = gateway
            .fetch_open_issues(&RepositoryRef::new("vuejs/vue"), 20)
            .await;

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].number, 101);
        assert_eq!(issues[0].body, "");
        assert_eq!(issues[0].labels, vec!["documentation", "good first issue"]);
        assert_eq!(issues[0].reaction_total, 2);
        assert_eq!(issues[0].comment_count, 4);
        assert_eq!(issues[1].number, 103);
        assert!(issues[1].labels.is_empty());
        assert_eq!(issues[1].reaction_total, 0);
        assert_eq!(issues[1].comment_count, 0);
    }

    #[tokio::test]
    async fn test_fetch_open_issues_error_status_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/vuejs/vue/issues")
            .match_query(issues_query())
            .with_status(403)
            .with_body(r#"{"message":"API rate limit exceeded"}"#)
            .create_async()
            .await;

        let gateway = create_test_gateway(&server.url());
        let issues = gateway
            .fetch_open_issues(&RepositoryRef::new("vuejs/vue"), 20)
            .await;

        assert!(issues.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_open_issues_non_array_body_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/vuejs/vue/issues")
            .match_query(issues_query())
            .with_status(200)
            .with_body(r#"{"unexpected":"object"}"#)
            .create_async()
            .await;

        let gateway = create_test_gateway(&server.url());
        let issues = gateway
            .fetch_open_issues(&RepositoryRef::new("vuejs/vue"), 20)
            .await;

        assert!(issues.is_empty());
    }
}
