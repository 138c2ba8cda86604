use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::GithubClientError;
use crate::Result;

const USER_AGENT: &str = concat!("issuechat/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct CreateIssueRequest<'a> {
    title: &'a str,
    body: &'a str,
    labels: &'a [String],
}

/// The fields of the REST response the workspace cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    pub html_url: String,
    pub number: u64,
}

// ---------------------------------------------------------------------------
// IssuesClient
// ---------------------------------------------------------------------------

/// Client for the GitHub REST issue-creation endpoint.
#[derive(Debug, Clone)]
pub struct IssuesClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl IssuesClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Create one issue in `owner/repo`.
    ///
    /// No idempotency key: retrying after a transient failure may create a
    /// duplicate issue.
    pub async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<CreatedIssue> {
        let url = format!("{}/repos/{}/{}/issues", self.base_url, owner, repo);
        tracing::debug!(%owner, %repo, %title, "creating issue");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .json(&CreateIssueRequest {
                title,
                body,
                labels,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GithubClientError::Api {
                endpoint: "repos/{owner}/{repo}/issues",
                status,
                body,
            });
        }

        Ok(response.json::<CreatedIssue>().await?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_issue_parses_url_and_number() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/acme/widgets/issues")
            .match_header("authorization", "Bearer t")
            .match_header("accept", "application/vnd.github+json")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"html_url":"https://github.com/acme/widgets/issues/7","number":7}"#)
            .create_async()
            .await;

        let created = IssuesClient::new(server.url(), "t")
            .create_issue(
                "acme",
                "widgets",
                "Login fails on Safari",
                "details",
                &["bug".to_string()],
            )
            .await
            .unwrap();

        assert_eq!(created.html_url, "https://github.com/acme/widgets/issues/7");
        assert_eq!(created.number, 7);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_issue_sends_title_body_and_labels() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/acme/widgets/issues")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "title": "t",
                "body": "b",
                "labels": ["bug", "ui"]
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"html_url":"https://github.com/acme/widgets/issues/1","number":1}"#)
            .create_async()
            .await;

        IssuesClient::new(server.url(), "t")
            .create_issue(
                "acme",
                "widgets",
                "t",
                "b",
                &["bug".to_string(), "ui".to_string()],
            )
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_issue_non_2xx_is_an_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/repos/acme/widgets/issues")
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let err = IssuesClient::new(server.url(), "t")
            .create_issue("acme", "widgets", "t", "b", &[])
            .await
            .unwrap_err();

        match err {
            GithubClientError::Api { status, .. } => assert_eq!(status.as_u16(), 404),
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
