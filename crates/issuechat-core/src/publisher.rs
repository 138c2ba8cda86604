use github_client::IssuesClient;

use crate::error::IssueChatError;
use crate::types::{IssueDraft, PublishResult};
use crate::Result;

/// Split a `owner/repo` string, rejecting anything without exactly one `/`
/// separating two non-empty halves. Runs before any network call.
pub fn parse_repository(input: &str) -> Result<(String, String)> {
    let trimmed = input.trim();
    match trimmed.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(IssueChatError::InvalidRepository(trimmed.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Publisher
// ---------------------------------------------------------------------------

/// Wraps issue creation and normalizes every outcome into a [`PublishResult`].
/// Callers branch on the `success` flag; no error ever propagates out of
/// [`publish`](Publisher::publish).
#[derive(Debug, Clone)]
pub struct Publisher {
    client: IssuesClient,
}

impl Publisher {
    pub fn new(client: IssuesClient) -> Self {
        Self { client }
    }

    /// Create one issue in `owner/repo`.
    pub async fn publish(
        &self,
        owner: &str,
        repo: &str,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> PublishResult {
        match self.client.create_issue(owner, repo, title, body, labels).await {
            Ok(created) => {
                tracing::info!(url = %created.html_url, number = created.number, "issue created");
                PublishResult::published(created.html_url, created.number)
            }
            Err(e) => {
                tracing::warn!(error = %e, "issue creation failed");
                PublishResult::failed(e.to_string())
            }
        }
    }

    /// Publish a confirmed draft to a `owner/repo` string, validating the
    /// repository format before touching the network.
    pub async fn publish_draft(&self, repository: &str, draft: &IssueDraft) -> PublishResult {
        let (owner, repo) = match parse_repository(repository) {
            Ok(parts) => parts,
            Err(e) => return PublishResult::failed(e.to_string()),
        };
        self.publish(&owner, &repo, &draft.title, &draft.description, &draft.labels)
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IssueType;

    fn draft() -> IssueDraft {
        IssueDraft {
            issue_type: IssueType::Bug,
            title: "Login fails on Safari".into(),
            description: "...".into(),
            labels: vec!["bug".into()],
            reasoning: "...".into(),
        }
    }

    #[test]
    fn parse_repository_accepts_owner_slash_repo() {
        let (owner, repo) = parse_repository("acme/widgets").unwrap();
        assert_eq!(owner, "acme");
        assert_eq!(repo, "widgets");
    }

    #[test]
    fn parse_repository_trims_whitespace() {
        let (owner, repo) = parse_repository("  acme/widgets \n").unwrap();
        assert_eq!(owner, "acme");
        assert_eq!(repo, "widgets");
    }

    #[test]
    fn parse_repository_rejects_missing_slash() {
        assert!(matches!(
            parse_repository("widgets"),
            Err(IssueChatError::InvalidRepository(_))
        ));
    }

    #[test]
    fn parse_repository_rejects_empty_halves_and_extra_slashes() {
        for bad in ["/widgets", "acme/", "/", "a/b/c", ""] {
            assert!(
                parse_repository(bad).is_err(),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[tokio::test]
    async fn publish_draft_rejects_bad_repository_before_any_network_call() {
        // Expect zero hits: the mock has no matching stub, and an unexpected
        // request would fail the assertion below.
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let publisher = Publisher::new(IssuesClient::new(server.url(), "t"));
        let result = publisher.publish_draft("not-a-repo", &draft()).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("owner/repo"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn publish_success_carries_url_and_number() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/repos/acme/widgets/issues")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"html_url":"https://github.com/acme/widgets/issues/7","number":7}"#)
            .create_async()
            .await;

        let publisher = Publisher::new(IssuesClient::new(server.url(), "t"));
        let result = publisher.publish_draft("acme/widgets", &draft()).await;

        assert!(result.success);
        assert_eq!(
            result.issue_url.as_deref(),
            Some("https://github.com/acme/widgets/issues/7")
        );
        assert_eq!(result.issue_number, Some(7));
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn publish_failure_is_a_failed_result_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/repos/acme/widgets/issues")
            .with_status(403)
            .with_body(r#"{"message":"Forbidden"}"#)
            .create_async()
            .await;

        let publisher = Publisher::new(IssuesClient::new(server.url(), "t"));
        let result = publisher.publish_draft("acme/widgets", &draft()).await;

        assert!(!result.success);
        assert!(result.error.is_some());
        assert!(result.issue_url.is_none());
    }
}
