use github_client::{ChatMessage, CompletionsClient, GenerationParams};

use crate::analyzer::strip_code_fences;
use crate::error::IssueChatError;
use crate::types::{Improvement, IssueDraft};
use crate::Result;

const IMPROVER_INSTRUCTION: &str = r#"You polish draft GitHub issues.

Given a draft issue as JSON, rewrite it so a maintainer can act on it: a sharper title, a well-structured markdown description (context, expected vs actual behavior for bugs, acceptance criteria for features), and a sensible label set.

Respond with exactly one JSON object and nothing else:
{
  "improvedTitle": "rewritten title",
  "improvedDescription": "rewritten markdown description",
  "suggestedLabels": ["labels"],
  "changesSummary": "one line describing what you changed"
}"#;

/// Asks the model for a better title/description/labels for a draft.
///
/// Improvement is opt-in and reversible: this type only ever returns a
/// suggestion, and a failure leaves the caller's draft untouched because the
/// draft is never handed over mutably.
#[derive(Debug, Clone)]
pub struct Improver {
    client: CompletionsClient,
    params: GenerationParams,
}

impl Improver {
    pub fn new(client: CompletionsClient, params: GenerationParams) -> Self {
        Self { client, params }
    }

    /// Run one improvement call and parse the strict-JSON suggestion.
    pub async fn improve(&self, draft: &IssueDraft) -> Result<Improvement> {
        let draft_json = serde_json::to_string_pretty(draft)
            .map_err(|source| IssueChatError::Improvement {
                raw: String::new(),
                source,
            })?;
        let messages = [
            ChatMessage::system(IMPROVER_INSTRUCTION),
            ChatMessage::user(draft_json),
        ];
        let text = self.client.complete(&messages, &self.params).await?;

        match serde_json::from_str(strip_code_fences(&text)) {
            Ok(improvement) => Ok(improvement),
            Err(source) => Err(IssueChatError::Improvement { raw: text, source }),
        }
    }

    /// Like [`improve`](Improver::improve), but folds every failure into
    /// `None` so callers keep the original draft without branching on errors.
    pub async fn improve_lenient(&self, draft: &IssueDraft) -> Option<Improvement> {
        match self.improve(draft).await {
            Ok(improvement) => Some(improvement),
            Err(e) => {
                tracing::warn!(error = %e, "improvement failed; keeping original draft");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IssueType;

    fn draft() -> IssueDraft {
        IssueDraft {
            issue_type: IssueType::Bug,
            title: "login broken".into(),
            description: "it fails".into(),
            labels: vec!["bug".into()],
            reasoning: "specific defect".into(),
        }
    }

    fn completion_body(content: &str) -> String {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string()
    }

    fn improver_against(server: &mockito::ServerGuard) -> Improver {
        Improver::new(
            CompletionsClient::new(server.url(), "t"),
            GenerationParams::default(),
        )
    }

    #[tokio::test]
    async fn improve_parses_suggestion() {
        let suggestion = r###"{"improvedTitle":"Login fails on Safari 17","improvedDescription":"## Steps\n...","suggestedLabels":["bug","auth"],"changesSummary":"added repro steps"}"###;
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(&format!("```json\n{suggestion}\n```")))
            .create_async()
            .await;

        let improvement = improver_against(&server).improve(&draft()).await.unwrap();
        assert_eq!(improvement.improved_title, "Login fails on Safari 17");
        assert_eq!(improvement.suggested_labels, vec!["bug", "auth"]);
    }

    #[tokio::test]
    async fn improve_failure_leaves_draft_unchanged() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("no json here"))
            .create_async()
            .await;

        let original = draft();
        let improvement = improver_against(&server).improve_lenient(&original).await;
        assert!(improvement.is_none());
        // The draft was only borrowed; its fields are exactly as constructed.
        assert_eq!(original.title, "login broken");
        assert_eq!(original.description, "it fails");
        assert_eq!(original.labels, vec!["bug"]);
    }

    #[tokio::test]
    async fn improve_upstream_failure_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(503)
            .create_async()
            .await;

        assert!(improver_against(&server)
            .improve_lenient(&draft())
            .await
            .is_none());
    }
}
