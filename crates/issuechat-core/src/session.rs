use std::sync::OnceLock;

use github_client::{CompletionsClient, GenerationParams};
use regex::Regex;

use crate::analyzer::Analyzer;
use crate::publisher::parse_repository;
use crate::types::{IssueDraft, Transcript};

/// System prompt seeding every session transcript.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that helps people write GitHub issues.";

const HELP_TEXT: &str = "\
Commands:
  help                                 show this message
  create issue                         file an issue by answering prompts
  set default repo to <owner>/<repo>   remember a repository for publishing
  exit | quit                          end the session

Anything else is sent to the assistant. If your message describes a bug,
feature, or task, you'll be offered an issue draft to review and publish.";

fn set_repo_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^set default repo(?:sitory)? to\s+(\S+)$").expect("valid regex")
    })
}

// ---------------------------------------------------------------------------
// Turn
// ---------------------------------------------------------------------------

/// Outcome of handling one input. Every variant returns the session to Idle;
/// `Review` and `ManualDraft` hand a sub-flow (edit prompts, confirmation,
/// publish) back to the front-end driving the session.
#[derive(Debug)]
pub enum Turn {
    /// End the session. Only `exit`/`quit` produce this.
    Exit,
    /// Text to show the user: help, a command acknowledgement, or a plain
    /// model reply.
    Reply(String),
    /// The analyzer found an issue-worthy message; the user must review,
    /// edit, and explicitly confirm this draft before it may be published.
    Review(IssueDraft),
    /// The user asked to create an issue manually; the front-end collects
    /// type, title, description, and labels, then joins the review flow.
    ManualDraft,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One interactive session: the default-repository setting, the running
/// transcript, and the dispatch from raw input to a [`Turn`].
///
/// Processes exactly one input at a time; no state is shared across sessions.
/// A failed turn never ends the session.
pub struct Session {
    analyzer: Analyzer,
    completions: CompletionsClient,
    params: GenerationParams,
    default_repository: Option<String>,
    transcript: Transcript,
}

impl Session {
    pub fn new(completions: CompletionsClient, params: GenerationParams) -> Self {
        Self {
            analyzer: Analyzer::new(completions.clone(), params.clone()),
            completions,
            params,
            default_repository: None,
            transcript: Transcript::with_system(SYSTEM_PROMPT),
        }
    }

    pub fn default_repository(&self) -> Option<&str> {
        self.default_repository.as_deref()
    }

    pub fn set_default_repository(&mut self, repository: impl Into<String>) {
        self.default_repository = Some(repository.into());
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Record the outcome of a sub-flow (e.g. "created issue #7") so later
    /// free-text turns have it as conversational context.
    pub fn note(&mut self, text: impl Into<String>) {
        self.transcript.push_assistant(text);
    }

    /// Handle one input to completion and return to Idle.
    pub async fn handle(&mut self, input: &str) -> Turn {
        let input = input.trim();
        if input.is_empty() {
            return Turn::Reply("Type a message, or 'help' for commands.".to_string());
        }

        match input.to_ascii_lowercase().as_str() {
            "exit" | "quit" => return Turn::Exit,
            "help" => return Turn::Reply(HELP_TEXT.to_string()),
            "create issue" => return Turn::ManualDraft,
            _ => {}
        }

        if let Some(caps) = set_repo_regex().captures(input) {
            let candidate = &caps[1];
            return match parse_repository(candidate) {
                Ok((owner, repo)) => {
                    self.default_repository = Some(format!("{owner}/{repo}"));
                    Turn::Reply(format!("Default repository set to {owner}/{repo}."))
                }
                Err(e) => Turn::Reply(e.to_string()),
            };
        }

        self.free_text(input).await
    }

    /// Free text: analyze first; an issue-worthy verdict starts the review
    /// flow, everything else (including analyzer failures, which read as
    /// "no issue") falls through to a plain model reply.
    async fn free_text(&mut self, input: &str) -> Turn {
        self.transcript.push_user(input);

        let analysis = self.analyzer.analyze_lenient(input).await;
        if analysis.should_create_issue {
            return Turn::Review(analysis.into_draft());
        }

        match self
            .completions
            .complete(self.transcript.messages(), &self.params)
            .await
        {
            Ok(reply) => {
                self.transcript.push_assistant(&reply);
                Turn::Reply(reply)
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat reply failed");
                Turn::Reply(format!("The assistant is unavailable right now: {e}"))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IssueType;

    fn offline_session() -> Session {
        // Commands never touch the network, so a dead endpoint is fine here.
        Session::new(
            CompletionsClient::new("http://127.0.0.1:9", "t"),
            GenerationParams::default(),
        )
    }

    fn completion_body(content: &str) -> String {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string()
    }

    #[tokio::test]
    async fn exit_and_quit_end_the_session() {
        let mut session = offline_session();
        assert!(matches!(session.handle("exit").await, Turn::Exit));
        assert!(matches!(session.handle("QUIT").await, Turn::Exit));
    }

    #[tokio::test]
    async fn help_lists_commands_and_returns_to_idle() {
        let mut session = offline_session();
        let Turn::Reply(text) = session.handle("help").await else {
            panic!("expected Reply");
        };
        assert!(text.contains("set default repo to"));
        assert!(text.contains("create issue"));
    }

    #[tokio::test]
    async fn create_issue_starts_manual_collection() {
        let mut session = offline_session();
        assert!(matches!(session.handle("create issue").await, Turn::ManualDraft));
    }

    #[tokio::test]
    async fn set_default_repo_stores_repository() {
        let mut session = offline_session();
        let Turn::Reply(ack) = session.handle("set default repo to acme/widgets").await else {
            panic!("expected Reply");
        };
        assert!(ack.contains("acme/widgets"));
        assert_eq!(session.default_repository(), Some("acme/widgets"));
    }

    #[tokio::test]
    async fn set_default_repo_rejects_missing_slash_without_storing() {
        let mut session = offline_session();
        let Turn::Reply(msg) = session.handle("set default repo to widgets").await else {
            panic!("expected Reply");
        };
        assert!(msg.contains("owner/repo"));
        assert_eq!(session.default_repository(), None);
    }

    #[tokio::test]
    async fn set_default_repository_accepts_long_form() {
        let mut session = offline_session();
        session.handle("Set default repository to acme/widgets").await;
        assert_eq!(session.default_repository(), Some("acme/widgets"));
    }

    #[tokio::test]
    async fn issue_worthy_input_yields_review_draft() {
        let verdict = r#"{"shouldCreateIssue":true,"type":"bug","title":"Login fails on Safari","description":"...","labels":["bug"],"reasoning":"..."}"#;
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(verdict))
            .create_async()
            .await;

        let mut session = Session::new(
            CompletionsClient::new(server.url(), "t"),
            GenerationParams::default(),
        );
        let Turn::Review(draft) = session.handle("the login page crashes on Safari").await else {
            panic!("expected Review");
        };
        assert_eq!(draft.issue_type, IssueType::Bug);
        assert_eq!(draft.title, "Login fails on Safari");
        assert_eq!(draft.labels, vec!["bug"]);
    }

    #[tokio::test]
    async fn non_issue_input_falls_through_to_plain_reply() {
        // The analyzer call and the chat call hit the same endpoint; a
        // non-JSON body makes the first read as "no issue" and serves as the
        // reply text for the second.
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("Happy to help! What are you working on?"))
            .expect(2)
            .create_async()
            .await;

        let mut session = Session::new(
            CompletionsClient::new(server.url(), "t"),
            GenerationParams::default(),
        );
        let Turn::Reply(reply) = session.handle("hello there").await else {
            panic!("expected Reply");
        };
        assert_eq!(reply, "Happy to help! What are you working on?");
        // system + user + assistant
        assert_eq!(session.transcript().len(), 3);
    }

    #[tokio::test]
    async fn upstream_failure_reports_and_keeps_session_alive() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("boom")
            .expect(2)
            .create_async()
            .await;

        let mut session = Session::new(
            CompletionsClient::new(server.url(), "t"),
            GenerationParams::default(),
        );
        let Turn::Reply(msg) = session.handle("hello").await else {
            panic!("expected Reply");
        };
        assert!(msg.contains("unavailable"));

        // The session still answers commands after a failed turn.
        assert!(matches!(session.handle("help").await, Turn::Reply(_)));
    }
}
