//! `github-client` — typed HTTP clients for the two GitHub upstreams.
//!
//! The workspace talks to GitHub twice, with the same bearer token:
//!
//! ```text
//! CompletionsClient  → POST {inference}/chat/completions
//!                      OpenAI-compatible chat completions on the GitHub
//!                      Models inference endpoint; returns the text of the
//!                      first choice.
//!
//! IssuesClient       → POST {api}/repos/{owner}/{repo}/issues
//!                      GitHub REST issue creation; returns html_url + number.
//! ```
//!
//! Both clients are plain request/response wrappers: no retries, no streaming,
//! every failure is terminal for that single call. Callers decide how to
//! degrade (the analyzer falls back to "no issue", the publisher folds errors
//! into a `PublishResult`).

pub mod completions;
pub mod error;
pub mod issues;

pub use completions::{ChatMessage, CompletionsClient, GenerationParams, Role, DEFAULT_MODEL};
pub use error::GithubClientError;
pub use issues::{CreatedIssue, IssuesClient};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, GithubClientError>;

/// Default GitHub Models inference endpoint.
pub const DEFAULT_INFERENCE_URL: &str = "https://models.github.ai/inference";

/// Default GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
