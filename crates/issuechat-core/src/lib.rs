//! `issuechat-core` — domain logic for the issue-writing chat assistant.
//!
//! The flow: a user utterance goes to the analyzer, which asks the model
//! whether the text describes something issue-worthy and returns a draft.
//! The user reviews and edits the draft (optionally asking the improver for a
//! better title/description), explicitly confirms, and only then does the
//! publisher create the issue. The [`session::Session`] state machine drives
//! one input at a time and is shared by the CLI loop and the web handlers.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod improver;
pub mod publisher;
pub mod session;
pub mod types;

pub use analyzer::Analyzer;
pub use config::Config;
pub use error::IssueChatError;
pub use improver::Improver;
pub use publisher::{parse_repository, Publisher};
pub use session::{Session, Turn};
pub use types::{Analysis, Improvement, IssueDraft, IssueType, PublishResult, Transcript};

pub type Result<T> = std::result::Result<T, IssueChatError>;
