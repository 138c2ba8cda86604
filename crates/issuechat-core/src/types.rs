use github_client::ChatMessage;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// IssueType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    Bug,
    Feature,
    Task,
    Documentation,
    /// Fallback for anything the model labels with an unknown type.
    #[default]
    #[serde(other)]
    General,
}

impl IssueType {
    pub fn all() -> &'static [IssueType] {
        &[
            IssueType::Bug,
            IssueType::Feature,
            IssueType::Task,
            IssueType::Documentation,
            IssueType::General,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IssueType::Bug => "bug",
            IssueType::Feature => "feature",
            IssueType::Task => "task",
            IssueType::Documentation => "documentation",
            IssueType::General => "general",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IssueType {
    type Err = ();

    /// Lenient: unknown strings map to `General` rather than failing, since
    /// both the model and the user type these freely.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "bug" => IssueType::Bug,
            "feature" => IssueType::Feature,
            "task" => IssueType::Task,
            "documentation" | "docs" => IssueType::Documentation,
            _ => IssueType::General,
        })
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// The analyzer's verdict on one user utterance. Field names mirror the JSON
/// contract the model is instructed to produce.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    #[serde(default)]
    pub should_create_issue: bool,
    #[serde(default, rename = "type")]
    pub issue_type: IssueType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
}

impl Analysis {
    /// The safe default: never assume issue creation on ambiguous output.
    pub fn no_issue() -> Self {
        Self::default()
    }

    pub fn into_draft(self) -> IssueDraft {
        IssueDraft {
            issue_type: self.issue_type,
            title: self.title,
            description: self.description,
            labels: self.labels,
            reasoning: self.reasoning,
        }
    }
}

// ---------------------------------------------------------------------------
// IssueDraft
// ---------------------------------------------------------------------------

/// An issue in the making: produced by the analyzer or entered manually,
/// edited by the user, optionally rewritten by the improver, and consumed
/// exactly once by the publisher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDraft {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub title: String,
    /// Markdown body.
    pub description: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
}

impl IssueDraft {
    /// Overwrite the draft with the improver's suggestions. Only called after
    /// the user accepted them; a declined or failed improvement leaves the
    /// draft untouched.
    pub fn apply_improvement(&mut self, improvement: &Improvement) {
        self.title = improvement.improved_title.clone();
        self.description = improvement.improved_description.clone();
        self.labels = improvement.suggested_labels.clone();
    }
}

// ---------------------------------------------------------------------------
// Improvement
// ---------------------------------------------------------------------------

/// The improver's suggested rewrite of a draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    pub improved_title: String,
    pub improved_description: String,
    #[serde(default)]
    pub suggested_labels: Vec<String>,
    #[serde(default)]
    pub changes_summary: String,
}

// ---------------------------------------------------------------------------
// PublishResult
// ---------------------------------------------------------------------------

/// Uniform outcome of one publish attempt. Callers branch on `success`,
/// never on a propagated error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PublishResult {
    pub fn published(issue_url: impl Into<String>, issue_number: u64) -> Self {
        Self {
            success: true,
            issue_url: Some(issue_url.into()),
            issue_number: Some(issue_number),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            issue_url: None,
            issue_number: None,
            error: Some(error.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// Append-only, in-memory conversation history for one session. Discarded at
/// process exit.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// A transcript seeded with a system prompt.
    pub fn with_system(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(prompt)],
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
