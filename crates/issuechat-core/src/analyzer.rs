use github_client::{ChatMessage, CompletionsClient, GenerationParams};

use crate::error::IssueChatError;
use crate::types::Analysis;
use crate::Result;

/// Fixed instruction sent as the system message of every analysis call. The
/// decision policy lives entirely in the model; this crate only parses the
/// answer.
const ANALYZER_INSTRUCTION: &str = r#"You help people turn chat messages into GitHub issues.

Decide whether the user's message describes something worth filing as an issue: a bug report, a feature request, a task, or a documentation change. Only say yes for specific, actionable descriptions. Vague complaints, questions, and small talk are not issues.

Respond with exactly one JSON object and nothing else:
{
  "shouldCreateIssue": true or false,
  "type": "bug" | "feature" | "task" | "documentation" | "general",
  "title": "concise issue title",
  "description": "detailed issue description in markdown",
  "labels": ["suggested", "labels"],
  "reasoning": "one sentence explaining the decision"
}"#;

/// Strip an incidental Markdown code fence from model output.
///
/// Models frequently wrap the requested JSON in ``` or ```json fences even
/// when told not to. If the trimmed text starts with a fence, drop the
/// opening fence line (including any language tag) and the closing fence;
/// otherwise return the trimmed text unchanged.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some((_lang, body)) = rest.split_once('\n') else {
        return trimmed;
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

// ---------------------------------------------------------------------------
// Analyzer
// ---------------------------------------------------------------------------

/// Asks the model whether a user utterance should become an issue.
#[derive(Debug, Clone)]
pub struct Analyzer {
    client: CompletionsClient,
    params: GenerationParams,
}

impl Analyzer {
    pub fn new(client: CompletionsClient, params: GenerationParams) -> Self {
        Self { client, params }
    }

    /// Run one analysis call and parse the strict-JSON verdict.
    ///
    /// Fails when the completion call fails or when the (fence-stripped)
    /// response is not valid JSON. Callers that cannot surface the error must
    /// treat it as `should_create_issue == false`; see [`analyze_lenient`].
    ///
    /// [`analyze_lenient`]: Analyzer::analyze_lenient
    pub async fn analyze(&self, message: &str) -> Result<Analysis> {
        let messages = [
            ChatMessage::system(ANALYZER_INSTRUCTION),
            ChatMessage::user(message),
        ];
        let text = self.client.complete(&messages, &self.params).await?;

        match serde_json::from_str(strip_code_fences(&text)) {
            Ok(analysis) => Ok(analysis),
            Err(source) => Err(IssueChatError::Analysis { raw: text, source }),
        }
    }

    /// Like [`analyze`](Analyzer::analyze), but folds every failure into the
    /// safe default: a verdict with `should_create_issue == false`. Never
    /// assume issue creation on ambiguous output.
    pub async fn analyze_lenient(&self, message: &str) -> Analysis {
        match self.analyze(message).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(error = %e, "analysis failed; treating as no-issue");
                Analysis::no_issue()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
