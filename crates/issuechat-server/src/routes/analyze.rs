use axum::extract::State;
use axum::Json;
use issuechat_core::Analysis;

use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct AnalyzeBody {
    pub message: String,
}

/// POST /api/analyze — ask the model whether `message` should become an issue.
///
/// Always answers 200: analyzer failures (upstream down, unparsable output)
/// read as `shouldCreateIssue: false`, so the page falls back to a plain chat
/// turn instead of an error screen.
pub async fn analyze(
    State(app): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> Json<Analysis> {
    tracing::debug!(chars = body.message.len(), "analyzing message");
    Json(app.analyzer.analyze_lenient(&body.message).await)
}
