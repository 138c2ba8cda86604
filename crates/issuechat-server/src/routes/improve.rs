use axum::extract::State;
use axum::Json;
use issuechat_core::{Improvement, IssueDraft};

use crate::state::AppState;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveBody {
    pub issue_data: IssueDraft,
}

/// POST /api/improve — suggest a better title/description/labels for a draft.
///
/// Returns `null` when improvement fails; the page keeps the draft as typed.
/// Improvement is opt-in: the suggestion is only applied client-side after
/// the user accepts it.
pub async fn improve(
    State(app): State<AppState>,
    Json(body): Json<ImproveBody>,
) -> Json<Option<Improvement>> {
    Json(app.improver.improve_lenient(&body.issue_data).await)
}
