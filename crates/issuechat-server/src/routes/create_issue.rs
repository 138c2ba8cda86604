use axum::extract::State;
use axum::Json;
use issuechat_core::{parse_repository, PublishResult};

use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct CreateIssueBody {
    pub owner: String,
    pub repo: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// POST /api/create-issue — create the issue the user confirmed on the page.
///
/// Always answers 200 with a `PublishResult`; the page branches on `success`.
/// The repository is re-validated server-side before any call to the hosting
/// API, even though the page validates it too.
pub async fn create_issue(
    State(app): State<AppState>,
    Json(body): Json<CreateIssueBody>,
) -> Json<PublishResult> {
    let repository = format!("{}/{}", body.owner, body.repo);
    if let Err(e) = parse_repository(&repository) {
        return Json(PublishResult::failed(e.to_string()));
    }

    Json(
        app.publisher
            .publish(&body.owner, &body.repo, &body.title, &body.body, &body.labels)
            .await,
    )
}
