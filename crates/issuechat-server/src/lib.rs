pub mod embed;
pub mod routes;
pub mod state;

use axum::routing::post;
use axum::Router;
use issuechat_core::Config;
use tower_http::cors::{Any, CorsLayer};

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/analyze", post(routes::analyze::analyze))
        .route("/api/improve", post(routes::improve::improve))
        .route("/api/create-issue", post(routes::create_issue::create_issue))
        .fallback(embed::static_handler)
        .layer(cors)
        .with_state(app_state)
}

/// Start the issuechat web UI server.
///
/// The chat page is embedded in the binary via rust-embed; the three API
/// routes drive the analyze → review → publish flow for it.
pub async fn serve(config: Config, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    serve_on(config, listener, open_browser).await
}

/// Start the server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(
    config: Config,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(state::AppState::new(&config));

    tracing::info!("issuechat UI listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
