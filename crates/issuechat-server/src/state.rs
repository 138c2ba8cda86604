use issuechat_core::{Analyzer, Config, Improver, Publisher};

/// Shared application state passed to all route handlers.
///
/// Holds only the upstream clients; conversation state (transcript, default
/// repository) lives in the browser for the duration of one page load, so the
/// server stays stateless across requests.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    pub improver: Improver,
    pub publisher: Publisher,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let completions = config.completions_client();
        let params = config.generation_params();
        Self {
            analyzer: Analyzer::new(completions.clone(), params.clone()),
            improver: Improver::new(completions, params),
            publisher: Publisher::new(config.issues_client()),
        }
    }
}
