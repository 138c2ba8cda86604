use thiserror::Error;

#[derive(Debug, Error)]
pub enum IssueChatError {
    #[error("upstream call failed: {0}")]
    Upstream(#[from] github_client::GithubClientError),

    #[error("analysis response was not valid JSON: {source}\n  raw: {raw}")]
    Analysis {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("improvement response was not valid JSON: {source}\n  raw: {raw}")]
    Improvement {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid repository '{0}': expected owner/repo")]
    InvalidRepository(String),
}
