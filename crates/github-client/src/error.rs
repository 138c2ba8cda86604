use thiserror::Error;

#[derive(Debug, Error)]
pub enum GithubClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned {status}: {body}")]
    Api {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("completion response contained no choices")]
    NoChoices,
}
