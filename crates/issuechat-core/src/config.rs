use github_client::{
    CompletionsClient, GenerationParams, IssuesClient, DEFAULT_API_URL, DEFAULT_INFERENCE_URL,
};

/// Runtime configuration for one process: the single bearer token shared by
/// both upstreams, the model to use, and the endpoint base URLs (overridable
/// for tests).
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub model: String,
    pub inference_url: String,
    pub api_url: String,
}

impl Config {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            model: GenerationParams::default().model,
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn completions_client(&self) -> CompletionsClient {
        CompletionsClient::new(&self.inference_url, &self.token)
    }

    pub fn issues_client(&self) -> IssuesClient {
        IssuesClient::new(&self.api_url, &self.token)
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            model: self.model.clone(),
            ..GenerationParams::default()
        }
    }
}
