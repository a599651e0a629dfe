use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("API key cannot be used in an Authorization header")]
    InvalidApiKey,

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("response did not contain message content")]
    MissingContent,
}

pub type Result<T> = std::result::Result<T, GenerationError>;
