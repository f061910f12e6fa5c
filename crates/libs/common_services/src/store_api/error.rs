use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to build request URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Remote server returned {status}: {body}")]
    RemoteServer { status: u16, body: String },

    #[error("Remote server returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}
