use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridError {
    /// Network or connection failure talking to the dataset endpoint.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body could not be parsed as the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl GridError {
    /// True for failures of the transport itself (as opposed to a reply
    /// that arrived but could not be understood).
    pub fn is_transport(&self) -> bool {
        matches!(self, GridError::Transport(_))
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, GridError::MalformedResponse(_))
    }
}

pub type Result<T> = std::result::Result<T, GridError>;
