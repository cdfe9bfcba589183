use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlertgenError {
    #[error("Error communicating with API: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Please enter a message")]
    EmptyInput,

    #[error("API did not return a configuration (status: {})", .status.as_deref().unwrap_or("missing"))]
    NotSuccess { status: Option<String> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AlertgenError {
    /// Network or HTTP-layer failure, as opposed to a failure while
    /// interpreting a response that did arrive.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, AlertgenError>;
