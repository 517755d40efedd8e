use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("Invalid expense: {0}")]
    Validation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Remote service responded with {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
