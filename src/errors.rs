use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Reputation database operations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Transaction feed operations
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// Notification delivery
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Transaction feed error types
///
/// Each variant is returned together with the transactions gathered before
/// the failure, see [`crate::feed::FeedOutcome`].
#[derive(Error, Debug)]
pub enum FeedError {
    /// Network or transport failure, including request timeouts
    #[error("Request failed: {0}")]
    Transport(String),

    /// Response body was not the expected JSON document
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Upstream answered with a non-success result, after the one retry
    #[error("{message}")]
    Upstream { message: String },

    /// Endpoint could not be turned into a request URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Notification delivery error types
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Send failed: {0}")]
    Transport(String),

    #[error("Payload encoding failed: {0}")]
    Encode(String),

    #[error("Message rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Result type for notification operations
pub type NotifyResult<T> = Result<T, NotifyError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

// reqwest puts the request URL in its message, and both URLs carry a secret
// (the feed's api_key query parameter, the bot token in the path).
impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_decode() {
            FeedError::Decode(err.to_string())
        } else {
            FeedError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        NotifyError::Transport(err.without_url().to_string())
    }
}

impl From<serde_json::Error> for NotifyError {
    fn from(err: serde_json::Error) -> Self {
        NotifyError::Encode(err.to_string())
    }
}
