use std::path::PathBuf;

/// Errors surfaced by relwatch. Remote failures during report building are
/// usually logged and collapsed by the adapters instead of reaching `main`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    ConfigValidation(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Jira transport, status or payload failure.
    #[error("issue tracker error: {0}")]
    Tracker(String),

    /// GitLab merge-request lookup failure.
    #[error("review system error: {0}")]
    Review(String),

    #[error("delivery error: {0}")]
    Delivery(String),
}

pub type Result<T> = std::result::Result<T, Error>;
