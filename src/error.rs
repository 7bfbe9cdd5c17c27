//! Error types.
//!
//! Two families, split by who reads them:
//!
//! - [`ToolError`] is what a tool handler returns. Its `Display` text is the
//!   `error` field of the failure envelope, so it is written for API callers.
//! - [`Error`] surfaces infrastructure failures: loading configuration,
//!   binding a port, accepting connections. Only `main` ever sees it.

use thiserror::Error;

/// A handled failure inside one tool request. Always answered with `400`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Missing, empty or out-of-range input, caught before any side effect.
    #[error("{0}")]
    Validation(String),

    /// Input present but not in the expected shape (dates, numbers, JSON).
    #[error("{0}")]
    Parse(String),

    /// Outbound fetch failed: connect error, timeout, unreadable body.
    #[error("{0}")]
    Network(String),
}

impl ToolError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Short machine-readable label, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Parse(_)      => "parse",
            Self::Network(_)    => "network",
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(format!("Invalid request body: {e}"))
    }
}

/// The error type returned by the server's fallible operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address `{0}`")]
    InvalidAddress(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
