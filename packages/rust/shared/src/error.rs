//! Error types for IntelScout.
//!
//! Library crates use [`IntelError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

/// Top-level error type for all IntelScout operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntelError {
    /// Runtime configuration is unusable (bad template, zero timeout, ...).
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error: timeout, connection failure, non-2xx status.
    #[error("network error: {0}")]
    Network(String),

    /// HTML parsing or snippet extraction error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Input validation error (blank subject, missing target, ...).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, IntelError>;

impl IntelError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a network error from any displayable message.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }
}
