//! Error types for habitlog.
//!
//! Expected outcomes such as "habit not registered" are reported as
//! `Ok(false)` / `Ok(None)` by the store. The variants here cover the
//! conditions a caller has to handle explicitly.

use thiserror::Error;

/// Errors raised by the habit store, configuration, and shell.
#[derive(Debug, Error)]
pub enum HabitError {
    /// A referenced habit or log entry does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An operation was called with arguments it cannot act on.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A habit name cannot be used as a log table identifier.
    #[error("Invalid habit name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A rename would collide with another registered habit.
    #[error("Habit already exists: {0}")]
    AlreadyExists(String),

    /// The underlying `SQLite` store failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration could not be resolved, read, or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O failure while talking to the terminal or filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Standard input was closed while a prompt was waiting.
    #[error("Input closed")]
    InputClosed,
}

impl HabitError {
    /// Build an `InvalidName` error.
    pub fn invalid_name(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the error only asks the caller to try again with other input.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::InvalidArgument(_)
                | Self::InvalidName { .. }
                | Self::AlreadyExists(_)
        )
    }
}
