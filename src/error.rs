//! Error types for taskdeck
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad form input, bad credentials, bad args, bad config)
//! - 4: Operation failed (I/O, serialization)
//!
//! Storage failures never reach this type from the persistence adapter:
//! they are logged and downgraded to a no-op there. Missing-id mutations
//! are silent no-ops, not errors.

use thiserror::Error;

/// Exit codes for the td CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for taskdeck operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Structured details for JSON error envelopes
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::Validation { field, .. } => Some(serde_json::json!({ "field": field })),
            _ => None,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Validation { .. }
            | Error::Auth(_)
            | Error::InvalidArgument(_)
            | Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for taskdeck operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_exit_with_2() {
        assert_eq!(
            Error::validation("email", "not an email").exit_code(),
            exit_codes::USER_ERROR
        );
        assert_eq!(
            Error::Auth("password too short".into()).exit_code(),
            exit_codes::USER_ERROR
        );
        assert_eq!(
            Error::InvalidConfig("login_delay_ms out of range".into()).exit_code(),
            exit_codes::USER_ERROR
        );
    }

    #[test]
    fn operation_errors_exit_with_4() {
        let io = Error::Io(std::io::Error::other("disk"));
        assert_eq!(io.exit_code(), exit_codes::OPERATION_FAILED);
        assert_eq!(
            Error::OperationFailed("import".into()).exit_code(),
            exit_codes::OPERATION_FAILED
        );
    }

    #[test]
    fn validation_message_names_the_field() {
        let err = Error::validation("title", "must be at least 3 characters");
        assert_eq!(
            err.to_string(),
            "Validation failed: title: must be at least 3 characters"
        );
    }
}
