//! Error types for chime
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, bad config, bad duration)
//! - 3: Blocked by role policy
//! - 4: Operation failed (terminal I/O, serialization)

use thiserror::Error;

/// Exit codes for the chime CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const ROLE_BLOCKED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for chime operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid duration '{input}': {reason}")]
    InvalidDuration { input: String, reason: String },

    // Role policy blocks (exit code 3)
    #[error("Role '{role}' may not {action}")]
    RoleDenied { role: String, action: String },

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_)
            | Error::InvalidArgument(_)
            | Error::InvalidDuration { .. } => exit_codes::USER_ERROR,

            Error::RoleDenied { .. } => exit_codes::ROLE_BLOCKED,

            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for chime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_bands() {
        assert_eq!(
            Error::InvalidArgument("x".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
        assert_eq!(
            Error::InvalidDuration {
                input: "xx".to_string(),
                reason: "not a number".to_string(),
            }
            .exit_code(),
            exit_codes::USER_ERROR
        );
        assert_eq!(
            Error::RoleDenied {
                role: "child".to_string(),
                action: "delete tasks".to_string(),
            }
            .exit_code(),
            exit_codes::ROLE_BLOCKED
        );
        assert_eq!(
            Error::OperationFailed("x".to_string()).exit_code(),
            exit_codes::OPERATION_FAILED
        );
    }

    #[test]
    fn role_denied_message_names_role_and_action() {
        let err = Error::RoleDenied {
            role: "child".to_string(),
            action: "delete tasks".to_string(),
        };
        assert_eq!(err.to_string(), "Role 'child' may not delete tasks");
    }
}
