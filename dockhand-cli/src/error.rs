//! CLI error types and exit codes.

use dockhand_core::config::ProfileError;
use dockhand_core::error::SessionError;

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - profile, validation, or command errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Connection failure - the SSH session could not be established or
    /// was lost
    pub const CONNECTION_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Profile store error
    #[error("Profile error: {0}")]
    Profile(String),

    /// Profile not found
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Remote command error
    #[error("Command error: {0}")]
    Command(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Exit code this error maps to.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Connection(_) => exit_codes::CONNECTION_FAILURE,
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}

impl From<ProfileError> for CliError {
    fn from(err: ProfileError) -> Self {
        Self::Profile(err.to_string())
    }
}

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotConnected { .. }
            | SessionError::Authentication { .. }
            | SessionError::Connectivity { .. } => Self::Connection(err.to_string()),
            SessionError::ChannelOpen { .. }
            | SessionError::Command { .. }
            | SessionError::StreamRead { .. }
            | SessionError::InvalidCommand(_) => Self::Command(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_failures_use_their_own_exit_code() {
        let err = CliError::from(SessionError::NotConnected {
            host: "h".to_string(),
        });
        assert_eq!(err.exit_code(), exit_codes::CONNECTION_FAILURE);

        let err = CliError::from(SessionError::InvalidCommand("empty".to_string()));
        assert_eq!(err.exit_code(), exit_codes::GENERAL_ERROR);
    }
}
