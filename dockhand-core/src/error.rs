//! Error types for remote session, execution, and streaming operations
//!
//! Transport-level failures (`ssh2`, socket I/O) are converted into these
//! variants at the component boundary; raw transport errors never reach
//! consumers of the library.

/// Errors raised by the session, executor, and streamer components.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// An operation was requested while no live connection exists.
    ///
    /// Reported immediately, before any network activity; never retried.
    #[error("not connected to {host}")]
    NotConnected {
        /// Host the session was created for.
        host: String,
    },

    /// Authentication was rejected during `connect`.
    #[error("authentication failed for {user}@{host}: {source}")]
    Authentication {
        /// Username that failed to authenticate.
        user: String,
        /// Target host.
        host: String,
        /// Underlying transport error.
        #[source]
        source: ssh2::Error,
    },

    /// The host could not be reached or the transport handshake failed.
    #[error("cannot reach {host}:{port}: {reason}")]
    Connectivity {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
        /// Description of the failure.
        reason: String,
    },

    /// Opening a remote execution channel failed.
    #[error("failed to open channel for `{command}`: {reason}")]
    ChannelOpen {
        /// Command the channel was opened for.
        command: String,
        /// Description of the failure.
        reason: String,
    },

    /// A one-shot command failed while its output was being read.
    ///
    /// Non-zero exit codes are not an error: whatever text the remote
    /// process wrote is returned as-is.
    #[error("command `{command}` failed: {reason}")]
    Command {
        /// The command that was running.
        command: String,
        /// Description of the read failure.
        reason: String,
    },

    /// A streaming read failed after output had started flowing.
    ///
    /// Surfaced to stream consumers as an inline [`StreamEvent::Error`]
    /// line so that already-delivered output is preserved.
    ///
    /// [`StreamEvent::Error`]: crate::stream::StreamEvent::Error
    #[error("log stream interrupted: {reason}")]
    StreamRead {
        /// Description of the read failure.
        reason: String,
    },

    /// A command string was rejected before any remote call was made.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
