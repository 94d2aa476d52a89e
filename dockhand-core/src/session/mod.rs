//! SSH transport session and remote command execution
//!
//! A [`SshSession`] owns one authenticated connection to a remote host and
//! issues execution channels from it. [`run_command`] runs a single command
//! to completion over such a channel; long-lived streaming lives in
//! [`crate::stream`].
//!
//! The transport is held in non-blocking mode after authentication, so every
//! read is a poll; callers that need to block simply loop with a short sleep
//! (see [`run_command`]). Channel creation is serialized under the session's
//! mutex because libssh2 sessions are not safe for concurrent channel setup.

mod channel;
mod exec;
mod transport;

pub use channel::RemoteChannel;
pub use exec::{EXEC_POLL_INTERVAL, run_command};
pub use transport::{Credential, DEFAULT_SSH_PORT, SshSession};
