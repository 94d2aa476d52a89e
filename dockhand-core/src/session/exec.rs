//! One-shot remote command execution

use std::time::Duration;

use super::transport::SshSession;
use crate::error::{SessionError, SessionResult};

/// Sleep between polls while waiting for one-shot command output
pub const EXEC_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs `command` to completion and returns its combined stdout and stderr
/// as one block of text, with undecodable bytes replaced.
///
/// Blocks the calling thread until the remote command's output is exhausted;
/// there is no timeout. Callers that need responsiveness must run this on a
/// worker thread, as [`crate::docker::DockerDispatcher`] does via
/// `spawn_blocking`. Exit codes are not interpreted: whatever the remote
/// process wrote is returned as-is.
///
/// # Errors
///
/// [`SessionError::NotConnected`] when the session is not live,
/// [`SessionError::ChannelOpen`] when channel setup fails, and
/// [`SessionError::Command`] when a read fails mid-way.
pub fn run_command(session: &SshSession, command: &str) -> SessionResult<String> {
    let mut channel = session.open_channel(command, false)?;
    let mut output = Vec::new();

    loop {
        match channel.read_available(&mut output) {
            Ok(0) => {
                if channel.finished() {
                    break;
                }
                std::thread::sleep(EXEC_POLL_INTERVAL);
            }
            Ok(_) => {}
            Err(e) => {
                channel.close();
                return Err(SessionError::Command {
                    command: command.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    channel.close();
    Ok(String::from_utf8_lossy(&output).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DEFAULT_SSH_PORT;

    #[test]
    fn run_command_on_disconnected_session_fails_fast() {
        let session = SshSession::new("example.org", DEFAULT_SSH_PORT, "deploy");
        let err = run_command(&session, "docker ps -a").unwrap_err();
        assert!(matches!(err, SessionError::NotConnected { .. }));
    }

    #[test]
    fn run_command_on_closed_session_fails_fast() {
        let session = SshSession::new("example.org", DEFAULT_SSH_PORT, "deploy");
        session.close();
        let err = run_command(&session, "docker inspect web").unwrap_err();
        assert!(matches!(err, SessionError::NotConnected { .. }));
    }
}
