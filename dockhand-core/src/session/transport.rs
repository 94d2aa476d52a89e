//! Authenticated SSH session handling

use std::net::TcpStream;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use super::channel::RemoteChannel;
use crate::error::{SessionError, SessionResult};

/// Default SSH port used when a profile does not specify one
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Sleep between retries of a channel-setup call that would block
const OPEN_RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// `libssh2` error code returned when a non-blocking call would block
const LIBSSH2_ERROR_EAGAIN: i32 = -37;

/// Returns true if the transport error is a non-blocking "try again".
fn is_would_block(err: &ssh2::Error) -> bool {
    matches!(err.code(), ssh2::ErrorCode::Session(LIBSSH2_ERROR_EAGAIN))
}

/// Retries a transport call until it completes or fails for real.
fn retry_would_block<T>(mut op: impl FnMut() -> Result<T, ssh2::Error>) -> Result<T, ssh2::Error> {
    loop {
        match op() {
            Err(e) if is_would_block(&e) => std::thread::sleep(OPEN_RETRY_INTERVAL),
            result => return result,
        }
    }
}

/// Credential used to authenticate a session.
#[derive(Debug, Clone)]
pub enum Credential {
    /// Password authentication. The secret is only exposed at the
    /// `userauth_password` call site.
    Password(SecretString),
    /// Public-key authentication with a private key file on disk.
    KeyFile(PathBuf),
}

/// One authenticated connection to a remote host.
///
/// Created disconnected; [`connect`](Self::connect) establishes and
/// authenticates the transport. All channels opened from the session become
/// invalid once [`close`](Self::close) is called: their pending reads report
/// an error or EOF instead of hanging.
///
/// # Host key policy
///
/// Unknown host keys are accepted automatically (trust-on-first-use), which
/// reproduces the behavior Dockhand has always had. Deployments that need
/// pinned host keys should verify the key out of band; making the policy
/// configurable is tracked as a hardening follow-up.
pub struct SshSession {
    host: String,
    port: u16,
    username: String,
    /// Live transport, `None` while disconnected. Also serializes channel
    /// creation, which libssh2 does not allow concurrently.
    transport: Mutex<Option<ssh2::Session>>,
}

impl std::fmt::Debug for SshSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SshSession")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl SshSession {
    /// Creates a disconnected session for `user@host:port`.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, username: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            transport: Mutex::new(None),
        }
    }

    /// Target host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Target port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Username the session authenticates as.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns true while an authenticated transport is held.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.transport.lock().unwrap().is_some()
    }

    /// Connects and authenticates.
    ///
    /// A successful call replaces any previously held transport. The
    /// handshake and authentication run in blocking mode; the session is
    /// switched to non-blocking afterwards so that all later reads poll.
    ///
    /// # Errors
    ///
    /// [`SessionError::Connectivity`] if the TCP connection or handshake
    /// fails, [`SessionError::Authentication`] if the credential is
    /// rejected.
    pub fn connect(&self, credential: &Credential) -> SessionResult<()> {
        let connectivity = |reason: String| SessionError::Connectivity {
            host: self.host.clone(),
            port: self.port,
            reason,
        };

        let tcp = TcpStream::connect((self.host.as_str(), self.port))
            .map_err(|e| connectivity(e.to_string()))?;

        let mut sess = ssh2::Session::new().map_err(|e| connectivity(e.to_string()))?;
        sess.set_tcp_stream(tcp);
        sess.handshake().map_err(|e| connectivity(e.to_string()))?;

        let auth = |source: ssh2::Error| SessionError::Authentication {
            user: self.username.clone(),
            host: self.host.clone(),
            source,
        };
        match credential {
            Credential::Password(password) => sess
                .userauth_password(&self.username, password.expose_secret())
                .map_err(auth)?,
            Credential::KeyFile(key_path) => sess
                .userauth_pubkey_file(&self.username, None, key_path, None)
                .map_err(auth)?,
        }

        sess.set_blocking(false);

        tracing::debug!(
            host = %self.host,
            port = self.port,
            user = %self.username,
            "SSH session established"
        );

        *self.transport.lock().unwrap() = Some(sess);
        Ok(())
    }

    /// Opens an execution channel running `command`.
    ///
    /// `want_pty` requests a pseudo-terminal before exec; commands followed
    /// live (`docker logs -f`, `journalctl -f`) need one, structured
    /// one-shot commands must not use one.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotConnected`] if the session is not live (no
    /// network call is made in that case), [`SessionError::ChannelOpen`] if
    /// channel setup fails.
    pub fn open_channel(&self, command: &str, want_pty: bool) -> SessionResult<RemoteChannel> {
        let mut guard = self.transport.lock().unwrap();
        let Some(sess) = guard.as_mut() else {
            return Err(SessionError::NotConnected {
                host: self.host.clone(),
            });
        };

        let channel_open = |source: ssh2::Error| SessionError::ChannelOpen {
            command: command.to_string(),
            reason: source.to_string(),
        };

        let mut channel = retry_would_block(|| sess.channel_session()).map_err(channel_open)?;
        if want_pty {
            retry_would_block(|| channel.request_pty("xterm", None, None))
                .map_err(channel_open)?;
        }
        retry_would_block(|| channel.exec(command)).map_err(channel_open)?;

        tracing::debug!(command, want_pty, "remote channel opened");
        Ok(RemoteChannel::new(channel, command))
    }

    /// Releases the transport.
    ///
    /// Safe to call multiple times; calls on a disconnected session are a
    /// no-op. Channels opened from the session become invalid.
    pub fn close(&self) {
        let mut guard = self.transport.lock().unwrap();
        if let Some(sess) = guard.take() {
            // Best-effort goodbye; the socket is dropped either way.
            let _ = sess.disconnect(None, "session closed", None);
            tracing::debug!(host = %self.host, "SSH session closed");
        }
    }
}

impl Drop for SshSession {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_disconnected() {
        let session = SshSession::new("example.org", DEFAULT_SSH_PORT, "deploy");
        assert!(!session.is_connected());
        assert_eq!(session.host(), "example.org");
        assert_eq!(session.port(), 22);
        assert_eq!(session.username(), "deploy");
    }

    #[test]
    fn open_channel_fails_fast_when_disconnected() {
        let session = SshSession::new("example.org", DEFAULT_SSH_PORT, "deploy");
        let err = session.open_channel("docker ps -a", false).unwrap_err();
        assert!(matches!(err, SessionError::NotConnected { .. }));
    }

    #[test]
    fn close_is_idempotent() {
        let session = SshSession::new("example.org", DEFAULT_SSH_PORT, "deploy");
        session.close();
        session.close();
        assert!(!session.is_connected());
    }

    #[test]
    fn open_channel_after_close_fails_with_not_connected() {
        let session = SshSession::new("example.org", DEFAULT_SSH_PORT, "deploy");
        session.close();
        let err = session.open_channel("docker ps -a", true).unwrap_err();
        assert!(matches!(err, SessionError::NotConnected { host } if host == "example.org"));
    }
}
