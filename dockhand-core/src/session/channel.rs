//! A single remote execution channel

use std::io::{self, Read};

/// Read buffer size for channel polls, matching the transport window
const READ_BUF_LEN: usize = 4096;

/// One remote process execution context within a session.
///
/// Owns the underlying transport channel exclusively. [`close`](Self::close)
/// is idempotent: the channel is closed exactly once no matter how often it
/// is called, including implicitly on drop.
pub struct RemoteChannel {
    channel: ssh2::Channel,
    command: String,
    closed: bool,
}

impl std::fmt::Debug for RemoteChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteChannel")
            .field("command", &self.command)
            .field("closed", &self.closed)
            .finish()
    }
}

impl RemoteChannel {
    pub(crate) fn new(channel: ssh2::Channel, command: &str) -> Self {
        Self {
            channel,
            command: command.to_string(),
            closed: false,
        }
    }

    /// The command this channel is executing.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns true once the channel has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Drains whatever stdout and stderr bytes are currently available into
    /// `out`, without blocking.
    ///
    /// Returns the number of bytes appended; `0` means nothing was ready
    /// (check [`finished`](Self::finished) to distinguish idle from EOF).
    /// A closed channel always reads as empty.
    ///
    /// # Errors
    ///
    /// Propagates transport read errors other than would-block.
    pub fn read_available(&mut self, out: &mut Vec<u8>) -> io::Result<usize> {
        if self.closed {
            return Ok(0);
        }

        let mut total = 0usize;
        let mut buf = [0u8; READ_BUF_LEN];

        loop {
            match self.channel.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    out.extend_from_slice(&buf[..n]);
                    total += n;
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) => return Err(e),
            }
        }
        loop {
            match self.channel.stderr().read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    out.extend_from_slice(&buf[..n]);
                    total += n;
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) => return Err(e),
            }
        }

        Ok(total)
    }

    /// Returns true once the remote side has sent EOF (the process exited)
    /// or the channel has been closed locally.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.closed || self.channel.eof()
    }

    /// Closes the channel. A second call is a no-op.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.channel.close() {
            // Non-blocking close can report would-block; the drop of the
            // underlying handle finishes the job either way.
            tracing::debug!(command = %self.command, error = %e, "channel close deferred");
        }
    }
}

impl Drop for RemoteChannel {
    fn drop(&mut self) {
        self.close();
    }
}
