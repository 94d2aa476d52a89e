//! Long-lived, cancellable log streaming
//!
//! A stream runs a remote command on a pty-backed channel from a dedicated
//! worker thread, polls it for output, and delivers [`StreamEvent`]s over a
//! `tokio` mpsc channel that the consumer drains from its own loop. The
//! worker checks a shared cancellation flag once per poll, so
//! [`FollowHandle::stop`] takes effect within one polling interval.
//!
//! Two variants exist beyond the plain single-command follow:
//!
//! - [`start_fallback_stream`] walks an ordered list of candidate commands
//!   until one of them streams, collecting the per-candidate errors into a
//!   single aggregated report if all of them fail;
//! - [`start_pseudo_stream`] simulates streaming with repeated bounded
//!   queries when a command family cannot be followed incrementally.

mod pseudo;
mod worker;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::docker;
use crate::session::SshSession;
use worker::BoxedChannel;

pub use pseudo::{PSEUDO_POLL_INTERVAL, start_pseudo_stream};

/// Sleep between polls of a live stream channel
pub const STREAM_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Capacity of the event channel between worker and consumer
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Events delivered to the consumer of a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A candidate command was started; output events follow.
    Opened {
        /// The command now running.
        command: String,
    },
    /// A chunk of output, decoded lossily and stripped of its trailing
    /// newline. Interleaving of stdout and stderr is preserved as polled.
    Line(String),
    /// A failure, rendered as text so partially streamed output stays
    /// visible. Either a mid-stream read error or, when every candidate of
    /// a fallback chain failed, one aggregated report naming each command
    /// and its error.
    Error(String),
    /// The stream ended: stopped, remote exit, or failure already reported.
    /// Always the final event.
    Closed,
}

/// Handle to cancel a running stream.
///
/// Dropping the handle does not stop the stream (the consumer may still be
/// draining events); call [`stop`](Self::stop).
pub struct FollowHandle {
    cancelled: Arc<AtomicBool>,
    channel: Arc<Mutex<Option<BoxedChannel>>>,
}

impl std::fmt::Debug for FollowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FollowHandle")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

impl FollowHandle {
    fn new(cancelled: Arc<AtomicBool>, channel: Arc<Mutex<Option<BoxedChannel>>>) -> Self {
        Self { cancelled, channel }
    }

    /// Requests cancellation and closes the underlying channel to unblock
    /// the worker.
    ///
    /// Idempotent, and safe to call before the worker has opened a channel
    /// or after the stream already ended; those calls are no-ops.
    pub fn stop(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        worker::close_slot(&self.channel);
    }

    /// Returns true once [`stop`](Self::stop) has been called.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Follows a container's log: `docker logs --tail <n> -f <name>` on a
/// pty-backed channel.
///
/// Returns immediately; output arrives on the receiver. Stop with the
/// returned handle, or let the stream end when the remote side exits.
#[must_use]
pub fn start_follow(
    session: &Arc<SshSession>,
    container: &str,
    tail_lines: u32,
) -> (FollowHandle, mpsc::Receiver<StreamEvent>) {
    let command = docker::build_follow_command(container, tail_lines);
    start_fallback_stream(session, vec![command])
}

/// Streams the first candidate command that works, in order.
///
/// A candidate that fails to open, or fails before producing any output, is
/// recorded and the next one is tried. Once a candidate has produced output
/// the stream is committed to it: later errors are reported inline and end
/// the stream without further fallback. If every candidate fails, exactly
/// one aggregated [`StreamEvent::Error`] lists each command with its error.
#[must_use]
pub fn start_fallback_stream(
    session: &Arc<SshSession>,
    candidates: Vec<String>,
) -> (FollowHandle, mpsc::Receiver<StreamEvent>) {
    let session = Arc::clone(session);
    spawn_stream(
        candidates,
        move |command| {
            session
                .open_channel(command, true)
                .map(|ch| Box::new(ch) as BoxedChannel)
        },
        STREAM_POLL_INTERVAL,
    )
}

/// Wires a worker thread around the generic stream loop.
pub(crate) fn spawn_stream<O>(
    candidates: Vec<String>,
    mut open: O,
    poll_interval: Duration,
) -> (FollowHandle, mpsc::Receiver<StreamEvent>)
where
    O: FnMut(&str) -> crate::error::SessionResult<BoxedChannel> + Send + 'static,
{
    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let cancelled = Arc::new(AtomicBool::new(false));
    let slot: Arc<Mutex<Option<BoxedChannel>>> = Arc::new(Mutex::new(None));
    let handle = FollowHandle::new(Arc::clone(&cancelled), Arc::clone(&slot));

    std::thread::spawn(move || {
        worker::stream_loop(&candidates, &mut open, &event_tx, &cancelled, &slot, poll_interval);
    });

    (handle, event_rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_before_any_channel_opened_is_a_noop() {
        let handle = FollowHandle::new(
            Arc::new(AtomicBool::new(false)),
            Arc::new(Mutex::new(None)),
        );
        assert!(!handle.is_stopped());
        handle.stop();
        handle.stop();
        assert!(handle.is_stopped());
    }

    #[test]
    fn follow_on_disconnected_session_reports_aggregated_failure() {
        let session = Arc::new(SshSession::new("example.org", 22, "deploy"));
        let (_handle, mut rx) = start_follow(&session, "web", 200);

        let mut saw_error = false;
        loop {
            match rx.blocking_recv() {
                Some(StreamEvent::Error(message)) => {
                    saw_error = true;
                    assert!(message.contains("docker logs --tail 200 -f web"));
                    assert!(message.contains("not connected"));
                }
                Some(StreamEvent::Closed) | None => break,
                Some(other) => panic!("unexpected event: {other:?}"),
            }
        }
        assert!(saw_error);
    }
}
