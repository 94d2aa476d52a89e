//! The polling loop behind every live stream
//!
//! The loop is generic over how channels are opened so the fallback,
//! commit, and cancellation logic can be exercised with scripted channels
//! in tests, the same way the metrics collector abstracts its exec callback.

use std::fmt::Write as _;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;

use super::StreamEvent;
use crate::error::{SessionError, SessionResult};
use crate::session::RemoteChannel;

/// Object-safe view of a stream channel, shared between the worker and the
/// stop handle.
pub(crate) trait StreamChannel: Send {
    /// Drains available bytes into `out`; `Ok(0)` means idle or EOF.
    fn read_available(&mut self, out: &mut Vec<u8>) -> io::Result<usize>;
    /// True once the remote process exited or the channel was closed.
    fn finished(&mut self) -> bool;
    /// Closes the channel; repeated calls are no-ops.
    fn close(&mut self);
}

impl StreamChannel for RemoteChannel {
    fn read_available(&mut self, out: &mut Vec<u8>) -> io::Result<usize> {
        Self::read_available(self, out)
    }

    fn finished(&mut self) -> bool {
        Self::finished(self)
    }

    fn close(&mut self) {
        Self::close(self);
    }
}

pub(crate) type BoxedChannel = Box<dyn StreamChannel>;

/// Locks the channel slot, recovering from a poisoned lock: a panicking
/// worker must not make `stop()` panic on the consumer thread too.
fn lock(slot: &Mutex<Option<BoxedChannel>>) -> MutexGuard<'_, Option<BoxedChannel>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Takes the channel out of the slot and closes it, if one is present.
pub(crate) fn close_slot(slot: &Mutex<Option<BoxedChannel>>) {
    if let Some(mut channel) = lock(slot).take() {
        channel.close();
    }
}

/// What one poll of the shared channel produced.
enum PollOutcome {
    /// Bytes were read.
    Data(Vec<u8>),
    /// Nothing available right now.
    Idle,
    /// The remote process exited.
    Finished,
    /// The stop handle already took and closed the channel.
    Gone,
    /// The read failed.
    Failed(io::Error),
}

fn poll_channel(slot: &Mutex<Option<BoxedChannel>>) -> PollOutcome {
    let mut guard = lock(slot);
    let Some(channel) = guard.as_mut() else {
        return PollOutcome::Gone;
    };
    let mut buf = Vec::new();
    match channel.read_available(&mut buf) {
        Ok(0) if channel.finished() => PollOutcome::Finished,
        Ok(0) => PollOutcome::Idle,
        Ok(_) => PollOutcome::Data(buf),
        Err(e) => PollOutcome::Failed(e),
    }
}

/// Decodes a chunk for delivery: lossy UTF-8, trailing newline stripped.
fn decode_chunk(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\r', '\n'])
        .to_string()
}

/// Runs candidate commands in order until one streams, delivering events
/// until cancellation, remote exit, or failure.
pub(crate) fn stream_loop<O>(
    candidates: &[String],
    open: &mut O,
    events: &mpsc::Sender<StreamEvent>,
    cancelled: &AtomicBool,
    slot: &Mutex<Option<BoxedChannel>>,
    poll_interval: Duration,
) where
    O: FnMut(&str) -> SessionResult<BoxedChannel>,
{
    let mut failures: Vec<(String, String)> = Vec::new();

    for command in candidates {
        if cancelled.load(Ordering::SeqCst) {
            let _ = events.blocking_send(StreamEvent::Closed);
            return;
        }

        let channel = match open(command) {
            Ok(channel) => channel,
            Err(e) => {
                tracing::debug!(command = %command, error = %e, "log command failed to start");
                failures.push((command.clone(), e.to_string()));
                continue;
            }
        };

        {
            let mut guard = lock(slot);
            if cancelled.load(Ordering::SeqCst) {
                // stop() raced the open; the channel is dropped closed.
                drop(guard);
                let _ = events.blocking_send(StreamEvent::Closed);
                return;
            }
            *guard = Some(channel);
        }

        if events
            .blocking_send(StreamEvent::Opened {
                command: command.clone(),
            })
            .is_err()
        {
            close_slot(slot);
            return;
        }

        // A candidate is committed once it has produced output; errors past
        // that point end the stream instead of advancing the chain.
        let mut produced_output = false;
        loop {
            if cancelled.load(Ordering::SeqCst) {
                close_slot(slot);
                let _ = events.blocking_send(StreamEvent::Closed);
                return;
            }

            match poll_channel(slot) {
                PollOutcome::Data(bytes) => {
                    produced_output = true;
                    if events
                        .blocking_send(StreamEvent::Line(decode_chunk(&bytes)))
                        .is_err()
                    {
                        close_slot(slot);
                        return;
                    }
                    std::thread::sleep(poll_interval);
                }
                PollOutcome::Idle => std::thread::sleep(poll_interval),
                PollOutcome::Finished => {
                    close_slot(slot);
                    let _ = events.blocking_send(StreamEvent::Closed);
                    return;
                }
                PollOutcome::Gone => {
                    let _ = events.blocking_send(StreamEvent::Closed);
                    return;
                }
                PollOutcome::Failed(e) => {
                    close_slot(slot);
                    if produced_output {
                        let error = SessionError::StreamRead {
                            reason: e.to_string(),
                        };
                        let _ = events.blocking_send(StreamEvent::Error(error.to_string()));
                        let _ = events.blocking_send(StreamEvent::Closed);
                        return;
                    }
                    tracing::debug!(
                        command = %command,
                        error = %e,
                        "log command failed before producing output"
                    );
                    failures.push((command.clone(), e.to_string()));
                    break;
                }
            }
        }
    }

    // Every candidate failed: exactly one aggregated report.
    let mut message = String::from("could not follow the requested log; all commands failed:");
    for (command, error) in &failures {
        let _ = write!(message, "\n  [{command}] {error}");
    }
    tracing::warn!(candidates = failures.len(), "log fallback chain exhausted");
    let _ = events.blocking_send(StreamEvent::Error(message));
    let _ = events.blocking_send(StreamEvent::Closed);
}
