//! Pseudo-streaming: repeated bounded queries instead of a live follow
//!
//! Used when a command family cannot be followed incrementally over the
//! available transport. The follow command is rewritten into a bounded
//! probe (`journalctl ... -f` loses its `-f` and gains `-n 50`; event
//! streams are windowed with `--since 5s`) which is re-issued on a fixed
//! interval.
//!
//! This is a documented approximation: lines can be duplicated or skipped
//! at poll boundaries, and latency degrades to the poll interval. It trades
//! fidelity for working at all.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::mpsc;

use super::{EVENT_CHANNEL_CAPACITY, FollowHandle, StreamEvent};
use crate::error::SessionError;
use crate::session::{SshSession, run_command};

/// Sleep between bounded re-queries of a pseudo-stream
pub const PSEUDO_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Lines fetched per probe for journal-style commands
const PSEUDO_TAIL_LINES: u32 = 50;

/// Window passed to `--since` for event-style commands
const PSEUDO_EVENT_WINDOW: &str = "5s";

/// Rewrites a follow command into a bounded probe that terminates.
fn bounded_probe(command: &str) -> String {
    if command.contains("journalctl") {
        let base: Vec<&str> = command
            .split_whitespace()
            .filter(|token| *token != "-f")
            .collect();
        format!("{} -n {PSEUDO_TAIL_LINES}", base.join(" "))
    } else {
        format!("{command} --since {PSEUDO_EVENT_WINDOW}")
    }
}

/// Simulates following `command` by re-issuing a bounded probe every
/// `interval`, emitting each non-empty result as one output chunk.
///
/// Stopping mid-probe takes effect once the in-flight probe returns, so the
/// cancellation latency is bounded by the probe runtime plus `interval`.
/// A probe failure is reported inline and ends the stream; the consumer may
/// start a new one.
#[must_use]
pub fn start_pseudo_stream(
    session: &Arc<SshSession>,
    command: &str,
    interval: Duration,
) -> (FollowHandle, mpsc::Receiver<StreamEvent>) {
    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let cancelled = Arc::new(AtomicBool::new(false));
    let handle = FollowHandle::new(Arc::clone(&cancelled), Arc::new(Mutex::new(None)));

    let session = Arc::clone(session);
    let probe = bounded_probe(command);

    std::thread::spawn(move || {
        tracing::debug!(probe = %probe, "pseudo-stream started");
        if event_tx
            .blocking_send(StreamEvent::Opened {
                command: probe.clone(),
            })
            .is_err()
        {
            return;
        }

        while !cancelled.load(Ordering::SeqCst) {
            match run_command(&session, &probe) {
                Ok(output) => {
                    let chunk = output.trim_end_matches(['\r', '\n']);
                    if !chunk.is_empty()
                        && event_tx
                            .blocking_send(StreamEvent::Line(chunk.to_string()))
                            .is_err()
                    {
                        return;
                    }
                }
                Err(e) => {
                    let error = SessionError::StreamRead {
                        reason: e.to_string(),
                    };
                    let _ = event_tx.blocking_send(StreamEvent::Error(error.to_string()));
                    break;
                }
            }
            if cancelled.load(Ordering::SeqCst) {
                break;
            }
            std::thread::sleep(interval);
        }
        let _ = event_tx.blocking_send(StreamEvent::Closed);
    });

    (handle, event_rx)
}
