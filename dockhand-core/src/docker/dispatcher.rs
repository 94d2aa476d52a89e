//! Maps container intents onto commands and routes their results
//!
//! One-shot intents run the blocking executor on `spawn_blocking` so the
//! calling task (a GUI main loop, the CLI) never blocks on network I/O;
//! streaming intents hand back the worker's event receiver directly.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::commands::{
    ContainerAction, build_action_command, build_exec_command, build_inspect_command,
    build_ps_command, build_tail_command, server_log_candidates,
};
use super::containers::{ContainerRecord, parse_container_list};
use crate::error::{SessionError, SessionResult};
use crate::session::{SshSession, run_command};
use crate::stream;
use crate::stream::{FollowHandle, PSEUDO_POLL_INTERVAL, StreamEvent};

/// Translates application-level container intents into remote commands.
#[derive(Debug, Clone)]
pub struct DockerDispatcher {
    session: Arc<SshSession>,
}

impl DockerDispatcher {
    /// Creates a dispatcher issuing commands over `session`.
    #[must_use]
    pub fn new(session: Arc<SshSession>) -> Self {
        Self { session }
    }

    /// The session this dispatcher runs on.
    #[must_use]
    pub fn session(&self) -> &Arc<SshSession> {
        &self.session
    }

    /// Runs one blocking command on the worker pool.
    async fn run(&self, command: String) -> SessionResult<String> {
        let session = Arc::clone(&self.session);
        let for_error = command.clone();
        tokio::task::spawn_blocking(move || run_command(&session, &command))
            .await
            .map_err(|e| SessionError::Command {
                command: for_error,
                reason: format!("worker task failed: {e}"),
            })?
    }

    /// Lists all containers, parsed into records.
    pub async fn list_containers(&self) -> SessionResult<Vec<ContainerRecord>> {
        let output = self.run(build_ps_command()).await?;
        Ok(parse_container_list(&output))
    }

    /// Starts, stops, or restarts a container, returning whatever the
    /// Docker CLI printed.
    pub async fn container_action(
        &self,
        action: ContainerAction,
        name: &str,
    ) -> SessionResult<String> {
        self.run(build_action_command(action, name)).await
    }

    /// Fetches the last `tail_lines` log lines once.
    pub async fn tail_logs(&self, name: &str, tail_lines: u32) -> SessionResult<String> {
        self.run(build_tail_command(name, tail_lines)).await
    }

    /// Returns the container's inspect JSON as text.
    pub async fn inspect_container(&self, name: &str) -> SessionResult<String> {
        self.run(build_inspect_command(name)).await
    }

    /// Runs a shell snippet inside the container.
    ///
    /// Empty snippets are rejected before anything touches the network.
    pub async fn exec_in_container(&self, name: &str, snippet: &str) -> SessionResult<String> {
        let command = build_exec_command(name, snippet)?;
        self.run(command).await
    }

    /// Follows a container's log live.
    #[must_use]
    pub fn follow_logs(
        &self,
        name: &str,
        tail_lines: u32,
    ) -> (FollowHandle, mpsc::Receiver<StreamEvent>) {
        stream::start_follow(&self.session, name, tail_lines)
    }

    /// Follows the server-wide Docker log through the candidate chain
    /// (journal, journal via sudo, engine event stream).
    #[must_use]
    pub fn follow_server_log(&self) -> (FollowHandle, mpsc::Receiver<StreamEvent>) {
        stream::start_fallback_stream(&self.session, server_log_candidates())
    }

    /// Polls the server-wide Docker log with bounded queries instead of a
    /// live follow; see [`stream::start_pseudo_stream`] for the trade-offs.
    #[must_use]
    pub fn poll_server_log(&self) -> (FollowHandle, mpsc::Receiver<StreamEvent>) {
        let candidates = server_log_candidates();
        stream::start_pseudo_stream(&self.session, &candidates[0], PSEUDO_POLL_INTERVAL)
    }
}
