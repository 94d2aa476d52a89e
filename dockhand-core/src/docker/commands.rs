//! Shell command templates for the Docker CLI

use std::fmt;

use crate::error::{SessionError, SessionResult};

/// `docker ps` format string producing `name;image;status;ports` rows
pub const PS_FORMAT: &str = "{{.Names}};{{.Image}};{{.Status}};{{.Ports}}";

/// Default number of lines for a one-shot log tail
pub const DEFAULT_TAIL_LINES: u32 = 500;

/// Default number of backlog lines when starting a live follow
pub const DEFAULT_FOLLOW_TAIL_LINES: u32 = 200;

/// Lifecycle actions that map onto `docker <action> <name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerAction {
    /// `docker start`
    Start,
    /// `docker stop`
    Stop,
    /// `docker restart`
    Restart,
}

impl ContainerAction {
    /// The Docker CLI verb for this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
        }
    }
}

impl fmt::Display for ContainerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lists all containers with the semicolon-delimited format.
#[must_use]
pub fn build_ps_command() -> String {
    format!("docker ps -a --format '{PS_FORMAT}'")
}

/// Starts, stops, or restarts a container.
#[must_use]
pub fn build_action_command(action: ContainerAction, name: &str) -> String {
    format!("docker {action} {name}")
}

/// Fetches the last `tail_lines` log lines once.
#[must_use]
pub fn build_tail_command(name: &str, tail_lines: u32) -> String {
    format!("docker logs --tail {tail_lines} {name}")
}

/// Follows the log after a `tail_lines` backlog.
#[must_use]
pub fn build_follow_command(name: &str, tail_lines: u32) -> String {
    format!("docker logs --tail {tail_lines} -f {name}")
}

/// Dumps the container's full inspect JSON.
#[must_use]
pub fn build_inspect_command(name: &str) -> String {
    format!("docker inspect {name}")
}

/// Runs a user-supplied shell snippet inside the container via
/// `sh -lc <snippet>`.
///
/// The snippet is passed as a single shell-quoted token, so it cannot
/// terminate the `sh -lc` argument early no matter what it contains.
///
/// # Errors
///
/// [`SessionError::InvalidCommand`] if the snippet is empty or whitespace
/// only; nothing is sent to the remote host in that case.
pub fn build_exec_command(name: &str, snippet: &str) -> SessionResult<String> {
    let snippet = snippet.trim();
    if snippet.is_empty() {
        return Err(SessionError::InvalidCommand(
            "exec command is empty".to_string(),
        ));
    }
    Ok(format!("docker exec {name} sh -lc {}", shell_quote(snippet)))
}

/// Quotes an arbitrary string as one POSIX shell word.
///
/// Wraps the string in single quotes and rewrites every embedded single
/// quote as `'\''` (close quote, escaped quote, reopen quote).
#[must_use]
pub fn shell_quote(arg: &str) -> String {
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('\'');
    for ch in arg.chars() {
        if ch == '\'' {
            quoted.push_str("'\\''");
        } else {
            quoted.push(ch);
        }
    }
    quoted.push('\'');
    quoted
}

/// Candidate commands for the server-wide Docker log, in fallback order:
/// the journal, the journal via sudo, then the engine's own event stream.
#[must_use]
pub fn server_log_candidates() -> Vec<String> {
    vec![
        "journalctl -u docker -f --no-pager".to_string(),
        "sudo journalctl -u docker -f --no-pager".to_string(),
        "docker events --format '{{json .}}'".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ps_command_matches_docker_cli_contract() {
        assert_eq!(
            build_ps_command(),
            "docker ps -a --format '{{.Names}};{{.Image}};{{.Status}};{{.Ports}}'"
        );
    }

    #[test]
    fn action_commands() {
        assert_eq!(
            build_action_command(ContainerAction::Start, "web"),
            "docker start web"
        );
        assert_eq!(
            build_action_command(ContainerAction::Stop, "web"),
            "docker stop web"
        );
        assert_eq!(
            build_action_command(ContainerAction::Restart, "db-1"),
            "docker restart db-1"
        );
    }

    #[test]
    fn log_commands() {
        assert_eq!(build_tail_command("web", 500), "docker logs --tail 500 web");
        assert_eq!(
            build_follow_command("web", 200),
            "docker logs --tail 200 -f web"
        );
    }

    #[test]
    fn inspect_command() {
        assert_eq!(build_inspect_command("web"), "docker inspect web");
    }

    #[test]
    fn exec_command_quotes_snippet_as_single_token() {
        let command = build_exec_command("web", "O'Brien; rm -rf /").unwrap();
        assert_eq!(
            command,
            "docker exec web sh -lc 'O'\\''Brien; rm -rf /'"
        );
        // The whole snippet stays inside one quoted token: splitting on the
        // quote boundaries yields the snippet's quote as an escaped literal.
        assert!(command.ends_with("'O'\\''Brien; rm -rf /'"));
    }

    #[test]
    fn exec_command_rejects_empty_snippet() {
        assert!(matches!(
            build_exec_command("web", ""),
            Err(SessionError::InvalidCommand(_))
        ));
        assert!(matches!(
            build_exec_command("web", "   \t  "),
            Err(SessionError::InvalidCommand(_))
        ));
    }

    #[test]
    fn shell_quote_plain_string() {
        assert_eq!(shell_quote("uptime"), "'uptime'");
        assert_eq!(shell_quote("echo $HOME"), "'echo $HOME'");
    }

    #[test]
    fn server_log_chain_order() {
        let candidates = server_log_candidates();
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0], "journalctl -u docker -f --no-pager");
        assert_eq!(candidates[1], "sudo journalctl -u docker -f --no-pager");
        assert_eq!(candidates[2], "docker events --format '{{json .}}'");
    }
}
