//! Docker command construction, output parsing, and intent dispatch
//!
//! The command templates here match the Docker CLI's own text contracts
//! byte for byte (notably the semicolon-delimited `ps` format string);
//! the parsers on the other side of the wire are tolerant of short lines
//! so one malformed row never fails a whole listing.

mod commands;
mod containers;
mod dispatcher;

pub use commands::{
    ContainerAction, DEFAULT_FOLLOW_TAIL_LINES, DEFAULT_TAIL_LINES, PS_FORMAT,
    build_action_command, build_exec_command, build_follow_command, build_inspect_command,
    build_ps_command, build_tail_command, server_log_candidates, shell_quote,
};
pub use containers::{ContainerRecord, parse_container_list};
pub use dispatcher::DockerDispatcher;
