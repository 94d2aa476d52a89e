//! Command handler modules for the CLI.

mod exec;
mod inspect;
mod lifecycle;
mod logs;
mod profile;
mod ps;
mod server_log;

use dockhand_core::docker::ContainerAction;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::util;

/// Dispatch a CLI command to the appropriate handler.
pub async fn dispatch(cli: Cli) -> Result<(), CliError> {
    let store = util::profile_store(cli.profiles.as_deref())?;

    match cli.command {
        Commands::Profile { command } => profile::run(&store, command),
        Commands::Ps { profile } => ps::run(&store, &profile).await,
        Commands::Start { profile, container } => {
            lifecycle::run(&store, &profile, ContainerAction::Start, &container).await
        }
        Commands::Stop { profile, container } => {
            lifecycle::run(&store, &profile, ContainerAction::Stop, &container).await
        }
        Commands::Restart { profile, container } => {
            lifecycle::run(&store, &profile, ContainerAction::Restart, &container).await
        }
        Commands::Logs {
            profile,
            container,
            tail,
            follow,
        } => {
            let tail = Commands::effective_tail(tail, follow);
            logs::run(&store, &profile, &container, tail, follow).await
        }
        Commands::Inspect { profile, container } => {
            inspect::run(&store, &profile, &container).await
        }
        Commands::Exec {
            profile,
            container,
            command,
        } => exec::run(&store, &profile, &container, &command).await,
        Commands::ServerLog { profile, poll } => server_log::run(&store, &profile, poll).await,
    }
}
