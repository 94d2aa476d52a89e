//! Remote exec command.

use dockhand_core::config::ProfileStore;

use crate::error::CliError;
use crate::util;

/// Runs a shell snippet inside the container and prints its output.
pub async fn run(
    store: &ProfileStore,
    profile_name: &str,
    container: &str,
    command: &str,
) -> Result<(), CliError> {
    let dispatcher = util::dispatcher_for(store, profile_name).await?;
    let output = dispatcher.exec_in_container(container, command).await?;
    print!("{output}");
    Ok(())
}
