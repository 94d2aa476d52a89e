//! Container inspect command.

use dockhand_core::config::ProfileStore;

use crate::error::CliError;
use crate::util;

/// Dumps the container's inspect JSON as returned by the Docker CLI.
pub async fn run(
    store: &ProfileStore,
    profile_name: &str,
    container: &str,
) -> Result<(), CliError> {
    let dispatcher = util::dispatcher_for(store, profile_name).await?;
    let output = dispatcher.inspect_container(container).await?;
    print!("{output}");
    Ok(())
}
