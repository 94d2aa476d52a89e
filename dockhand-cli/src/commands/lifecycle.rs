//! Start/stop/restart commands.

use dockhand_core::config::ProfileStore;
use dockhand_core::docker::ContainerAction;

use crate::error::CliError;
use crate::util;

/// Applies a lifecycle action and echoes whatever the Docker CLI printed.
pub async fn run(
    store: &ProfileStore,
    profile_name: &str,
    action: ContainerAction,
    container: &str,
) -> Result<(), CliError> {
    let dispatcher = util::dispatcher_for(store, profile_name).await?;
    let output = dispatcher.container_action(action, container).await?;

    let output = output.trim();
    if output.is_empty() {
        println!("{action} sent to {container}");
    } else {
        println!("{output}");
    }
    Ok(())
}
