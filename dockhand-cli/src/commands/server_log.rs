//! Server-wide Docker log command.

use dockhand_core::config::ProfileStore;

use crate::error::CliError;
use crate::util;

/// Follows the host's Docker log through the fallback chain, or polls it
/// with bounded queries when `--poll` is given.
pub async fn run(store: &ProfileStore, profile_name: &str, poll: bool) -> Result<(), CliError> {
    let dispatcher = util::dispatcher_for(store, profile_name).await?;

    let (handle, events) = if poll {
        dispatcher.poll_server_log()
    } else {
        dispatcher.follow_server_log()
    };
    util::stream_to_stdout(handle, events).await
}
