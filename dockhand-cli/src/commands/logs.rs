//! Container log commands: one-shot tail and live follow.

use dockhand_core::config::ProfileStore;

use crate::error::CliError;
use crate::util;

/// Prints a log tail, or follows the log until Ctrl-C / remote exit.
pub async fn run(
    store: &ProfileStore,
    profile_name: &str,
    container: &str,
    tail: u32,
    follow: bool,
) -> Result<(), CliError> {
    let dispatcher = util::dispatcher_for(store, profile_name).await?;

    if follow {
        let (handle, events) = dispatcher.follow_logs(container, tail);
        return util::stream_to_stdout(handle, events).await;
    }

    let output = dispatcher.tail_logs(container, tail).await?;
    print!("{output}");
    Ok(())
}
