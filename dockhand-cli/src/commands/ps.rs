//! Container listing command.

use dockhand_core::config::ProfileStore;

use crate::error::CliError;
use crate::util;

/// Lists containers with their state and, when published, a browse URL.
pub async fn run(store: &ProfileStore, profile_name: &str) -> Result<(), CliError> {
    let dispatcher = util::dispatcher_for(store, profile_name).await?;
    let containers = dispatcher.list_containers().await?;

    if containers.is_empty() {
        println!("No containers on this host");
        return Ok(());
    }

    let host = dispatcher.session().host().to_string();
    println!(
        "{:<5} {:<24} {:<28} {:<28} URL",
        "STATE", "NAME", "IMAGE", "STATUS"
    );
    for container in &containers {
        let state = if container.is_running() { "up" } else { "down" };
        let url = container
            .first_host_port()
            .map(|port| format!("http://{host}:{port}"))
            .unwrap_or_default();
        println!(
            "{:<5} {:<24} {:<28} {:<28} {url}",
            state, container.name, container.image, container.status
        );
    }
    Ok(())
}
