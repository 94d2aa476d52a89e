//! Shared helpers: profile resolution, connection, event draining.

use std::path::Path;
use std::sync::Arc;

use dockhand_core::config::{Profile, ProfileStore};
use dockhand_core::docker::DockerDispatcher;
use dockhand_core::session::{Credential, SshSession};
use dockhand_core::stream::{FollowHandle, StreamEvent};
use secrecy::SecretString;
use tokio::sync::mpsc;

use crate::error::CliError;

/// Opens the profile store at the given path, or the default location.
pub fn profile_store(path: Option<&Path>) -> Result<ProfileStore, CliError> {
    match path {
        Some(path) => Ok(ProfileStore::new(path)),
        None => Ok(ProfileStore::default_location()?),
    }
}

/// Loads one profile by name.
pub fn load_profile(store: &ProfileStore, name: &str) -> Result<Profile, CliError> {
    store
        .find(name)?
        .ok_or_else(|| CliError::ProfileNotFound(name.to_string()))
}

/// Resolves the profile's credential, prompting for a password when the
/// profile stores none.
///
/// Stored passwords are plain text in this front end, so the injected
/// decryptor is the identity function; a front end with an encrypting
/// store plugs its own in here.
fn resolve_credential(profile: &Profile) -> Result<Credential, CliError> {
    if let Some(credential) = profile.credential(|token| Ok(token.to_string()))? {
        return Ok(credential);
    }
    let prompt = format!("Password for {}@{}: ", profile.user, profile.host);
    let password = rpassword::prompt_password(prompt)?;
    Ok(Credential::Password(SecretString::from(password)))
}

/// Connects a session for the profile, off the async runtime's core
/// threads since the transport blocks.
pub async fn connect(profile: &Profile) -> Result<Arc<SshSession>, CliError> {
    let credential = resolve_credential(profile)?;
    let session = Arc::new(profile.session());

    let connecting = Arc::clone(&session);
    tokio::task::spawn_blocking(move || connecting.connect(&credential))
        .await
        .map_err(|e| CliError::Connection(format!("worker task failed: {e}")))??;

    tracing::info!(host = %profile.host, user = %profile.user, "connected");
    Ok(session)
}

/// Loads a profile, connects it, and wraps the session in a dispatcher.
pub async fn dispatcher_for(
    store: &ProfileStore,
    profile_name: &str,
) -> Result<DockerDispatcher, CliError> {
    let profile = load_profile(store, profile_name)?;
    let session = connect(&profile).await?;
    Ok(DockerDispatcher::new(session))
}

/// Drains stream events to stdout until the stream closes, stopping it on
/// Ctrl-C. Error events go to stderr so piped output stays clean.
pub async fn stream_to_stdout(
    handle: FollowHandle,
    mut events: mpsc::Receiver<StreamEvent>,
) -> Result<(), CliError> {
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(StreamEvent::Opened { command }) => {
                    eprintln!("-- following: {command}");
                }
                Some(StreamEvent::Line(line)) => println!("{line}"),
                Some(StreamEvent::Error(message)) => eprintln!("{message}"),
                Some(StreamEvent::Closed) | None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("interrupt received, stopping stream");
                handle.stop();
            }
        }
    }
    Ok(())
}
