//! Dockhand Core Library
//!
//! This crate provides the remote session and command-streaming core for the
//! Dockhand Docker manager: an SSH-authenticated session to a remote host,
//! one-shot command execution, long-lived cancellable log streaming with a
//! command fallback chain, and the dispatcher that turns container intents
//! into `docker` CLI invocations.
//!
//! # Crate Structure
//!
//! - [`session`] - Transport session, channels, and one-shot execution
//! - [`stream`] - Cancellable log following, fallback chains, pseudo-streaming
//! - [`docker`] - Docker command templates, `docker ps` parsing, dispatcher
//! - [`config`] - Connection profile records and their on-disk store
//! - [`error`] - The error taxonomy shared by all components
//!
//! All network work is blocking at the transport layer; consumers are
//! expected to drive it from worker tasks. [`docker::DockerDispatcher`]
//! does this for every operation, so a single-threaded consumer (a GUI
//! main loop, a CLI) only ever touches channels and futures.

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod docker;
pub mod error;
pub mod session;
pub mod stream;

pub use config::{Profile, ProfileError, ProfileStore};
pub use docker::{ContainerAction, ContainerRecord, DockerDispatcher};
pub use error::{SessionError, SessionResult};
pub use session::{Credential, RemoteChannel, SshSession, run_command};
pub use stream::{FollowHandle, StreamEvent};
