//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dockhand_core::docker::{DEFAULT_FOLLOW_TAIL_LINES, DEFAULT_TAIL_LINES};

/// Dockhand command-line interface for remote Docker hosts
#[derive(Parser)]
#[command(name = "dockhand")]
#[command(author, version, about = "Manage Docker containers on a remote host over SSH")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the profiles file (defaults to the user config directory)
    #[arg(long, global = true, env = "DOCKHAND_PROFILES")]
    pub profiles: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage connection profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// List all containers on a host
    Ps {
        /// Profile name to connect with
        profile: String,
    },

    /// Start a container
    Start {
        /// Profile name to connect with
        profile: String,
        /// Container name
        container: String,
    },

    /// Stop a container
    Stop {
        /// Profile name to connect with
        profile: String,
        /// Container name
        container: String,
    },

    /// Restart a container
    Restart {
        /// Profile name to connect with
        profile: String,
        /// Container name
        container: String,
    },

    /// Show or follow a container's logs
    Logs {
        /// Profile name to connect with
        profile: String,
        /// Container name
        container: String,

        /// Number of backlog lines
        #[arg(short, long)]
        tail: Option<u32>,

        /// Keep following new output until interrupted
        #[arg(short, long)]
        follow: bool,
    },

    /// Dump a container's inspect JSON
    Inspect {
        /// Profile name to connect with
        profile: String,
        /// Container name
        container: String,
    },

    /// Run a shell command inside a container
    Exec {
        /// Profile name to connect with
        profile: String,
        /// Container name
        container: String,
        /// Command passed to `sh -lc` inside the container
        command: String,
    },

    /// Follow the server-wide Docker log
    ServerLog {
        /// Profile name to connect with
        profile: String,

        /// Poll with bounded queries instead of a live follow
        #[arg(long)]
        poll: bool,
    },
}

/// Profile management commands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Add a profile, replacing any existing one with the same name
    Add {
        /// Profile name
        name: String,

        /// Host address (hostname or IP)
        #[arg(short = 'H', long)]
        host: String,

        /// Username for authentication
        #[arg(short, long)]
        user: String,

        /// SSH port
        #[arg(short, long, default_value_t = 22)]
        port: u16,

        /// Path to a private key file (takes precedence over a password)
        #[arg(short, long)]
        key: Option<String>,

        /// Prompt for a password to store with the profile
        #[arg(long)]
        password: bool,
    },

    /// List saved profiles
    List,

    /// Remove a profile
    Remove {
        /// Profile name
        name: String,
    },
}

impl Commands {
    /// Effective backlog size for the `logs` command.
    pub fn effective_tail(tail: Option<u32>, follow: bool) -> u32 {
        tail.unwrap_or(if follow {
            DEFAULT_FOLLOW_TAIL_LINES
        } else {
            DEFAULT_TAIL_LINES
        })
    }
}
