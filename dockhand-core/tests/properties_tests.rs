//! Property tests for the `dockhand-core` library
//!
//! Each submodule covers one component: command construction and quoting,
//! container listing round-trips, and profile persistence.

// Allow common test patterns that Clippy warns about
#![allow(clippy::redundant_clone)]
#![allow(clippy::unwrap_used)]

mod properties;
