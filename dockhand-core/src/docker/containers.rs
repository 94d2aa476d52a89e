//! Parsing of `docker ps` output into container records

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Matches the host port of a published port mapping, e.g.
/// `0.0.0.0:8080->80/tcp` or `[::]:8080->80/tcp`.
fn host_port_regex() -> &'static Regex {
    static PORT_RE: OnceLock<Regex> = OnceLock::new();
    PORT_RE.get_or_init(|| {
        Regex::new(r"(?:(?:\[.*\]|[^:,\s]+):)?(?P<hostport>\d+)->\d+/(?:tcp|udp)")
            .expect("host port regex is valid")
    })
}

/// One row of the container listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecord {
    /// Container name.
    pub name: String,
    /// Image reference.
    pub image: String,
    /// Human-readable status text, e.g. `Up 3 hours`.
    pub status: String,
    /// Published port mappings as printed by `docker ps`.
    pub ports: String,
}

impl ContainerRecord {
    /// Parses one semicolon-delimited `docker ps` line.
    ///
    /// Missing trailing fields are treated as empty rather than failing the
    /// row; extra fields are ignored.
    #[must_use]
    pub fn parse_line(line: &str) -> Self {
        let mut fields = line.trim().split(';');
        let mut next = || fields.next().unwrap_or("").to_string();
        Self {
            name: next(),
            image: next(),
            status: next(),
            ports: next(),
        }
    }

    /// Whether the status text marks the container as running: any
    /// case-insensitive occurrence of `up`.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status.to_lowercase().contains("up")
    }

    /// First published host port, if any: the port a browser on the SSH
    /// host's network could reach the container on.
    #[must_use]
    pub fn first_host_port(&self) -> Option<u16> {
        let first_mapping = self.ports.split(',').next()?.trim();
        host_port_regex()
            .captures(first_mapping)
            .and_then(|caps| caps.name("hostport"))
            .and_then(|m| m.as_str().parse().ok())
    }
}

impl fmt::Display for ContainerRecord {
    /// Re-serializes the record in the `docker ps` format-string layout.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{}",
            self.name, self.image, self.status, self.ports
        )
    }
}

/// Parses the full output of the listing command, skipping blank lines.
#[must_use]
pub fn parse_container_list(output: &str) -> Vec<ContainerRecord> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(ContainerRecord::parse_line)
        .collect()
}
