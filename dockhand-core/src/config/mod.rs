//! Connection profiles and their on-disk store
//!
//! Profiles are the records the UI hands to the session layer: who to
//! connect to and with what credential. They persist as pretty-printed JSON
//! in the user's config directory. Password tokens are stored opaquely;
//! turning a token into plain text is the caller's business and is injected
//! as a closure into [`Profile::credential`], so this crate never depends
//! on a particular storage or encryption scheme.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::session::{Credential, DEFAULT_SSH_PORT, SshSession};

/// Errors from loading, saving, or interpreting profiles.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// No user configuration directory could be determined.
    #[error("could not determine a configuration directory")]
    NoConfigDir,

    /// Reading or writing the profiles file failed.
    #[error("profile store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The profiles file is not valid JSON.
    #[error("profiles file is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    /// The injected decryptor rejected a stored password token.
    #[error("failed to decrypt stored password: {0}")]
    Decrypt(String),
}

fn default_port() -> u16 {
    DEFAULT_SSH_PORT
}

/// One saved connection target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name, also the lookup key.
    pub name: String,
    /// Remote host or IP.
    pub host: String,
    /// Username to authenticate as.
    pub user: String,
    /// Stored password token, empty when none is saved.
    #[serde(default)]
    pub password: String,
    /// SSH port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Private key path; takes precedence over the password. `~` expands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_path: Option<String>,
}

impl Profile {
    /// Creates a disconnected session for this profile's endpoint.
    #[must_use]
    pub fn session(&self) -> SshSession {
        SshSession::new(self.host.clone(), self.port, self.user.clone())
    }

    /// Resolves the stored credential.
    ///
    /// A key path wins over a password. The stored password token is passed
    /// through `decrypt` (identity for plain-text stores); `Ok(None)` means
    /// the profile has no stored credential and the caller should prompt.
    ///
    /// # Errors
    ///
    /// [`ProfileError::Decrypt`] when the decryptor rejects the token.
    pub fn credential<D>(&self, decrypt: D) -> Result<Option<Credential>, ProfileError>
    where
        D: FnOnce(&str) -> Result<String, String>,
    {
        if let Some(key_path) = &self.key_path {
            let expanded = shellexpand::tilde(key_path);
            return Ok(Some(Credential::KeyFile(PathBuf::from(expanded.as_ref()))));
        }
        if self.password.is_empty() {
            return Ok(None);
        }
        let plain = decrypt(&self.password).map_err(ProfileError::Decrypt)?;
        Ok(Some(Credential::Password(SecretString::from(plain))))
    }
}

/// JSON-backed profile persistence.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// A store at an explicit file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store at the default location,
    /// `<config dir>/dockhand/profiles.json`.
    ///
    /// # Errors
    ///
    /// [`ProfileError::NoConfigDir`] when the platform reports no config
    /// directory.
    pub fn default_location() -> Result<Self, ProfileError> {
        let dir = dirs::config_dir().ok_or(ProfileError::NoConfigDir)?;
        Ok(Self::new(dir.join("dockhand").join("profiles.json")))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all profiles; a missing file is an empty store.
    pub fn load(&self) -> Result<Vec<Profile>, ProfileError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Saves all profiles, creating parent directories as needed.
    pub fn save(&self, profiles: &[Profile]) -> Result<(), ProfileError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(profiles)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }

    /// Looks a profile up by name.
    pub fn find(&self, name: &str) -> Result<Option<Profile>, ProfileError> {
        Ok(self.load()?.into_iter().find(|p| p.name == name))
    }
}
