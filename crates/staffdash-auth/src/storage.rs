//! Credentials file I/O.
//!
//! Reads and writes `~/.staffdash/credentials.json` with secure file
//! permissions (0o600).

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::AuthError;
use crate::store::CredentialStore;
use crate::tokens::{ACCESS_TOKEN, REFRESH_TOKEN};

/// Current credentials file format version.
const CREDENTIALS_VERSION: u32 = 1;

/// On-disk credentials document.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsFile {
    /// Format version; only version 1 is accepted.
    pub version: u32,
    /// Stored entries by name.
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
    /// RFC 3339 timestamp of the last write.
    #[serde(default)]
    pub last_updated: String,
}

impl CredentialsFile {
    /// Create an empty document at the current version.
    pub fn new() -> Self {
        Self {
            version: CREDENTIALS_VERSION,
            tokens: BTreeMap::new(),
            last_updated: String::new(),
        }
    }
}

impl Default for CredentialsFile {
    fn default() -> Self {
        Self::new()
    }
}

/// Load the credentials document (sync).
///
/// A missing file is `None`. An unreadable, malformed or unsupported file is
/// logged and treated as missing, so the user simply logs in again.
pub fn load_credentials(path: &Path) -> Option<CredentialsFile> {
    match read_credentials(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring credentials file: {e}");
            None
        }
    }
}

fn read_credentials(path: &Path) -> Result<Option<CredentialsFile>, AuthError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let file: CredentialsFile = serde_json::from_slice(&bytes)?;
    if file.version != CREDENTIALS_VERSION {
        tracing::warn!(version = file.version, "unsupported credentials file version");
        return Ok(None);
    }
    Ok(Some(file))
}

/// Save the credentials document (sync).
///
/// The document is written to a sibling file created owner-only (0o600 on
/// unix) and renamed over `path`, so a reader never sees a partial write and
/// a previously looser mode on `path` does not survive.
pub fn save_credentials(path: &Path, file: &mut CredentialsFile) -> Result<(), AuthError> {
    file.last_updated = chrono::Utc::now().to_rfc3339();
    let json = serde_json::to_vec_pretty(file)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let staging = path.with_extension("json.tmp");
    let written = owner_only(&staging).and_then(|mut out| {
        out.write_all(&json)?;
        out.sync_all()
    });
    if let Err(e) = written.and_then(|()| std::fs::rename(&staging, path)) {
        let _ = std::fs::remove_file(&staging);
        return Err(e.into());
    }

    tracing::debug!(path = %path.display(), "credentials saved");
    Ok(())
}

fn owner_only(path: &Path) -> std::io::Result<std::fs::File> {
    let mut options = std::fs::OpenOptions::new();
    let _ = options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        let _ = options.mode(0o600);
    }
    let out = options.open(path)?;
    #[cfg(unix)]
    {
        // `mode` only applies when the file is created.
        use std::os::unix::fs::PermissionsExt;
        out.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    Ok(out)
}

/// Delete the credentials file. A missing file is not an error.
pub fn clear_credentials(path: &Path) -> Result<(), AuthError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AuthError::Io(e)),
    }
}

/// [`CredentialStore`] backed by a JSON file, re-read on every lookup.
#[derive(Clone, Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store persisting to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, name: &str) -> Option<String> {
        load_credentials(&self.path)?.tokens.get(name).cloned()
    }

    fn set(&self, access: &str, refresh: &str) -> Result<(), AuthError> {
        let mut file = load_credentials(&self.path).unwrap_or_default();
        let _ = file.tokens.insert(ACCESS_TOKEN.to_string(), access.to_string());
        let _ = file.tokens.insert(REFRESH_TOKEN.to_string(), refresh.to_string());
        save_credentials(&self.path, &mut file)
    }

    fn clear(&self) -> Result<(), AuthError> {
        clear_credentials(&self.path)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
