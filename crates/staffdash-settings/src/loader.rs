//! Settings loading with layered sources and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`StaffdashSettings::default()`]
//! 2. If the settings file exists, merge its values over the defaults
//!    (objects merge per key, arrays and primitives replace)
//! 3. Apply `STAFFDASH_*` environment variable overrides (highest priority)

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Format, Json, Serialized};
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::StaffdashSettings;

/// Resolve the path to the settings file (`~/.staffdash/settings.json`).
pub fn settings_path() -> PathBuf {
    data_dir().join("settings.json")
}

/// Resolve the default credentials file (`~/.staffdash/credentials.json`).
pub fn default_credentials_path() -> PathBuf {
    data_dir().join("credentials.json")
}

fn data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".staffdash")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<StaffdashSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults. A file with invalid JSON is an error.
pub fn load_settings_from_path(path: &Path) -> Result<StaffdashSettings> {
    let mut figment = Figment::from(Serialized::defaults(StaffdashSettings::default()));
    if path.exists() {
        debug!(?path, "loading settings from file");
        figment = figment.merge(Json::file(path));
    } else {
        debug!(?path, "settings file not found, using defaults");
    }

    let mut settings: StaffdashSettings = figment.extract()?;
    apply_env_overrides(&mut settings);
    validate(&settings)?;
    Ok(settings)
}

/// Apply environment variable overrides to loaded settings.
///
/// Unset or empty variables leave the file/default value in place.
pub fn apply_env_overrides(settings: &mut StaffdashSettings) {
    if let Some(v) = read_env_string("STAFFDASH_BASE_URL") {
        settings.api.base_url = v;
    }
    if let Some(v) = read_env_string("STAFFDASH_LOGIN_PATH") {
        settings.api.login_path = v;
    }
    if let Some(v) = read_env_string("STAFFDASH_DASHBOARD_PATH") {
        settings.api.dashboard_path = v;
    }
    if let Some(v) = read_env_string("STAFFDASH_REFRESH_PATH") {
        settings.api.refresh_path = v;
    }
    if let Some(v) = read_env_string("STAFFDASH_CREDENTIALS") {
        settings.storage.credentials_path = Some(v);
    }
    if let Some(v) = read_env_string("STAFFDASH_LOG_LEVEL") {
        settings.logging.level = v;
    }
}

fn validate(settings: &StaffdashSettings) -> Result<()> {
    let base = settings.api.base_url.as_str();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(SettingsError::InvalidValue(format!(
            "api.baseUrl must be an http(s) URL, got '{base}'"
        )));
    }
    Ok(())
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
