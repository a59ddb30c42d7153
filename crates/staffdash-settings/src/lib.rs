//! # staffdash-settings
//!
//! Configuration management with layered sources for the staffdash client.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`StaffdashSettings::default()`]
//! 2. **User file** — `~/.staffdash/settings.json` (merged over defaults)
//! 3. **Environment variables** — `STAFFDASH_*` overrides (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use staffdash_settings::load_settings;
//!
//! let settings = load_settings().unwrap_or_default();
//! println!("API: {}", settings.api.base_url);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_env_overrides, default_credentials_path, load_settings, load_settings_from_path,
    settings_path,
};
pub use types::*;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
