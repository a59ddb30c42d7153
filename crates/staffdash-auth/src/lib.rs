//! # staffdash-auth
//!
//! Credential storage and access token refresh for the staffdash client.
//!
//! - [`store`]: the [`CredentialStore`] seam and the in-memory [`CookieJar`]
//! - [`storage`]: [`FileCredentialStore`], persisted to
//!   `~/.staffdash/credentials.json` with secure file permissions
//! - [`refresh`]: [`TokenRefresher`], which trades the refresh token for a
//!   new access token
//!
//! Both tokens are stored under the canonical names [`ACCESS_TOKEN`] and
//! [`REFRESH_TOKEN`].

#![deny(unsafe_code)]

pub mod errors;
pub mod refresh;
pub mod storage;
pub mod store;
pub mod tokens;

pub use errors::AuthError;
pub use refresh::{RefreshOutcome, TokenRefresher};
pub use storage::{CredentialsFile, FileCredentialStore, load_credentials, save_credentials};
pub use store::{COOKIE_PATH, CookieJar, CredentialStore};
pub use tokens::{ACCESS_TOKEN, REFRESH_TOKEN, TokenPair, bearer};

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
