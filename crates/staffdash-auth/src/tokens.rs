//! Token names and the access/refresh pair.

use serde::{Deserialize, Serialize};

/// Storage key of the access token.
pub const ACCESS_TOKEN: &str = "access_token";

/// Storage key of the refresh token.
pub const REFRESH_TOKEN: &str = "refresh_token";

/// Access and refresh tokens issued by the API. Both are opaque.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer credential.
    pub access: String,
    /// Credential exchanged for a new access token.
    pub refresh: String,
}

impl TokenPair {
    /// Create a pair from its two tokens.
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}

// Token values stay out of debug output.
impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &format_args!("<{} chars>", self.access.len()))
            .field("refresh", &format_args!("<{} chars>", self.refresh.len()))
            .finish()
    }
}

/// Format an `Authorization` header value for `token`.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
