//! Credential store abstraction and the in-memory cookie jar.

use cookie::Cookie;
use parking_lot::RwLock;

use crate::errors::AuthError;
use crate::tokens::{ACCESS_TOKEN, REFRESH_TOKEN, TokenPair};

/// Path every token cookie is scoped to.
pub const COOKIE_PATH: &str = "/";

/// Persistent key/value storage for the access and refresh tokens.
///
/// Implementations are synchronous. A missing entry is not an error.
pub trait CredentialStore: Send + Sync {
    /// Look up a named entry.
    fn get(&self, name: &str) -> Option<String>;

    /// Persist both tokens, replacing any previous values.
    fn set(&self, access: &str, refresh: &str) -> Result<(), AuthError>;

    /// Remove both tokens.
    fn clear(&self) -> Result<(), AuthError>;

    /// Stored access token, if any.
    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN)
    }

    /// Stored refresh token, if any.
    fn refresh_token(&self) -> Option<String> {
        self.get(REFRESH_TOKEN)
    }

    /// Both tokens, when both are stored.
    fn token_pair(&self) -> Option<TokenPair> {
        Some(TokenPair::new(self.access_token()?, self.refresh_token()?))
    }
}

/// In-memory cookie jar with `document.cookie` semantics.
///
/// Entries keep insertion order and are scoped to [`COOKIE_PATH`]; writing
/// an existing name replaces its value in place.
#[derive(Default)]
pub struct CookieJar {
    entries: RwLock<Vec<Cookie<'static>>>,
}

impl CookieJar {
    /// Create an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a jar from a `name=value; name=value` cookie string.
    ///
    /// Fragments that are not `name=value` pairs are skipped.
    pub fn parse(cookies: &str) -> Self {
        let jar = Self::new();
        for parsed in Cookie::split_parse(cookies) {
            match parsed {
                Ok(cookie) => jar.write(cookie.name(), cookie.value()),
                Err(e) => tracing::debug!("skipping cookie fragment: {e}"),
            }
        }
        jar
    }

    /// Render all entries as a cookie string (`a=1; b=2`).
    pub fn cookie_string(&self) -> String {
        self.entries
            .read()
            .iter()
            .map(|cookie| cookie.stripped().to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Render the `Set-Cookie` style assignment for a stored entry.
    pub fn assignment(&self, name: &str) -> Option<String> {
        self.entries
            .read()
            .iter()
            .find(|cookie| cookie.name() == name)
            .map(ToString::to_string)
    }

    fn write(&self, name: &str, value: &str) {
        let cookie = Cookie::build((name.to_string(), value.to_string()))
            .path(COOKIE_PATH)
            .build();
        let mut entries = self.entries.write();
        match entries.iter_mut().find(|existing| existing.name() == name) {
            Some(existing) => *existing = cookie,
            None => entries.push(cookie),
        }
    }
}

impl CredentialStore for CookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.entries
            .read()
            .iter()
            .find(|cookie| cookie.name() == name)
            .map(|cookie| cookie.value().to_string())
    }

    fn set(&self, access: &str, refresh: &str) -> Result<(), AuthError> {
        self.write(ACCESS_TOKEN, access);
        self.write(REFRESH_TOKEN, refresh);
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        self.entries
            .write()
            .retain(|cookie| cookie.name() != ACCESS_TOKEN && cookie.name() != REFRESH_TOKEN);
        Ok(())
    }
}

impl std::fmt::Debug for CookieJar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self
            .entries
            .read()
            .iter()
            .map(|cookie| cookie.name().to_string())
            .collect();
        f.debug_struct("CookieJar").field("names", &names).finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
