//! Request descriptors.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;
use staffdash_auth::bearer;
use url::Url;

use crate::errors::ClientError;

/// A request the executor can send, and resend after a token refresh.
#[derive(Clone, Debug)]
pub struct PendingRequest {
    url: Url,
    method: Method,
    headers: HeaderMap,
    body: Option<Value>,
}

impl PendingRequest {
    /// Request to `url` with `method`, no extra headers and no body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            url,
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// GET request to `url`.
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Add a header, replacing any previous value under the same name.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        let _ = self.headers.insert(name, value);
        self
    }

    /// Attach a JSON body. `null` means no body.
    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = (!body.is_null()).then_some(body);
        self
    }

    /// Copy of this request carrying `Authorization: Bearer <token>`.
    pub fn with_bearer(&self, token: &str) -> Result<Self, ClientError> {
        let mut value = HeaderValue::from_str(&bearer(token))?;
        value.set_sensitive(true);
        Ok(self.clone().with_header(AUTHORIZATION, value))
    }

    /// Target URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Caller-supplied headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// JSON body, if any.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Current `Authorization` header as text.
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
