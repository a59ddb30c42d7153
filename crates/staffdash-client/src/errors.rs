//! Client error types.

use serde_json::Value;
use staffdash_auth::AuthError;

/// Message used when a failed response carries no usable `detail`.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Errors surfaced by the API client, login and dashboard.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The API answered with a failure that is not an expired token.
    #[error("{message}")]
    Request {
        /// HTTP status (or the status reported inside the payload).
        status: u16,
        /// The payload's `detail`, or [`DEFAULT_ERROR_MESSAGE`].
        message: String,
    },

    /// The access token expired and could not be renewed. Navigation to
    /// `location` has already been issued.
    #[error("session expired, redirected to {location}")]
    SessionExpired {
        /// Login route the user was sent to.
        location: String,
    },

    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A body could not be encoded or decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An endpoint URL could not be built.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A header value contained characters HTTP does not allow.
    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// Credential storage or refresh failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The dashboard payload is not a label → number object.
    #[error("invalid dashboard payload: {0}")]
    InvalidDashboard(String),
}

impl ClientError {
    /// Whether the user has to log in again.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired { .. })
    }
}

/// Build a [`ClientError::Request`] from a failed response payload.
pub(crate) fn request_error(status: u16, payload: Option<&Value>) -> ClientError {
    let message = payload
        .and_then(|p| p.get("detail"))
        .filter(|detail| truthy(detail))
        .map_or_else(
            || DEFAULT_ERROR_MESSAGE.to_string(),
            |detail| match detail {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        );
    ClientError::Request { status, message }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
