//! Access token refresh.
//!
//! Exchanges the stored refresh token for a new access token. The refresh
//! token itself is never rotated here; only login replaces it.

use std::sync::Arc;

use reqwest::Url;
use serde_json::Value;

use crate::errors::AuthError;
use crate::store::CredentialStore;

/// Result of a refresh attempt that reached a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new access token was issued and stored.
    Refreshed {
        /// The new access token.
        access: String,
    },
    /// The session cannot be renewed; the user has to log in again.
    Rejected {
        /// Why the refresh was refused.
        reason: String,
    },
}

/// Exchanges the refresh token for a new access token.
pub struct TokenRefresher {
    http: reqwest::Client,
    refresh_url: Url,
    store: Arc<dyn CredentialStore>,
}

impl TokenRefresher {
    /// Create a refresher posting to `refresh_url`.
    pub fn new(http: reqwest::Client, refresh_url: Url, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            http,
            refresh_url,
            store,
        }
    }

    /// Refresh endpoint location.
    pub fn refresh_url(&self) -> &Url {
        &self.refresh_url
    }

    /// Request a new access token.
    ///
    /// A non-success status, an undecodable body, or a body without an
    /// `access` token is a [`RefreshOutcome::Rejected`]. Without a stored
    /// refresh token no request is sent. Transport failures are errors.
    #[tracing::instrument(skip_all)]
    pub async fn refresh(&self) -> Result<RefreshOutcome, AuthError> {
        let Some(refresh) = self.store.refresh_token() else {
            tracing::debug!("no refresh token stored");
            return Ok(rejected("no refresh token stored"));
        };

        let resp = self
            .http
            .post(self.refresh_url.clone())
            .form(&[("refresh", refresh.as_str())])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "refresh endpoint refused token");
            return Ok(rejected(format!(
                "refresh endpoint returned {}",
                status.as_u16()
            )));
        }

        let payload: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(e) => return Ok(rejected(format!("undecodable refresh response: {e}"))),
        };
        let Some(access) = payload
            .get("access")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
        else {
            return Ok(rejected("refresh response has no access token"));
        };

        self.store.set(access, &refresh)?;
        tracing::info!("access token refreshed");

        Ok(RefreshOutcome::Refreshed {
            access: access.to_string(),
        })
    }
}

fn rejected(reason: impl Into<String>) -> RefreshOutcome {
    RefreshOutcome::Rejected {
        reason: reason.into(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CookieJar;
    use assert_matches::assert_matches;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const REFRESH_PATH: &str = "/api/token/refresh/";

    fn refresher(server: &MockServer, store: Arc<CookieJar>) -> TokenRefresher {
        let url = Url::parse(&format!("{}{REFRESH_PATH}", server.uri())).unwrap();
        TokenRefresher::new(reqwest::Client::new(), url, store)
    }

    fn signed_in() -> Arc<CookieJar> {
        let jar = Arc::new(CookieJar::new());
        jar.set("A1", "R1").unwrap();
        jar
    }

    #[tokio::test]
    async fn success_stores_new_access_and_keeps_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REFRESH_PATH))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("refresh=R1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access": "A2"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store = signed_in();
        let outcome = refresher(&server, store.clone()).refresh().await.unwrap();

        assert_eq!(
            outcome,
            RefreshOutcome::Refreshed {
                access: "A2".to_string()
            }
        );
        assert_eq!(store.access_token().as_deref(), Some("A2"));
        assert_eq!(store.refresh_token().as_deref(), Some("R1"));
    }

    #[tokio::test]
    async fn non_ok_status_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REFRESH_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "detail": "Token is invalid or expired"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store = signed_in();
        let outcome = refresher(&server, store.clone()).refresh().await.unwrap();

        assert_matches!(outcome, RefreshOutcome::Rejected { reason } if reason.contains("401"));
        assert_eq!(store.access_token().as_deref(), Some("A1"));
    }

    #[tokio::test]
    async fn missing_access_field_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REFRESH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "refresh": "R2"
            })))
            .mount(&server)
            .await;

        let store = signed_in();
        let outcome = refresher(&server, store.clone()).refresh().await.unwrap();

        assert_matches!(outcome, RefreshOutcome::Rejected { .. });
        assert_eq!(store.access_token().as_deref(), Some("A1"));
    }

    #[tokio::test]
    async fn empty_access_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REFRESH_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "access": "" })),
            )
            .mount(&server)
            .await;

        let outcome = refresher(&server, signed_in()).refresh().await.unwrap();
        assert_matches!(outcome, RefreshOutcome::Rejected { .. });
    }

    #[tokio::test]
    async fn non_json_body_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REFRESH_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let outcome = refresher(&server, signed_in()).refresh().await.unwrap();
        assert_matches!(
            outcome,
            RefreshOutcome::Rejected { reason } if reason.starts_with("undecodable")
        );
    }

    #[tokio::test]
    async fn no_refresh_token_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REFRESH_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let outcome = refresher(&server, Arc::new(CookieJar::new()))
            .refresh()
            .await
            .unwrap();
        assert_matches!(outcome, RefreshOutcome::Rejected { .. });
    }

    #[tokio::test]
    async fn transport_failure_is_error() {
        let url = Url::parse("http://127.0.0.1:1/api/token/refresh/").unwrap();
        let refresher = TokenRefresher::new(reqwest::Client::new(), url, signed_in());
        let result = refresher.refresh().await;
        assert_matches!(result, Err(AuthError::Http(_)));
    }
}
