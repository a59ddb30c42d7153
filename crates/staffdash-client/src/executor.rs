//! Authenticated request execution.
//!
//! [`ApiClient::execute`] runs a request in at most two steps:
//!
//! 1. Send it. A success status returns the decoded body.
//! 2. On a token-expiry payload (`detail` and `messages` both present), ask
//!    the [`TokenRefresher`] for a new access token and send the request once
//!    more with the new bearer token. If the refresh is rejected the user is
//!    navigated to the login route and [`ClientError::SessionExpired`] is
//!    returned.
//!
//! Any failure on the second step is a plain [`ClientError::Request`].

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde_json::Value;
use staffdash_auth::{RefreshOutcome, TokenRefresher};
use url::Url;

use crate::context::ClientContext;
use crate::errors::{ClientError, request_error, truthy};
use crate::request::PendingRequest;

/// Outcome of sending a request once.
#[derive(Debug)]
enum Attempt {
    Success(Value),
    Failure(Failure),
}

/// A non-success response.
#[derive(Debug)]
struct Failure {
    status: u16,
    payload: Option<Value>,
}

impl Failure {
    /// Token-expiry responses carry both `detail` and `messages`.
    fn is_token_expiry(&self) -> bool {
        self.payload.as_ref().is_some_and(|payload| {
            payload.get("detail").is_some_and(truthy) && payload.get("messages").is_some_and(truthy)
        })
    }

    fn into_error(self) -> ClientError {
        request_error(self.status, self.payload.as_ref())
    }
}

/// Sends JSON requests and recovers from an expired access token.
pub struct ApiClient {
    ctx: ClientContext,
    refresher: TokenRefresher,
}

impl ApiClient {
    /// Create a client sharing the context's HTTP pool and credential store.
    pub fn new(ctx: ClientContext) -> Self {
        let refresher = TokenRefresher::new(
            ctx.http.clone(),
            ctx.endpoints.refresh.clone(),
            ctx.store.clone(),
        );
        Self { ctx, refresher }
    }

    /// Shared context.
    pub fn context(&self) -> &ClientContext {
        &self.ctx
    }

    /// GET request to `url` carrying the stored access token, if any.
    pub fn authorized(&self, url: Url) -> Result<PendingRequest, ClientError> {
        let request = PendingRequest::get(url);
        match self.ctx.store.access_token() {
            Some(token) => request.with_bearer(&token),
            None => Ok(request),
        }
    }

    /// Send `request`, refreshing the access token and retrying once if the
    /// server reports it expired.
    #[tracing::instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub async fn execute(&self, request: PendingRequest) -> Result<Value, ClientError> {
        let failure = match self.attempt(&request).await? {
            Attempt::Success(body) => return Ok(body),
            Attempt::Failure(failure) => failure,
        };

        if !failure.is_token_expiry() {
            tracing::debug!(status = failure.status, "request failed");
            return Err(failure.into_error());
        }

        tracing::debug!(status = failure.status, "access token expired, refreshing");
        let access = match self.refresher.refresh().await? {
            RefreshOutcome::Refreshed { access } => access,
            RefreshOutcome::Rejected { reason } => return Err(self.expire_session(&reason)),
        };

        let retry = request.with_bearer(&access)?;
        match self.attempt(&retry).await? {
            Attempt::Success(body) => Ok(body),
            Attempt::Failure(failure) => {
                tracing::debug!(status = failure.status, "retry after refresh failed");
                Err(failure.into_error())
            }
        }
    }

    async fn attempt(&self, request: &PendingRequest) -> Result<Attempt, ClientError> {
        let mut headers = request.headers().clone();
        let _ = headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = self
            .ctx
            .http
            .request(request.method().clone(), request.url().clone())
            .headers(headers);
        if let Some(body) = request.body() {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if status.is_success() {
            let body = if text.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&text)?
            };
            return Ok(Attempt::Success(body));
        }

        Ok(Attempt::Failure(Failure {
            status: status.as_u16(),
            payload: serde_json::from_str(&text).ok(),
        }))
    }

    fn expire_session(&self, reason: &str) -> ClientError {
        let location = self.ctx.routes.login.clone();
        tracing::warn!(reason, "session expired");
        self.ctx.navigator.navigate(&location);
        ClientError::SessionExpired { location }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavigationLog;
    use assert_matches::assert_matches;
    use reqwest::Method;
    use serde_json::json;
    use staffdash_auth::{CookieJar, CredentialStore};
    use staffdash_settings::StaffdashSettings;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn failure(status: u16, payload: Value) -> Failure {
        Failure {
            status,
            payload: Some(payload),
        }
    }

    fn client(server: &MockServer) -> (ApiClient, Arc<CookieJar>) {
        let mut settings = StaffdashSettings::default();
        settings.api.base_url = server.uri();
        let store = Arc::new(CookieJar::new());
        store.set("A1", "R1").unwrap();
        let ctx = ClientContext::new(&settings, store.clone(), Arc::new(NavigationLog::new()))
            .unwrap();
        (ApiClient::new(ctx), store)
    }

    #[test]
    fn token_expiry_needs_detail_and_messages() {
        assert!(failure(401, json!({"detail": "expired", "messages": [{}]})).is_token_expiry());
        assert!(!failure(401, json!({"detail": "expired"})).is_token_expiry());
        assert!(!failure(401, json!({"messages": [{}]})).is_token_expiry());
        assert!(!failure(401, json!({"detail": "", "messages": [{}]})).is_token_expiry());
        assert!(!Failure { status: 500, payload: None }.is_token_expiry());
    }

    #[test]
    fn failure_into_error_keeps_status() {
        let err = failure(403, json!({"detail": "Forbidden"})).into_error();
        assert_matches!(err, ClientError::Request { status: 403, message } if message == "Forbidden");
    }

    #[tokio::test]
    async fn authorized_uses_stored_access_token() {
        let server = MockServer::start().await;
        let (client, store) = client(&server);
        let url = client.context().endpoints.dashboard.clone();

        let req = client.authorized(url.clone()).unwrap();
        assert_eq!(req.authorization(), Some("Bearer A1"));

        store.clear().unwrap();
        let req = client.authorized(url).unwrap();
        assert!(req.authorization().is_none());
    }

    #[tokio::test]
    async fn content_type_overrides_caller_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/things"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"name": "x"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7})))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client(&server);
        let url = Url::parse(&format!("{}/things", server.uri())).unwrap();
        let request = PendingRequest::new(Method::POST, url)
            .with_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .with_json(json!({"name": "x"}));

        let body = client.execute(request).await.unwrap();
        assert_eq!(body, json!({"id": 7}));
    }

    #[tokio::test]
    async fn empty_success_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/empty"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let (client, _) = client(&server);
        let url = Url::parse(&format!("{}/empty", server.uri())).unwrap();
        let body = client.execute(PendingRequest::get(url)).await.unwrap();
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn non_json_success_body_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let (client, _) = client(&server);
        let url = Url::parse(&format!("{}/html", server.uri())).unwrap();
        let result = client.execute(PendingRequest::get(url)).await;
        assert_matches!(result, Err(ClientError::Json(_)));
    }

    #[tokio::test]
    async fn non_json_failure_uses_default_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/boom"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let (client, _) = client(&server);
        let url = Url::parse(&format!("{}/boom", server.uri())).unwrap();
        let result = client.execute(PendingRequest::get(url)).await;
        assert_matches!(
            result,
            Err(ClientError::Request { status: 502, message }) if message == "An error occurred"
        );
    }
}
