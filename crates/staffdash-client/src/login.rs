//! Credential login.

use reqwest::header::ACCEPT;
use serde::Serialize;
use serde_json::Value;
use staffdash_auth::{ACCESS_TOKEN, REFRESH_TOKEN, TokenPair};

use crate::context::ClientContext;
use crate::errors::{ClientError, request_error};

/// Email and password submitted to the login endpoint.
#[derive(Clone, Serialize)]
pub struct LoginForm {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl LoginForm {
    /// Create a form.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Posts credentials, stores the issued tokens and opens the dashboard.
pub struct LoginSubmitter {
    ctx: ClientContext,
}

impl LoginSubmitter {
    /// Create a submitter over the shared context.
    pub fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Log in with `form`.
    ///
    /// Tokens are stored and the dashboard route is opened only when the
    /// server answers with a success status and both tokens. Anything else
    /// is a [`ClientError::Request`] and leaves the store untouched.
    #[tracing::instrument(skip_all, fields(email = %form.email))]
    pub async fn submit(&self, form: &LoginForm) -> Result<TokenPair, ClientError> {
        let resp = self
            .ctx
            .http
            .post(self.ctx.endpoints.login.clone())
            .header(ACCEPT, "application/json")
            .json(form)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let success = resp.status().is_success();
        let payload: Option<Value> = serde_json::from_str(&resp.text().await?).ok();

        if !success {
            tracing::debug!(status, "login rejected");
            return Err(request_error(status, payload.as_ref()));
        }

        let Some(tokens) = payload.as_ref().and_then(issued_tokens) else {
            // Wrong credentials come back as 200 with an error object.
            let reported = payload
                .as_ref()
                .and_then(|p| p.get("status_code"))
                .and_then(Value::as_u64)
                .and_then(|code| u16::try_from(code).ok())
                .unwrap_or(status);
            tracing::debug!(status = reported, "login response carried no tokens");
            return Err(request_error(reported, payload.as_ref()));
        };

        self.ctx.store.set(&tokens.access, &tokens.refresh)?;
        tracing::info!("login tokens stored");
        self.ctx.navigator.navigate(&self.ctx.routes.dashboard);

        Ok(tokens)
    }
}

fn issued_tokens(payload: &Value) -> Option<TokenPair> {
    let token = |name: &str| {
        payload
            .get(name)
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    };
    Some(TokenPair::new(token(ACCESS_TOKEN)?, token(REFRESH_TOKEN)?))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
