//! Shared dependencies for the API client and login submitter.

use std::sync::Arc;

use staffdash_auth::CredentialStore;
use staffdash_settings::{ApiSettings, StaffdashSettings};
use url::Url;

use crate::errors::ClientError;
use crate::navigation::{Navigator, Routes};

/// Absolute endpoint URLs on the API server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    /// Credential login.
    pub login: Url,
    /// Dashboard counts.
    pub dashboard: Url,
    /// Access token refresh.
    pub refresh: Url,
}

impl Endpoints {
    /// Join the configured paths onto the base URL.
    pub fn from_settings(api: &ApiSettings) -> Result<Self, ClientError> {
        let base = Url::parse(&api.base_url)?;
        Ok(Self {
            login: base.join(&api.login_path)?,
            dashboard: base.join(&api.dashboard_path)?,
            refresh: base.join(&api.refresh_path)?,
        })
    }
}

/// Everything a flow needs: HTTP client, endpoints, routes, the credential
/// store and the navigator.
#[derive(Clone)]
pub struct ClientContext {
    /// Shared HTTP connection pool.
    pub http: reqwest::Client,
    /// API endpoints.
    pub endpoints: Endpoints,
    /// Navigation targets.
    pub routes: Routes,
    /// Token storage.
    pub store: Arc<dyn CredentialStore>,
    /// Navigation sink.
    pub navigator: Arc<dyn Navigator>,
}

impl ClientContext {
    /// Build a context from settings with a fresh HTTP client.
    pub fn new(
        settings: &StaffdashSettings,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            http: reqwest::Client::new(),
            endpoints: Endpoints::from_settings(&settings.api)?,
            routes: Routes::from(&settings.navigation),
            store,
            navigator,
        })
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavigationLog;
    use staffdash_auth::CookieJar;

    #[test]
    fn endpoints_from_default_settings() {
        let endpoints = Endpoints::from_settings(&ApiSettings::default()).unwrap();
        assert_eq!(endpoints.login.as_str(), "http://127.0.0.1:8000/admin/login");
        assert_eq!(
            endpoints.dashboard.as_str(),
            "http://127.0.0.1:8000/mobile/dashboard-api"
        );
        assert_eq!(
            endpoints.refresh.as_str(),
            "http://127.0.0.1:8000/api/token/refresh/"
        );
    }

    #[test]
    fn absolute_paths_replace_base_path() {
        let api = ApiSettings {
            base_url: "https://panel.example.com/v1/".to_string(),
            ..Default::default()
        };
        let endpoints = Endpoints::from_settings(&api).unwrap();
        assert_eq!(
            endpoints.login.as_str(),
            "https://panel.example.com/admin/login"
        );
    }

    #[test]
    fn invalid_base_url_is_error() {
        let api = ApiSettings {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            Endpoints::from_settings(&api),
            Err(ClientError::Url(_))
        ));
    }

    #[test]
    fn context_from_settings() {
        let ctx = ClientContext::new(
            &StaffdashSettings::default(),
            Arc::new(CookieJar::new()),
            Arc::new(NavigationLog::new()),
        )
        .unwrap();
        assert_eq!(ctx.routes, Routes::default());
        assert!(ctx.store.access_token().is_none());
    }
}
