//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]`, so a user file
//! only needs the keys it overrides. Every type implements [`Default`] with
//! the production values.

use serde::{Deserialize, Serialize};

/// Root settings type.
///
/// # JSON Format
///
/// ```json
/// {
///   "api": { "baseUrl": "https://panel.example.com" },
///   "logging": { "level": "info" }
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffdashSettings {
    /// Remote API location and endpoint paths.
    pub api: ApiSettings,
    /// Navigation targets issued after login and on session expiry.
    pub navigation: NavigationSettings,
    /// Credential persistence.
    pub storage: StorageSettings,
    /// Log output.
    pub logging: LoggingSettings,
    /// Dashboard pie chart styling.
    pub chart: ChartSettings,
}

/// Remote API settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiSettings {
    /// Scheme, host and port of the API server.
    pub base_url: String,
    /// Credential login endpoint.
    pub login_path: String,
    /// Dashboard counts endpoint.
    pub dashboard_path: String,
    /// Access token refresh endpoint.
    pub refresh_path: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            login_path: "/admin/login".to_string(),
            dashboard_path: "/mobile/dashboard-api".to_string(),
            refresh_path: "/api/token/refresh/".to_string(),
        }
    }
}

/// Where the user is sent after login and when the session cannot be renewed.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationSettings {
    /// Login entry point, used when a refresh fails.
    pub login_route: String,
    /// Dashboard page, used after a successful login.
    pub dashboard_route: String,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            login_route: "/login".to_string(),
            dashboard_route: "dashboard.html".to_string(),
        }
    }
}

/// Credential storage settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageSettings {
    /// Credentials file. `None` means `~/.staffdash/credentials.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<String>,
}

/// Logging settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Minimum level (`RUST_LOG` takes precedence when set).
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Pie chart styling, rendered into the Chart.js config.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartSettings {
    /// Dataset label.
    pub label: String,
    /// Slice fill colours, applied in label order.
    pub background_colors: Vec<String>,
    /// Slice border colour.
    pub border_color: String,
    /// Slice border width in pixels.
    pub border_width: u32,
    /// Legend placement (`top`, `bottom`, `left`, `right`).
    pub legend_position: String,
    /// Legend label font size.
    pub legend_font_size: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            label: "Lavozimlar Soni".to_string(),
            background_colors: vec![
                "rgba(0, 128, 0, 0.7)".to_string(),
                "rgba(0, 128, 0, 0.3)".to_string(),
                "rgba(0, 128, 0, 0.2)".to_string(),
                "rgba(0, 128, 0, 0.1)".to_string(),
            ],
            border_color: "rgba(255, 255, 255, 1)".to_string(),
            border_width: 1,
            legend_position: "bottom".to_string(),
            legend_font_size: 14,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
