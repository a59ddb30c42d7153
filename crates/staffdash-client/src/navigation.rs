//! Navigation side effects.
//!
//! Login sends the user to the dashboard; an unrenewable session sends them
//! to the login route. Both go through a [`Navigator`] so callers decide what
//! "navigating" means (a page load, a CLI hint, a test assertion).

use parking_lot::Mutex;
use staffdash_settings::NavigationSettings;

/// Receives navigation requests.
pub trait Navigator: Send + Sync {
    /// Send the user to `location`.
    fn navigate(&self, location: &str);
}

/// Navigation targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Routes {
    /// Login entry point.
    pub login: String,
    /// Dashboard page.
    pub dashboard: String,
}

impl From<&NavigationSettings> for Routes {
    fn from(settings: &NavigationSettings) -> Self {
        Self {
            login: settings.login_route.clone(),
            dashboard: settings.dashboard_route.clone(),
        }
    }
}

impl Default for Routes {
    fn default() -> Self {
        Self::from(&NavigationSettings::default())
    }
}

/// [`Navigator`] that records every location it is sent to.
#[derive(Debug, Default)]
pub struct NavigationLog {
    visits: Mutex<Vec<String>>,
}

impl NavigationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent navigation target.
    pub fn last(&self) -> Option<String> {
        self.visits.lock().last().cloned()
    }

    /// All navigation targets, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.visits.lock().clone()
    }
}

impl Navigator for NavigationLog {
    fn navigate(&self, location: &str) {
        tracing::info!(location, "navigating");
        self.visits.lock().push(location.to_string());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_routes() {
        let routes = Routes::default();
        assert_eq!(routes.login, "/login");
        assert_eq!(routes.dashboard, "dashboard.html");
    }

    #[test]
    fn log_records_in_order() {
        let log = NavigationLog::new();
        assert!(log.last().is_none());
        log.navigate("dashboard.html");
        log.navigate("/login");
        assert_eq!(log.last().as_deref(), Some("/login"));
        assert_eq!(log.history(), vec!["dashboard.html", "/login"]);
    }
}
