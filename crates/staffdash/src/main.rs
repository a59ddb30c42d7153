//! # staffdash
//!
//! Command-line client for the staff dashboard: log in, show the position
//! counts as a table or a Chart.js pie chart, inspect or clear stored tokens.

#![deny(unsafe_code)]

mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use staffdash_auth::{CredentialStore, FileCredentialStore};
use staffdash_client::{
    ApiClient, ClientContext, ClientError, LoginForm, LoginSubmitter, NavigationLog, PieChart,
    fetch_counts,
};
use staffdash_settings::{ChartSettings, default_credentials_path, load_settings_from_path};

/// Staff dashboard client.
#[derive(Parser, Debug)]
#[command(name = "staffdash", about = "Staff dashboard client")]
struct Cli {
    /// Settings file (defaults to `~/.staffdash/settings.json`).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `staffdash_client=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Log in and store the issued tokens.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Show staff counts per position.
    Dashboard {
        /// Print the Chart.js pie chart configuration instead of a table.
        #[arg(long)]
        chart: bool,
    },
    /// Remove stored tokens.
    Logout,
    /// Report which tokens are stored.
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(staffdash_settings::settings_path);
    let settings = load_settings_from_path(&settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;

    logging::init_subscriber(cli.log_level.as_deref().unwrap_or(&settings.logging.level));
    tracing::debug!(path = %settings_path.display(), base_url = %settings.api.base_url, "settings loaded");

    let credentials_path = settings
        .storage
        .credentials_path
        .as_ref()
        .map_or_else(default_credentials_path, PathBuf::from);
    let store = Arc::new(FileCredentialStore::new(credentials_path));
    let navigator = Arc::new(NavigationLog::new());
    let ctx = ClientContext::new(&settings, store.clone(), navigator.clone())
        .context("Invalid API settings")?;

    match cli.command {
        Command::Login { email, password } => {
            let _ = LoginSubmitter::new(ctx)
                .submit(&LoginForm::new(email, password))
                .await
                .context("Login failed")?;
            println!("Logged in.");
            if let Some(location) = navigator.last() {
                println!("Next: {location}");
            }
        }
        Command::Dashboard { chart } => {
            show_dashboard(&ApiClient::new(ctx), &settings.chart, chart).await?;
        }
        Command::Logout => {
            store.clear().context("Failed to clear stored tokens")?;
            println!("Logged out.");
        }
        Command::Status => print_status(&store),
    }

    Ok(())
}

async fn show_dashboard(client: &ApiClient, style: &ChartSettings, as_chart: bool) -> Result<()> {
    let counts = match fetch_counts(client).await {
        Ok(counts) => counts,
        Err(ClientError::SessionExpired { location }) => {
            println!("{location}");
            bail!("Session expired, log in again");
        }
        Err(e) => return Err(e).context("Failed to fetch dashboard"),
    };
    let chart = PieChart::from_counts(&counts, style).context("Failed to build chart")?;

    if as_chart {
        println!("{}", serde_json::to_string_pretty(&chart)?);
        return Ok(());
    }

    let shares = chart.shares();
    let width = shares
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0)
        .max("Position".len());
    println!("{:<width$}  {:>8}  {:>6}", "Position", "Count", "Share");
    for share in &shares {
        println!(
            "{:<width$}  {:>8}  {:>5.1}%",
            share.label, share.value, share.percent
        );
    }
    Ok(())
}

fn print_status(store: &FileCredentialStore) {
    let state = |present: bool| if present { "stored" } else { "missing" };
    println!("Credentials: {}", store.path().display());
    println!("Access token: {}", state(store.access_token().is_some()));
    println!("Refresh token: {}", state(store.refresh_token().is_some()));
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_login() {
        let cli = Cli::try_parse_from([
            "staffdash",
            "login",
            "--email",
            "boss@example.uz",
            "--password",
            "pw",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Login {
                email: "boss@example.uz".to_string(),
                password: "pw".to_string(),
            }
        );
        assert!(cli.settings.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "staffdash",
            "dashboard",
            "--chart",
            "--settings",
            "/tmp/s.json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.command, Command::Dashboard { chart: true });
        assert_eq!(cli.settings, Some(PathBuf::from("/tmp/s.json")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn login_requires_credentials() {
        assert!(Cli::try_parse_from(["staffdash", "login", "--email", "a@b.uz"]).is_err());
    }

    #[test]
    fn subcommand_required() {
        assert!(Cli::try_parse_from(["staffdash"]).is_err());
    }
}
