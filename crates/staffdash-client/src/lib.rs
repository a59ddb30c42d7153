//! # staffdash-client
//!
//! Authenticated access to the staff dashboard API.
//!
//! - [`executor`]: [`ApiClient`], which sends JSON requests and renews an
//!   expired access token once before giving up
//! - [`login`]: [`LoginSubmitter`], which trades email and password for a
//!   token pair
//! - [`dashboard`]: [`fetch_counts`] and the [`PieChart`] built from them
//! - [`navigation`]: the [`Navigator`] seam for page transitions
//!
//! All flows share one [`ClientContext`] holding the HTTP client, endpoint
//! URLs, routes, the credential store and the navigator.

#![deny(unsafe_code)]

pub mod context;
pub mod dashboard;
pub mod errors;
pub mod executor;
pub mod login;
pub mod navigation;
pub mod request;

pub use context::{ClientContext, Endpoints};
pub use dashboard::{PieChart, Share, fetch_counts};
pub use errors::{ClientError, DEFAULT_ERROR_MESSAGE};
pub use executor::ApiClient;
pub use login::{LoginForm, LoginSubmitter};
pub use navigation::{NavigationLog, Navigator, Routes};
pub use request::PendingRequest;
