//! Retail dashboard SDK for Rust.
//!
//! Typed client for a small retail/inventory backend: session login,
//! product and customer lookups, import and order submission, and the
//! revenue/profit dashboard. Sales samples for a date range are turned into
//! a dense day/week/month series ready for charting.
//!
//! # Quick start
//!
//! ```no_run
//! use retail_dashboard_sdk::{DashboardSdk, RangePreset};
//!
//! let sdk = DashboardSdk::builder()
//!     .base_url("http://localhost:5000")
//!     .build()
//!     .unwrap();
//!
//! sdk.auth().login("admin", "secret").unwrap();
//!
//! let range = RangePreset::LastThreeMonths.ending_today();
//! for point in sdk.dashboard().chart(&range).unwrap() {
//!     println!("{} {} {}", point.label, point.revenue, point.profit);
//! }
//! ```

pub mod aggregate;
#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod connection;
pub mod display;
pub mod drafts;
pub mod error;
pub mod latest;
pub mod models;
pub mod queries;
pub mod ranges;

pub use aggregate::{bucket_series, chart_data, SampleIndex};
#[cfg(feature = "async")]
pub use async_client::AsyncDashboardSdk;
pub use connection::Connection;
pub use drafts::{ImportDraft, OrderDraft};
pub use error::{DashboardError, Result};
pub use latest::{FetchGuard, FetchTicket};
pub use models::{AuthState, Bucket, DateRange, Granularity, Sample};
pub use ranges::RangePreset;

use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// DashboardSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`DashboardSdk`] instance.
///
/// Use [`DashboardSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](DashboardSdkBuilder::build) to create the SDK.
pub struct DashboardSdkBuilder {
    base_url: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for DashboardSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: config::DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }
}

impl DashboardSdkBuilder {
    /// Set the backend base URL.
    ///
    /// If not set, the `RETAIL_API_URL` environment variable is used, and
    /// `http://localhost:5000` if that is unset too.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header sent with every request.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Build the SDK. No request is made until the first query.
    pub fn build(self) -> Result<DashboardSdk> {
        if self.timeout.is_zero() {
            return Err(DashboardError::InvalidArgument(
                "timeout must be greater than zero".into(),
            ));
        }
        let base_url = self.base_url.unwrap_or_else(config::default_base_url);
        let conn = Connection::new(&base_url, self.timeout, self.user_agent.as_deref())?;
        Ok(DashboardSdk { conn })
    }
}

// ---------------------------------------------------------------------------
// DashboardSdk
// ---------------------------------------------------------------------------

/// The main entry point for the SDK.
///
/// Wraps a [`Connection`] (which owns the HTTP client, its cookie store and
/// the session state) and exposes domain-specific query interfaces as
/// lightweight borrowing wrappers.
pub struct DashboardSdk {
    conn: Connection,
}

impl DashboardSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> DashboardSdkBuilder {
        DashboardSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access login, logout, registration and the session check.
    pub fn auth(&self) -> queries::AuthQuery<'_> {
        queries::AuthQuery::new(&self.conn)
    }

    /// Access dashboard metrics and chart series.
    pub fn dashboard(&self) -> queries::DashboardQuery<'_> {
        queries::DashboardQuery::new(&self.conn)
    }

    /// Access the product catalogue.
    pub fn products(&self) -> queries::ProductQuery<'_> {
        queries::ProductQuery::new(&self.conn)
    }

    /// Access customers.
    pub fn customers(&self) -> queries::CustomerQuery<'_> {
        queries::CustomerQuery::new(&self.conn)
    }

    /// Submit stock imports.
    pub fn imports(&self) -> queries::ImportQuery<'_> {
        queries::ImportQuery::new(&self.conn)
    }

    /// Submit sales orders.
    pub fn orders(&self) -> queries::OrderQuery<'_> {
        queries::OrderQuery::new(&self.conn)
    }

    /// Access user administration.
    pub fn users(&self) -> queries::UserQuery<'_> {
        queries::UserQuery::new(&self.conn)
    }

    // -- Session -----------------------------------------------------------

    /// Session state as last observed. `Loading` until the first
    /// [`check`](queries::AuthQuery::check) or login.
    pub fn auth_state(&self) -> AuthState {
        self.conn.auth_state()
    }

    pub fn is_authenticated(&self) -> bool {
        self.conn.auth_state().is_authenticated()
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for DashboardSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.conn.auth_state() {
            AuthState::Loading => "loading".to_string(),
            AuthState::Authenticated(user) => format!("authenticated as {}", user.username),
            AuthState::NotAuthenticated => "not authenticated".to_string(),
        };
        write!(
            f,
            "DashboardSdk(base_url={}, session={})",
            self.conn.base_url(),
            state
        )
    }
}
