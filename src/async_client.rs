//! Async wrapper around [`DashboardSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! Range fetches issued through [`AsyncDashboardSdk::latest`] (and
//! [`chart_latest`](AsyncDashboardSdk::chart_latest)) are guarded so that
//! only the most recently started one yields data; a slower, older fetch
//! resolves to `None` instead of overwriting newer results.
//!
//! # Example
//!
//! ```no_run
//! use retail_dashboard_sdk::{AsyncDashboardSdk, RangePreset};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncDashboardSdk::builder().build().await.unwrap();
//!
//!     let range = RangePreset::LastMonth.ending_today();
//!     if let Some(points) = sdk.chart_latest(range).await.unwrap() {
//!         println!("{} points", points.len());
//!     }
//! }
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config;
use crate::error::{DashboardError, Result};
use crate::latest::FetchGuard;
use crate::models::{AuthState, Bucket, DashboardMetrics, DateRange};
use crate::DashboardSdk;

fn join_error(e: tokio::task::JoinError) -> DashboardError {
    DashboardError::InvalidArgument(format!("Task join error: {e}"))
}

// ---------------------------------------------------------------------------
// AsyncDashboardSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncDashboardSdk`] instance.
pub struct AsyncDashboardSdkBuilder {
    base_url: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for AsyncDashboardSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: config::DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }
}

impl AsyncDashboardSdkBuilder {
    /// Set the backend base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Build the async SDK.
    ///
    /// The blocking HTTP client is created on the blocking thread pool,
    /// since it must not be constructed inside the async runtime.
    pub async fn build(self) -> Result<AsyncDashboardSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = DashboardSdk::builder().timeout(self.timeout);
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(ua) = self.user_agent {
                builder = builder.user_agent(ua);
            }
            let sdk = builder.build()?;
            Ok(AsyncDashboardSdk {
                inner: Arc::new(Mutex::new(sdk)),
                guard: FetchGuard::new(),
            })
        })
        .await
        .map_err(join_error)?
    }
}

// ---------------------------------------------------------------------------
// AsyncDashboardSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`DashboardSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`DashboardSdk`] is
/// protected by a [`Mutex`] since its connection uses `RefCell` internally.
pub struct AsyncDashboardSdk {
    inner: Arc<Mutex<DashboardSdk>>,
    guard: FetchGuard,
}

impl AsyncDashboardSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncDashboardSdkBuilder {
        AsyncDashboardSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use retail_dashboard_sdk::AsyncDashboardSdk;
    /// # async fn example() -> retail_dashboard_sdk::Result<()> {
    /// # let sdk = AsyncDashboardSdk::builder().build().await?;
    /// let products = sdk.run(|s| s.products().list()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&DashboardSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| DashboardError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(join_error)?
    }

    /// Run `f` as a superseding fetch.
    ///
    /// Starting another `latest` call before this one completes makes this
    /// one resolve to `Ok(None)`, whether it succeeded or failed.
    pub async fn latest<F, T>(&self, f: F) -> Result<Option<T>>
    where
        F: FnOnce(&DashboardSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let ticket = self.guard.begin();
        match self.run(f).await {
            Ok(value) => Ok(ticket.resolve(value)),
            Err(_) if !ticket.is_current() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Supersede every in-flight [`latest`](Self::latest) fetch, e.g. when
    /// the dashboard is closed.
    pub fn cancel_pending(&self) {
        self.guard.cancel_all();
    }

    /// Chart series for `range`.
    pub async fn chart(&self, range: DateRange) -> Result<Vec<Bucket>> {
        self.run(move |s| s.dashboard().chart(&range)).await
    }

    /// Chart series for `range`, or `None` if a newer range was requested
    /// while this one was in flight.
    pub async fn chart_latest(&self, range: DateRange) -> Result<Option<Vec<Bucket>>> {
        self.latest(move |s| s.dashboard().chart(&range)).await
    }

    /// Dashboard metrics for `range`, latest request wins.
    pub async fn metrics_latest(&self, range: DateRange) -> Result<Option<DashboardMetrics>> {
        self.latest(move |s| s.dashboard().metrics(&range)).await
    }

    /// Resolve the session state asynchronously.
    pub async fn check_auth(&self) -> Result<AuthState> {
        self.run(|s| s.auth().check()).await
    }

    /// Close the SDK, releasing the HTTP client on the blocking pool.
    pub async fn close(self) -> Result<()> {
        self.guard.cancel_all();
        tokio::task::spawn_blocking(move || {
            drop(self);
            Ok(())
        })
        .await
        .map_err(join_error)?
    }
}
