use std::time::Duration;

/// Environment variable consulted when no base URL is set on the builder.
pub const API_URL_ENV: &str = "RETAIL_API_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// Auth
pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_LOGOUT: &str = "/auth/logout";
pub const AUTH_USER: &str = "/auth/user";
pub const AUTH_REGISTER: &str = "/auth/register";

// Users
pub const USERS: &str = "/users";

// Dashboard
pub const DASHBOARD_METRICS: &str = "/api/v1/dashboard/metrics";
pub const DASHBOARD_STATS: &str = "/api/v1/dashboard/stats";

// Inventory and sales
pub const PRODUCTS: &str = "/api/v1/products";
pub const CUSTOMERS: &str = "/api/v1/customers";
pub const IMPORT: &str = "/api/v1/import";
pub const ORDER: &str = "/api/v1/order";

/// Wire format for calendar dates in query strings and request bodies.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn user_path(id: i64) -> String {
    format!("{}/{}", USERS, id)
}

/// Resolve the backend base URL from the environment, falling back to
/// [`DEFAULT_BASE_URL`]. Trailing slashes are stripped.
pub fn default_base_url() -> String {
    match std::env::var(API_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
        _ => DEFAULT_BASE_URL.to_string(),
    }
}
