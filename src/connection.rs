//! Session-cookie HTTP connection to the retail backend.
//!
//! Wraps a blocking `reqwest` client with a cookie store, so the session
//! cookie set by `/auth/login` is sent on every later request. Responses are
//! decoded from JSON; a 401 from any endpoint marks the session as
//! not authenticated.

use std::cell::RefCell;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::models::AuthState;

pub struct Connection {
    client: Client,
    base_url: String,
    /// Session state as last observed by this connection.
    auth: RefCell<AuthState>,
}

impl Connection {
    /// Create a connection to `base_url` (scheme and host, optionally a
    /// path prefix; trailing slashes are ignored).
    pub fn new(base_url: &str, timeout: Duration, user_agent: Option<&str>) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(DashboardError::InvalidArgument(format!(
                "base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let mut builder = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(10));
        if let Some(ua) = user_agent {
            builder = builder.user_agent(ua.to_string());
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.to_string(),
            auth: RefCell::new(AuthState::Loading),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth.borrow().clone()
    }

    pub fn set_auth_state(&self, state: AuthState) {
        *self.auth.borrow_mut() = state;
    }

    // -- Requests ------------------------------------------------------------

    pub fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let req = self.client.get(self.url(path)).query(query);
        self.send("GET", path, req)
    }

    pub fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.client.post(self.url(path)).json(body);
        self.send("POST", path, req)
    }

    /// POST without a request body.
    pub fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let req = self.client.post(self.url(path));
        self.send("POST", path, req)
    }

    pub fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.client.put(self.url(path)).json(body);
        self.send("PUT", path, req)
    }

    pub fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let req = self.client.delete(self.url(path));
        self.send("DELETE", path, req)
    }

    fn send<T: DeserializeOwned>(&self, method: &str, path: &str, req: RequestBuilder) -> Result<T> {
        tracing::debug!(method, path, "sending request");
        let resp = req.send()?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(method, path, "unauthorized response; session cleared");
            self.set_auth_state(AuthState::NotAuthenticated);
            return Err(DashboardError::Unauthorized);
        }

        let body = resp.text()?;

        if !status.is_success() {
            return Err(DashboardError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        // Endpoints such as logout may answer with an empty body.
        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        Ok(serde_json::from_str(body)?)
    }
}

/// Message for a failed response: the body's `message` field if it is JSON,
/// otherwise the raw body, otherwise the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
