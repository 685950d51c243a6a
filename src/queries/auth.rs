//! Session login, logout, registration and the auth state check.

use serde_json::Value;

use crate::config;
use crate::connection::Connection;
use crate::error::{DashboardError, Result};
use crate::models::{ApiMessage, AuthResponse, AuthState, Credentials, LoginResponse, User};

// ---------------------------------------------------------------------------
// AuthQuery
// ---------------------------------------------------------------------------

/// Session operations against the `/auth` endpoints.
///
/// The session itself lives in the connection's cookie store; this
/// interface only drives it and tracks the resulting [`AuthState`].
pub struct AuthQuery<'a> {
    conn: &'a Connection,
}

impl<'a> AuthQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Log in and store the session cookie.
    pub fn login(&self, username: &str, password: &str) -> Result<User> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(DashboardError::Validation(
                "username and password are required".into(),
            ));
        }

        let resp: LoginResponse = self
            .conn
            .post(config::AUTH_LOGIN, &Credentials::new(username, password))?;

        match (resp.success, resp.user) {
            (true, Some(user)) => {
                tracing::info!(user = %user.username, "logged in");
                self.conn.set_auth_state(AuthState::Authenticated(user.clone()));
                Ok(user)
            }
            _ => {
                self.conn.set_auth_state(AuthState::NotAuthenticated);
                Err(DashboardError::Rejected(
                    resp.message.unwrap_or_else(|| "login failed".into()),
                ))
            }
        }
    }

    /// End the session. The local state is cleared even if the backend
    /// reports an error.
    pub fn logout(&self) -> Result<()> {
        let result = self.conn.post_empty::<Value>(config::AUTH_LOGOUT);
        self.conn.set_auth_state(AuthState::NotAuthenticated);
        tracing::info!("logged out");
        result.map(|_| ())
    }

    pub fn register(&self, username: &str, password: &str) -> Result<ApiMessage> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(DashboardError::Validation(
                "username and password are required".into(),
            ));
        }
        let resp: ApiMessage = self
            .conn
            .post(config::AUTH_REGISTER, &Credentials::new(username, password))?;
        if !resp.success {
            return Err(DashboardError::Rejected(
                resp.message.unwrap_or_else(|| "registration failed".into()),
            ));
        }
        Ok(resp)
    }

    /// The user owning the current session, if any.
    pub fn current_user(&self) -> Result<Option<User>> {
        let resp: AuthResponse = self.conn.get(config::AUTH_USER, &[])?;
        Ok(if resp.success { resp.user } else { None })
    }

    /// Resolve the session state: `Loading` while the check runs, then
    /// `Authenticated` or `NotAuthenticated`. A 401 is an ordinary
    /// not-authenticated outcome; other failures are returned after the
    /// state has been set to `NotAuthenticated`.
    pub fn check(&self) -> Result<AuthState> {
        self.conn.set_auth_state(AuthState::Loading);
        let state = match self.current_user() {
            Ok(Some(user)) => AuthState::Authenticated(user),
            Ok(None) | Err(DashboardError::Unauthorized) => AuthState::NotAuthenticated,
            Err(e) => {
                self.conn.set_auth_state(AuthState::NotAuthenticated);
                return Err(e);
            }
        };
        self.conn.set_auth_state(state.clone());
        Ok(state)
    }

    pub fn state(&self) -> AuthState {
        self.conn.auth_state()
    }
}
