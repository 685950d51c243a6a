//! Import and order submission.

use crate::config;
use crate::connection::Connection;
use crate::drafts::{ImportDraft, OrderDraft};
use crate::error::{DashboardError, Result};
use crate::models::ApiMessage;

fn accepted(resp: ApiMessage, what: &str) -> Result<String> {
    if resp.success {
        Ok(resp.message.unwrap_or_else(|| format!("{} saved", what)))
    } else {
        Err(DashboardError::Rejected(
            resp.message.unwrap_or_else(|| format!("{} submission failed", what)),
        ))
    }
}

/// Records stock purchases via `POST /api/v1/import`.
pub struct ImportQuery<'a> {
    conn: &'a Connection,
}

impl<'a> ImportQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Validate and submit a draft. On success the draft is reset and the
    /// backend's confirmation message is returned.
    pub fn submit(&self, draft: &mut ImportDraft) -> Result<String> {
        let body = draft.to_submission()?;
        let resp: ApiMessage = self.conn.post(config::IMPORT, &body)?;
        let message = accepted(resp, "import")?;
        tracing::info!(lines = body.import_lines.len(), total = body.total(), "import submitted");
        draft.reset();
        Ok(message)
    }
}

/// Records sales via `POST /api/v1/order`.
pub struct OrderQuery<'a> {
    conn: &'a Connection,
}

impl<'a> OrderQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Validate and submit a draft. On success the draft is reset and the
    /// backend's confirmation message is returned.
    pub fn submit(&self, draft: &mut OrderDraft) -> Result<String> {
        let body = draft.to_submission()?;
        let resp: ApiMessage = self.conn.post(config::ORDER, &body)?;
        let message = accepted(resp, "order")?;
        tracing::info!(lines = body.order_lines.len(), total = body.total(), "order submitted");
        draft.reset();
        Ok(message)
    }
}
