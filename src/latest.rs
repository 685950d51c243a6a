//! Latest-request-wins guard for overlapping fetches.
//!
//! Each fetch takes a [`FetchTicket`] before it starts. Starting another
//! fetch on the same [`FetchGuard`] supersedes every earlier ticket, so a
//! slow response for an old range is dropped instead of overwriting the
//! data of a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct FetchGuard {
    latest: Arc<AtomicU64>,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch, superseding all outstanding tickets.
    pub fn begin(&self) -> FetchTicket {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        FetchTicket {
            id,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Supersede all outstanding tickets without starting a new fetch.
    pub fn cancel_all(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
pub struct FetchTicket {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl FetchTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether no newer fetch has started since this ticket was issued.
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.id
    }

    /// Pass `value` through if the ticket is still current.
    pub fn resolve<T>(&self, value: T) -> Option<T> {
        if self.is_current() {
            Some(value)
        } else {
            tracing::warn!(ticket = self.id, "discarding superseded fetch result");
            None
        }
    }
}
