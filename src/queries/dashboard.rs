//! Dashboard metrics, headline stats and chart series.

use crate::aggregate;
use crate::config;
use crate::connection::Connection;
use crate::error::{DashboardError, Result};
use crate::models::{Bucket, DashboardMetrics, DashboardStats, DateRange, MetricsEnvelope, SalesSummary};

// ---------------------------------------------------------------------------
// DashboardQuery
// ---------------------------------------------------------------------------

/// Query interface for `/api/v1/dashboard`.
///
/// Every call fetches fresh data for the given range; nothing is cached.
pub struct DashboardQuery<'a> {
    conn: &'a Connection,
}

impl<'a> DashboardQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Sales, import and product metrics for `range`.
    pub fn metrics(&self, range: &DateRange) -> Result<DashboardMetrics> {
        if !range.is_valid() {
            return Err(DashboardError::InvalidArgument(format!(
                "range start {} is after end {}",
                range.start, range.end
            )));
        }

        let envelope: MetricsEnvelope = self
            .conn
            .get(config::DASHBOARD_METRICS, &range.query_params())?;

        if !envelope.success {
            return Err(DashboardError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "metrics request failed".into()),
            ));
        }
        Ok(envelope.metrics.unwrap_or_default())
    }

    /// Product, import and order counters for the stat cards.
    pub fn stats(&self) -> Result<DashboardStats> {
        self.conn.get(config::DASHBOARD_STATS, &[])
    }

    /// Revenue and profit series for `range`, bucketed for the chart.
    pub fn chart(&self, range: &DateRange) -> Result<Vec<Bucket>> {
        let metrics = self.metrics(range)?;
        Ok(aggregate::chart_data(
            Some(range),
            Some(&metrics.sales.order_at_list),
        ))
    }

    /// Backend-computed revenue and profit totals for `range`.
    pub fn summary(&self, range: &DateRange) -> Result<SalesSummary> {
        let metrics = self.metrics(range)?;
        Ok(SalesSummary::from(&metrics.sales))
    }
}
