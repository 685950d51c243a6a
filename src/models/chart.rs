use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::DATE_FORMAT;
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// DateRange — Inclusive calendar range selected on the dashboard
// ---------------------------------------------------------------------------

/// Inclusive `[start, end]` calendar range.
///
/// Serializes as `{"start_date": "yyyy-mm-dd", "end_date": "yyyy-mm-dd"}`,
/// matching the backend's query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(rename = "start_date")]
    pub start: NaiveDate,
    #[serde(rename = "end_date")]
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidArgument(format!(
                "range start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a range from two ISO `yyyy-mm-dd` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| {
                DashboardError::InvalidArgument(format!("invalid date '{}': {}", s, e))
            })
        };
        Self::new(parse(start)?, parse(end)?)
    }

    /// A single-day range.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, both endpoints included.
    /// Zero for an inverted range.
    pub fn num_days(&self) -> i64 {
        if !self.is_valid() {
            return 0;
        }
        (self.end - self.start).num_days() + 1
    }

    /// `start_date` / `end_date` query parameters in wire format.
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("start_date", self.start.format(DATE_FORMAT).to_string()),
            ("end_date", self.end.format(DATE_FORMAT).to_string()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Sample — One day's revenue and profit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub date: NaiveDate,
    pub revenue: f64,
    pub profit: f64,
}

impl Sample {
    pub fn new(date: NaiveDate, revenue: f64, profit: f64) -> Self {
        Self {
            date,
            revenue,
            profit,
        }
    }
}

// ---------------------------------------------------------------------------
// Granularity — Bucket size chosen from the range span
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

// ---------------------------------------------------------------------------
// Bucket — One chart point
// ---------------------------------------------------------------------------

/// Aggregated revenue/profit for one day, week or month.
///
/// `date` is the bucket start and is what the line chart keys on;
/// `label` is the axis tick text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub date: NaiveDate,
    pub revenue: f64,
    pub profit: f64,
    pub label: String,
}
