//! Quick-select ranges offered next to the date pickers.

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::DateRange;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePreset {
    #[default]
    LastWeek,
    LastMonth,
    LastThreeMonths,
    LastSixMonths,
    LastYear,
}

impl RangePreset {
    pub fn all() -> &'static [RangePreset] {
        &[
            RangePreset::LastWeek,
            RangePreset::LastMonth,
            RangePreset::LastThreeMonths,
            RangePreset::LastSixMonths,
            RangePreset::LastYear,
        ]
    }

    /// Days subtracted from the end date to get the start date.
    pub fn days(&self) -> u64 {
        match self {
            RangePreset::LastWeek => 7,
            RangePreset::LastMonth => 30,
            RangePreset::LastThreeMonths => 90,
            RangePreset::LastSixMonths => 180,
            RangePreset::LastYear => 365,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RangePreset::LastWeek => "Last Week",
            RangePreset::LastMonth => "Last Month",
            RangePreset::LastThreeMonths => "Last 3 Months",
            RangePreset::LastSixMonths => "Last 6 Months",
            RangePreset::LastYear => "Last Year",
        }
    }

    /// `[end - days, end]`.
    pub fn ending_on(&self, end: NaiveDate) -> DateRange {
        let start = end
            .checked_sub_days(Days::new(self.days()))
            .unwrap_or(NaiveDate::MIN);
        DateRange { start, end }
    }

    /// Preset range ending today in local time.
    pub fn ending_today(&self) -> DateRange {
        self.ending_on(Local::now().date_naive())
    }
}

/// Range the dashboard opens with: the last week, ending today.
pub fn default_range() -> DateRange {
    RangePreset::default().ending_today()
}
