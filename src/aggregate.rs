//! Gap-filled, bucketed revenue/profit series for the dashboard chart.
//!
//! Granularity is chosen from the whole-month span of the range:
//! up to one month is daily, up to six months is weekly (Monday start),
//! anything longer is monthly. Every calendar unit touched by the range
//! yields exactly one bucket; days without a sample count as zero.
//!
//! Weekly and monthly buckets always cover the whole week or month, so
//! the first and last bucket may include days outside the requested range.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime};

use crate::models::{Bucket, DailySales, DateRange, Granularity, Sample};

const DAY_LABEL: &str = "%d/%m";
const MONTH_LABEL: &str = "%m/%Y";

// ---------------------------------------------------------------------------
// Calendar helpers
// ---------------------------------------------------------------------------

/// Monday of the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(offset)).unwrap_or(NaiveDate::MIN)
}

/// Sunday of the week containing `date`.
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    start_of_week(date)
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX)
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

fn is_last_day_of_month(date: NaiveDate) -> bool {
    date == end_of_month(date)
}

/// Date for a possibly out-of-range month (zero-based, may be negative or
/// past 11) and day, rolling overflow into the following months.
fn rolled_date(year: i32, month0: i32, day: u32) -> Option<NaiveDate> {
    let year = year + month0.div_euclid(12);
    let month = month0.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(u64::from(day) - 1))
}

/// Number of full months from `start` to `end`.
///
/// `end` is moved back by the calendar-month difference; if that lands
/// before `start` the last month is not full. Days past the target month's
/// length roll into the next month, and an end on Feb 28 or 29 is first
/// treated as Feb 30 (so it rolls into March). A one-month span ending on
/// the last day of a month counts as full. Negative when `end < start`.
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    if end < start {
        return -whole_months_between(end, start);
    }
    let calendar =
        (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if calendar < 1 {
        return 0;
    }

    let anchor = if end.month() == 2 && end.day() > 27 {
        rolled_date(end.year(), 1, 30)
    } else {
        Some(end)
    };
    let shifted = anchor.and_then(|a| {
        rolled_date(a.year(), a.month0() as i32 - calendar, a.day())
    });

    let mut last_month_short = shifted.is_some_and(|d| d < start);
    if calendar == 1 && is_last_day_of_month(end) && end > start {
        last_month_short = false;
    }
    calendar - i32::from(last_month_short)
}

impl Granularity {
    /// Pick the bucket size for a range.
    pub fn for_range(range: &DateRange) -> Self {
        match whole_months_between(range.start, range.end) {
            m if m <= 1 => Granularity::Daily,
            m if m <= 6 => Granularity::Weekly,
            _ => Granularity::Monthly,
        }
    }

    /// Start dates of every bucket touched by `range`, ascending.
    pub fn bucket_starts(&self, range: &DateRange) -> Vec<NaiveDate> {
        if !range.is_valid() {
            return Vec::new();
        }
        let (first, last) = match self {
            Granularity::Daily => (range.start, range.end),
            Granularity::Weekly => (start_of_week(range.start), start_of_week(range.end)),
            Granularity::Monthly => (start_of_month(range.start), start_of_month(range.end)),
        };

        let mut starts = Vec::new();
        let mut current = Some(first);
        while let Some(date) = current.filter(|d| *d <= last) {
            starts.push(date);
            current = self.next(date);
        }
        starts
    }

    /// Last day covered by the bucket starting at `start`.
    pub fn bucket_end(&self, start: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => start,
            Granularity::Weekly => end_of_week(start),
            Granularity::Monthly => end_of_month(start),
        }
    }

    /// Axis label for the bucket starting at `start`.
    pub fn label(&self, start: NaiveDate) -> String {
        match self {
            Granularity::Daily => start.format(DAY_LABEL).to_string(),
            Granularity::Weekly => format!(
                "{} - {}",
                start.format(DAY_LABEL),
                self.bucket_end(start).format(DAY_LABEL)
            ),
            Granularity::Monthly => start.format(MONTH_LABEL).to_string(),
        }
    }

    fn next(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Daily => date.succ_opt(),
            Granularity::Weekly => date.checked_add_days(Days::new(7)),
            Granularity::Monthly => date.checked_add_months(Months::new(1)),
        }
    }
}

// ---------------------------------------------------------------------------
// Sample parsing
// ---------------------------------------------------------------------------

/// Calendar date of an `order_at` value.
///
/// Accepts `yyyy-mm-dd`, ISO date-times with or without offset, and the
/// RFC 2822 form some backends emit for datetimes. The date is taken as
/// written, without converting between time zones. Returns `None` for
/// anything else.
pub fn parse_sample_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

impl DailySales {
    /// Convert to a [`Sample`], or `None` if `order_at` does not parse.
    pub fn to_sample(&self) -> Option<Sample> {
        match parse_sample_date(&self.order_at) {
            Some(date) => Some(Sample::new(date, self.total_revenue, self.total_profit)),
            None => {
                tracing::debug!(order_at = %self.order_at, "dropping sample with unparsable date");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// SampleIndex
// ---------------------------------------------------------------------------

/// Samples keyed by calendar date. Inserting a date twice keeps the later
/// sample.
#[derive(Debug, Clone, Default)]
pub struct SampleIndex {
    by_date: HashMap<NaiveDate, Sample>,
}

impl SampleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sample: Sample) {
        self.by_date.insert(sample.date, sample);
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Sample> {
        self.by_date.get(&date)
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    /// Revenue and profit summed over every day in `[start, end]`.
    pub fn sum(&self, start: NaiveDate, end: NaiveDate) -> (f64, f64) {
        let mut revenue = 0.0;
        let mut profit = 0.0;
        for day in start.iter_days().take_while(|d| *d <= end) {
            if let Some(s) = self.by_date.get(&day) {
                revenue += s.revenue;
                profit += s.profit;
            }
        }
        (revenue, profit)
    }
}

impl FromIterator<Sample> for SampleIndex {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        let mut index = SampleIndex::new();
        for sample in iter {
            index.insert(sample);
        }
        index
    }
}

impl<'a> FromIterator<&'a DailySales> for SampleIndex {
    fn from_iter<I: IntoIterator<Item = &'a DailySales>>(iter: I) -> Self {
        iter.into_iter().filter_map(DailySales::to_sample).collect()
    }
}

// ---------------------------------------------------------------------------
// Bucketing
// ---------------------------------------------------------------------------

/// Dense series for `range` using the granularity picked from its span.
///
/// Empty for an inverted range.
pub fn bucket_series(range: &DateRange, samples: &[Sample]) -> Vec<Bucket> {
    let index: SampleIndex = samples.iter().copied().collect();
    bucket_index(range, &index, Granularity::for_range(range))
}

/// Dense series for `range` at an explicit granularity.
pub fn bucket_index(range: &DateRange, index: &SampleIndex, granularity: Granularity) -> Vec<Bucket> {
    granularity
        .bucket_starts(range)
        .into_iter()
        .map(|start| {
            let (revenue, profit) = index.sum(start, granularity.bucket_end(start));
            Bucket {
                date: start,
                revenue,
                profit,
                label: granularity.label(start),
            }
        })
        .collect()
}

/// Chart points for the dashboard.
///
/// Nothing is drawn until both a range and a sales list are available:
/// a missing range or missing list yields an empty series. A present but
/// empty list yields an all-zero series.
pub fn chart_data(range: Option<&DateRange>, sales: Option<&[DailySales]>) -> Vec<Bucket> {
    let (Some(range), Some(sales)) = (range, sales) else {
        return Vec::new();
    };
    let index: SampleIndex = sales.iter().collect();
    bucket_index(range, &index, Granularity::for_range(range))
}
