//! Text formatting for chart axes, tooltips and totals.

use chrono::NaiveDate;

use crate::aggregate::parse_sample_date;

/// Currency suffix used for all amounts.
pub const CURRENCY: &str = "VND";

/// Y-axis tick in millions with one decimal, e.g. `12.5M`.
pub fn format_millions(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    format!("{:.1}M", value / 1_000_000.0)
}

/// Thousands-grouped amount with at most three fraction digits,
/// e.g. `1,234,567.5`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Amount with the currency suffix, e.g. `1,500,000 VND`.
pub fn format_currency(value: f64) -> String {
    format!("{} {}", format_amount(value), CURRENCY)
}

/// Tooltip heading for a chart point, `dd/mm/yyyy`.
pub fn format_full_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Like [`format_full_date`] for a raw ISO string; empty when unparsable.
pub fn format_full_date_str(raw: &str) -> String {
    parse_sample_date(raw)
        .map(format_full_date)
        .unwrap_or_default()
}
