// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format an activity start timestamp as a short date (`M/D/YYYY`).
///
/// The calendar date is taken in the timestamp's own offset. Input that
/// is not ISO 8601 is returned unchanged.
pub fn format_start_date(start_date: &str) -> String {
    parse_date(start_date)
        .map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| start_date.to_string())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
