use chrono::{DateTime, Utc};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Number of billable tier-periods for a requested date range: the
/// absolute span in days rounded up, never less than one. Inverted
/// ranges bill on the absolute span; a same-instant range bills one
/// period.
pub fn billable_periods(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let span_ms = (end - start).num_milliseconds().abs();
    let periods = (span_ms + DAY_MS - 1) / DAY_MS;
    periods.max(1)
}
