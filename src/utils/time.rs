//! Time utilities for the fetch window
//!
//! Default windows are aligned to the minute so that scheduled runs tile
//! contiguous, non-overlapping ranges.

use chrono::{DateTime, TimeZone, Utc};

use crate::feed::TimeWindow;

/// Default window length in minutes
///
/// 48 divides the cron schedule evenly; 60 is rejected by the feed's range limit.
pub const DEFAULT_INTERVAL_MINUTES: i64 = 48;

/// Truncate a unix timestamp down to the start of its minute
///
/// # Examples
/// ```
/// use whale_flow_signals::utils::time::truncate_to_minute;
/// assert_eq!(truncate_to_minute(1_700_000_059), 1_700_000_040);
/// assert_eq!(truncate_to_minute(1_700_000_040), 1_700_000_040);
/// ```
pub fn truncate_to_minute(timestamp: i64) -> i64 {
    timestamp - timestamp.rem_euclid(60)
}

/// Resolve the fetch window from optional explicit bounds
///
/// - `start` defaults to `now` truncated to the minute, minus `interval_minutes`
/// - `end` defaults to `start + interval - 1s`, since the feed's end is inclusive
///
/// Returns `None` when a default bound does not fit in an `i64`.
pub fn resolve_window(
    now: i64,
    interval_minutes: i64,
    start: Option<i64>,
    end: Option<i64>,
) -> Option<TimeWindow> {
    let interval_seconds = interval_minutes.checked_mul(60)?;
    let start = match start {
        Some(start) => start,
        None => truncate_to_minute(now).checked_sub(interval_seconds)?,
    };
    let end = match end {
        Some(end) => end,
        None => start.checked_add(interval_seconds)?.checked_sub(1)?,
    };
    Some(TimeWindow::new(start, end))
}

/// Current unix time in seconds
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

/// Short human-readable label for log lines, e.g. `2024-01-01 00:00:00 UTC`
pub fn format_timestamp(timestamp: i64) -> String {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .map(|dt: DateTime<Utc>| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}
