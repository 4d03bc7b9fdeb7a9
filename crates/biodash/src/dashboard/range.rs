use chrono::{Duration, NaiveDate};

use biodash_core::biorhythm::DateRange;
use biodash_core::clock::Clock;

/// Days shown on the person dashboard when no start date is given.
pub const DEFAULT_RANGE_DAYS: u32 = 365;

/// Resolves the person dashboard window.
///
/// `end` defaults to today and `start` to `default_days` before today. A start
/// that ends up after the end is replaced by `end - default_days`.
pub fn resolve_range(
    clock: &dyn Clock,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    default_days: u32,
) -> DateRange {
    let today = clock.today();
    let window = Duration::days(i64::from(default_days));

    let end = end.unwrap_or(today);
    let start = start.unwrap_or(today - window);

    DateRange::new(start, end).unwrap_or_else(|_| {
        tracing::debug!(%start, %end, "Start after end, falling back to default window");
        DateRange::trailing_days(end, default_days)
    })
}
