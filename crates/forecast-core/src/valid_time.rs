//! Resolves the effective "valid datetime" for a decoded grid, with an
//! explicit, logged fallback when the embedded reference/forecast-hour
//! metadata looks unusable.

use chrono::{DateTime, Utc};

use crate::grib::GridMessage;

/// If `grid.valid_time` falls more than a day outside the window a caller
/// would plausibly expect (`now + offset_hours`, with a day of slack for
/// clock skew and model staleness), something went wrong parsing the
/// message's date/time fields upstream; fall back to `now + offset_hours`
/// rather than propagate a bogus timestamp into a sorted timeseries.
///
/// Matches the reference implementation's `datetime.utcnow()` fallback,
/// translated to `chrono::Utc::now()` and made observable via a `warn` log
/// instead of silently returning a wall-clock guess.
pub fn resolve(grid: &GridMessage, now: DateTime<Utc>, offset_hours: i32) -> DateTime<Utc> {
    let expected = now + chrono::Duration::hours(offset_hours as i64);
    let slack = chrono::Duration::days(1);
    if grid.valid_time < expected - slack || grid.valid_time > expected + slack {
        tracing::warn!(
            parsed = %grid.valid_time,
            expected = %expected,
            "grid valid_time outside plausible window, falling back to now + offset"
        );
        return expected;
    }
    grid.valid_time
}
