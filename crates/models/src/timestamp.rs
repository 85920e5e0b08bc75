//! Millisecond timestamps.
//!
//! Both the database and the snapshot format store instants as milliseconds
//! since the Unix epoch. Sub-millisecond precision is dropped on the way in so
//! that values compare equal after a round trip.

use time::UtcDateTime;

const NANOS_PER_MILLI: i128 = 1_000_000;

/// Milliseconds since the Unix epoch, saturating at the `i64` bounds.
pub fn to_millis(at: UtcDateTime) -> i64 {
    let millis = at.unix_timestamp_nanos() / NANOS_PER_MILLI;
    i64::try_from(millis).unwrap_or(if millis < 0 { i64::MIN } else { i64::MAX })
}

/// Parse milliseconds since the Unix epoch; `None` if out of range.
pub fn from_millis(millis: i64) -> Option<UtcDateTime> {
    UtcDateTime::from_unix_timestamp_nanos(i128::from(millis) * NANOS_PER_MILLI).ok()
}

/// The current instant, truncated to millisecond precision.
pub fn now() -> UtcDateTime {
    let now = UtcDateTime::now();
    from_millis(to_millis(now)).unwrap_or(now)
}
