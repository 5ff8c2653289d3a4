use core::time::Duration;

/// Time from `now_millis` until the next wall-clock boundary that is a multiple of
/// `interval_secs`. A `now` exactly on a boundary waits a full interval.
#[must_use]
pub fn delay_until_next_boundary(now_millis: i64, interval_secs: u64) -> Duration {
    let interval_millis = i64::try_from(interval_secs.max(1).saturating_mul(1000)).unwrap_or(i64::MAX);
    let remaining = interval_millis - now_millis.rem_euclid(interval_millis);
    Duration::from_millis(remaining.unsigned_abs())
}
