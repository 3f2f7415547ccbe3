use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use core::time::Duration;

const LOG_TARGET: &str = " staleness";

/// Whether a host last synced before the start of the current UTC day minus `threshold`.
///
/// A missing or unparseable timestamp means the host is treated as registered.
pub fn is_sync_stale(sync_timestamp: Option<&str>, threshold: Duration, now: DateTime<Utc>) -> bool {
    let Some(raw) = sync_timestamp.map(str::trim).filter(|s| !s.is_empty()) else {
        return false;
    };

    let synced = match DateTime::parse_from_rfc3339(raw) {
        Ok(synced) => synced.with_timezone(&Utc),
        Err(e) => {
            log::debug!(target: LOG_TARGET, "Ignoring unparseable sync timestamp '{raw}': {e}");
            return false;
        }
    };

    let start_of_day = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let Some(cutoff) = TimeDelta::from_std(threshold).ok().and_then(|delta| start_of_day.checked_sub_signed(delta)) else {
        return false;
    };

    synced < cutoff
}
