//! Canonical payment intervals, in seconds.
//!
//! These are the only values the prompts advertise. Parsed output may still
//! carry any non-negative integer; nothing here rejects it.

pub const ONE_TIME: u64 = 0;
pub const EVERY_MINUTE: u64 = 60;
pub const HOURLY: u64 = 3_600;
pub const DAILY: u64 = 86_400;
pub const WEEKLY: u64 = 604_800;
pub const MONTHLY: u64 = 2_592_000;

/// `(seconds, label)` pairs in ascending order.
pub const CANONICAL_INTERVALS: &[(u64, &str)] = &[
    (ONE_TIME, "one-time"),
    (EVERY_MINUTE, "every minute"),
    (HOURLY, "hourly"),
    (DAILY, "daily"),
    (WEEKLY, "weekly"),
    (MONTHLY, "monthly"),
];

/// Human label for a canonical interval, `None` for anything else.
pub fn interval_label(secs: u64) -> Option<&'static str> {
    CANONICAL_INTERVALS
        .iter()
        .find(|(s, _)| *s == secs)
        .map(|(_, label)| *label)
}

pub fn is_canonical_interval(secs: u64) -> bool {
    interval_label(secs).is_some()
}
