use crate::models::attendance::AttendanceStatus;
use chrono::{DateTime, Utc};

pub const FULL_DAY_THRESHOLD_HOURS: f64 = 6.0;
pub const HALF_DAY_THRESHOLD_HOURS: f64 = 3.0;

/// Elapsed working time between a day's IN and OUT.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkDuration {
    pub hours: f64,
    /// Set when the raw difference was negative (clock skew between the
    /// stored IN and the OUT instant) and the value was clamped to zero.
    pub clamped: bool,
}

pub fn elapsed(in_time: DateTime<Utc>, out_time: DateTime<Utc>) -> WorkDuration {
    let seconds = (out_time - in_time).num_milliseconds() as f64 / 1000.0;
    if seconds < 0.0 {
        return WorkDuration {
            hours: 0.0,
            clamped: true,
        };
    }
    WorkDuration {
        hours: seconds / 3600.0,
        clamped: false,
    }
}

/// Threshold tiers: more than 6 hours is a full day, more than 3 a half day,
/// anything else just counts as present. Bypassed early checkouts never reach
/// this; the gate forces them to Absent.
pub fn classify(hours: f64) -> AttendanceStatus {
    if hours > FULL_DAY_THRESHOLD_HOURS {
        AttendanceStatus::FullDay
    } else if hours > HALF_DAY_THRESHOLD_HOURS {
        AttendanceStatus::HalfDay
    } else {
        AttendanceStatus::Present
    }
}
