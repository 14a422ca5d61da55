use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};

/// Calendar day an instant falls on in the configured reference offset.
pub fn local_date(at: DateTime<Utc>, offset_minutes: i32) -> NaiveDate {
    at.with_timezone(&reference_offset(offset_minutes)).date_naive()
}

/// Wall-clock time of an instant in the configured reference offset.
pub fn local_time(at: DateTime<Utc>, offset_minutes: i32) -> NaiveTime {
    at.with_timezone(&reference_offset(offset_minutes)).time()
}

/// "7h 25m" style duration used by the daily summary.
pub fn format_hours_minutes(hours: f64) -> String {
    let total_minutes = (hours.max(0.0) * 60.0).floor() as i64;
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}

fn reference_offset(offset_minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(offset_minutes * 60).unwrap_or_else(|| {
        tracing::warn!(offset_minutes, "out-of-range timezone offset, using UTC");
        FixedOffset::east_opt(0).expect("zero offset is valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn local_date_follows_offset_across_midnight() {
        // 23:30 UTC on Jan 1 is already Jan 2 at +05:30.
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 23, 30, 0).unwrap();
        assert_eq!(
            local_date(at, 330),
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
        );
        assert_eq!(
            local_date(at, 0),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
    }

    #[test]
    fn local_time_shifts_by_offset() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 7, 0, 0).unwrap();
        assert_eq!(
            local_time(at, 330),
            NaiveTime::from_hms_opt(12, 30, 0).unwrap()
        );
    }

    #[test]
    fn negative_offsets_work() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 2, 0, 0).unwrap();
        assert_eq!(
            local_date(at, -300),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
    }

    #[test]
    fn format_hours_minutes_rounds_down() {
        assert_eq!(format_hours_minutes(4.5), "4h 30m");
        assert_eq!(format_hours_minutes(0.0), "0h 0m");
        assert_eq!(format_hours_minutes(7.999), "7h 59m");
    }

    #[test]
    fn format_hours_minutes_clamps_negative() {
        assert_eq!(format_hours_minutes(-2.0), "0h 0m");
    }
}
