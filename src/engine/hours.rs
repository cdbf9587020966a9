use chrono::{Datelike, NaiveDate, NaiveTime};
use tracing::warn;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};

/// Total worked hours for the records falling inside `[start, end]`.
///
/// Only present days with both times recorded contribute. A day whose exit
/// precedes its entry (a misrecorded overnight shift) counts as zero, and a
/// day with an unparseable time is skipped with a warning rather than
/// failing the whole month.
pub fn aggregate_hours(records: &[AttendanceRecord], start: NaiveDate, end: NaiveDate) -> f64 {
    let mut total = 0.0;

    for record in records {
        if record.date < start || record.date > end {
            continue;
        }
        if record.status != AttendanceStatus::Present {
            continue;
        }
        if record.entry_time.is_empty() || record.exit_time.is_empty() {
            continue;
        }

        let Some(entry) = parse_clock(&record.entry_time) else {
            warn!(
                date = %record.date,
                personnel_id = record.personnel_id,
                value = %record.entry_time,
                "Skipping attendance record with malformed entry time"
            );
            continue;
        };
        let Some(exit) = parse_clock(&record.exit_time) else {
            warn!(
                date = %record.date,
                personnel_id = record.personnel_id,
                value = %record.exit_time,
                "Skipping attendance record with malformed exit time"
            );
            continue;
        };

        let worked = (exit - entry).num_seconds() as f64 / 3600.0;
        if worked > 0.0 {
            total += worked;
        }
    }

    total
}

/// Inclusive first and last day of a `"YYYY-MM"` month, or `None` when the
/// string is not a valid month.
pub fn month_range(month: &str) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }?;
    Some((first, next.pred_opt()?))
}

fn parse_clock(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(day: u32, status: AttendanceStatus, entry: &str, exit: &str) -> AttendanceRecord {
        AttendanceRecord {
            date: NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
            personnel_id: 7,
            status,
            entry_time: entry.to_string(),
            exit_time: exit.to_string(),
            is_late: false,
        }
    }

    fn august() -> (NaiveDate, NaiveDate) {
        month_range("2026-08").unwrap()
    }

    #[test]
    fn sums_present_days_with_both_times() {
        let records = vec![
            rec(1, AttendanceStatus::Present, "09:00", "17:00"),
            rec(2, AttendanceStatus::Present, "08:30", "17:00"),
        ];
        let (start, end) = august();
        assert_eq!(aggregate_hours(&records, start, end), 16.5);
    }

    #[test]
    fn absent_and_incomplete_days_contribute_nothing() {
        let records = vec![
            rec(1, AttendanceStatus::Absent, "", ""),
            rec(2, AttendanceStatus::Present, "09:00", ""),
            rec(3, AttendanceStatus::Present, "", "17:00"),
            rec(4, AttendanceStatus::Present, "09:00", "10:00"),
        ];
        let (start, end) = august();
        assert_eq!(aggregate_hours(&records, start, end), 1.0);
    }

    #[test]
    fn days_outside_the_range_are_ignored() {
        let records = vec![
            rec(1, AttendanceStatus::Present, "09:00", "17:00"),
            rec(20, AttendanceStatus::Present, "09:00", "17:00"),
        ];
        let start = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 8, 15).unwrap();
        assert_eq!(aggregate_hours(&records, start, end), 8.0);
    }

    #[test]
    fn exit_before_entry_counts_as_zero() {
        let records = vec![
            rec(1, AttendanceStatus::Present, "22:00", "06:00"),
            rec(2, AttendanceStatus::Present, "09:00", "17:00"),
        ];
        let (start, end) = august();
        assert_eq!(aggregate_hours(&records, start, end), 8.0);
    }

    #[test]
    fn malformed_times_are_skipped_not_fatal() {
        let records = vec![
            rec(1, AttendanceStatus::Present, "soon", "17:00"),
            rec(2, AttendanceStatus::Present, "09:00", "late"),
            rec(3, AttendanceStatus::Present, "09:00", "17:00"),
        ];
        let (start, end) = august();
        assert_eq!(aggregate_hours(&records, start, end), 8.0);
    }

    #[test]
    fn disjoint_ranges_add_up_to_the_union() {
        let records: Vec<AttendanceRecord> = (1..=20)
            .map(|day| rec(day, AttendanceStatus::Present, "09:00", "17:30"))
            .collect();

        let first_half = aggregate_hours(
            &records,
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
        );
        let second_half = aggregate_hours(
            &records,
            NaiveDate::from_ymd_opt(2026, 8, 11).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
        );
        let (start, end) = august();
        let union = aggregate_hours(&records, start, end);

        assert_eq!(first_half + second_half, union);
    }

    #[test]
    fn month_range_covers_the_whole_month() {
        let (start, end) = month_range("2026-08").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 8, 31).unwrap());
    }

    #[test]
    fn month_range_handles_december_rollover() {
        let (start, end) = month_range("2026-12").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn month_range_knows_leap_february() {
        let (_, end) = month_range("2024-02").unwrap();
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let (_, end) = month_range("2026-02").unwrap();
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    }

    #[test]
    fn month_range_rejects_garbage() {
        assert!(month_range("2026-13").is_none());
        assert!(month_range("2026-08-01").is_none());
        assert!(month_range("next month").is_none());
        assert!(month_range("").is_none());
    }
}
