use chrono::{Datelike, DateTime, Duration, NaiveDate, Utc};

use crate::database::models::{AttendanceRecord, DateRange, MonthlyReport};

/// First instant to last instant of a calendar month, UTC.
pub fn month_range(year: i32, month: u32) -> Option<DateRange> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };

    let from = first.and_hms_opt(0, 0, 0)?.and_utc();
    let to = next.and_hms_opt(0, 0, 0)?.and_utc() - Duration::microseconds(1);
    DateRange::new(from, to)
}

/// Start and end of the UTC day containing `now`.
pub fn day_range(now: DateTime<Utc>) -> Option<DateRange> {
    let from = now.date_naive().and_hms_opt(0, 0, 0)?.and_utc();
    DateRange::new(from, from + Duration::days(1) - Duration::microseconds(1))
}

pub fn current_month(now: DateTime<Utc>) -> (i32, u32) {
    (now.year(), now.month())
}

pub fn monthly_report(year: i32, month: u32, records: Vec<AttendanceRecord>) -> MonthlyReport {
    let total_work_minutes: i64 = records
        .iter()
        .filter_map(|r| r.work_minutes)
        .map(i64::from)
        .sum();
    let completed_days = records.iter().filter(|r| !r.is_open()).count() as i64;
    let average_work_minutes = if completed_days > 0 {
        (total_work_minutes as f64 / completed_days as f64).round() as i64
    } else {
        0
    };

    MonthlyReport {
        year,
        month,
        total_work_minutes,
        completed_days,
        average_work_minutes,
        records,
    }
}
