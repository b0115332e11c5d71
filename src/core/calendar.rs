use crate::error::{ChartError, Result};
use crate::models::{Interval, WeekStart};
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};

/// Floors `instant` to the first instant of the interval that contains it.
///
/// Weekly buckets start at midnight on the most recent `week_start` day
/// (at or before the instant's date). `week_start` is ignored for the
/// other intervals. Fails with `OutOfRange` when that weekly floor would
/// precede chrono's earliest representable date.
pub fn interval_start(
    instant: DateTime<Utc>,
    interval: Interval,
    week_start: WeekStart,
) -> Result<DateTime<Utc>> {
    let date = instant.date_naive();

    let start = match interval {
        Interval::Year => first_of_month(date.year(), 1),
        Interval::Quarter => {
            let quarter_month = date.month0() / 3 * 3 + 1;
            first_of_month(date.year(), quarter_month)
        }
        Interval::Month => first_of_month(date.year(), date.month()),
        Interval::Week => {
            let today = date.weekday().num_days_from_sunday();
            let back = (today + 7 - week_start.days_from_sunday()) % 7;
            date.checked_sub_days(Days::new(back as u64))
                .ok_or(ChartError::OutOfRange(instant))?
        }
    };

    Ok(midnight(start))
}

/// Start of the interval following `instant`, which should already be aligned.
///
/// Month arithmetic clamps the day to the end of shorter months
/// (Jan 31 + 1 month = Feb 28/29). Returns `None` past chrono's representable range.
pub fn advance(instant: DateTime<Utc>, interval: Interval) -> Option<DateTime<Utc>> {
    match interval {
        Interval::Week => instant.checked_add_days(Days::new(7)),
        Interval::Month => instant.checked_add_months(Months::new(1)),
        Interval::Quarter => instant.checked_add_months(Months::new(3)),
        Interval::Year => instant.checked_add_months(Months::new(12)),
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("day 1 exists in every month")
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
