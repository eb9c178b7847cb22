use chrono::{DateTime, Datelike, Duration, Months, NaiveDateTime, Offset, TimeZone};

/// Formats the calendar date of `timestamp` in its own timezone as `YYYY-MM-DD`.
pub fn day_key<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.format("%Y-%m-%d").to_string()
}

/// Moves `t` back to the Sunday of its week and truncates to midnight in `t`'s timezone.
pub fn snap_to_sunday_midnight<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    let days_back = t.weekday().num_days_from_sunday() as i64;
    let sunday = t.date_naive() - Duration::days(days_back);
    let midnight = sunday.and_time(chrono::NaiveTime::MIN);
    local_to_instant(&t.timezone(), midnight, t.offset().fix().local_minus_utc())
}

/// Same wall-clock time one year earlier, clamped to the end of the month when needed.
pub fn one_year_before<Tz: TimeZone>(t: &DateTime<Tz>) -> DateTime<Tz> {
    t.clone()
        .checked_sub_months(Months::new(12))
        .unwrap_or_else(|| t.clone() - Duration::days(365))
}

fn local_to_instant<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime, fallback_offset: i32) -> DateTime<Tz> {
    match tz.from_local_datetime(&local).earliest() {
        Some(dt) => dt,
        // midnight skipped by a DST transition
        None => tz.from_utc_datetime(&(local - Duration::seconds(fallback_offset as i64))),
    }
}
