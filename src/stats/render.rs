use crate::error::{ContribError, Result};
use crate::model::DayBuckets;
use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Weekday};
use console::Style;
use std::io::Write;

pub const DAY_BLOCK: &str = "■";

const DAYS_PER_WEEK: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeatLevel {
    None,
    Low,
    Medium,
    High,
    Max,
}

impl HeatLevel {
    pub fn from_count(count: usize) -> Self {
        match count {
            c if c >= 20 => HeatLevel::Max,
            c if c >= 10 => HeatLevel::High,
            c if c >= 5 => HeatLevel::Medium,
            c if c >= 1 => HeatLevel::Low,
            _ => HeatLevel::None,
        }
    }

    /// 256-color palette shade, from background grey to bright green.
    fn color(self) -> u8 {
        match self {
            HeatLevel::None => 235,
            HeatLevel::Low => 22,
            HeatLevel::Medium => 28,
            HeatLevel::High => 35,
            HeatLevel::Max => 77,
        }
    }

    fn style(self) -> Style {
        Style::new().color256(self.color())
    }
}

/// Whole weeks elapsed between `since` and `now`. A partial trailing week is not counted.
pub fn week_count<Tz: TimeZone>(now: &DateTime<Tz>, since: &DateTime<Tz>) -> u64 {
    let hours = now.clone().signed_duration_since(since.clone()).num_hours();
    if hours <= 0 {
        return 0;
    }
    hours as u64 / (24 * DAYS_PER_WEEK)
}

/// Day key of the cell at `row` (weekday) and `col` (week offset) of a grid starting on `start`.
pub fn cell_key(start: NaiveDate, row: u64, col: u64) -> String {
    (start + Days::new(col * DAYS_PER_WEEK + row))
        .format("%Y-%m-%d")
        .to_string()
}

/// Writes a 7-row heatmap, one row per weekday starting on Sunday and one column per
/// week since `since`.
///
/// `since` must fall on a Sunday. Output is written cell by cell, so a failing writer may
/// leave a partial grid behind.
pub fn render_heatmap<Tz, W>(buckets: &DayBuckets, now: &DateTime<Tz>, since: &DateTime<Tz>, out: &mut W) -> Result<()>
where
    Tz: TimeZone,
    W: Write,
{
    if since.weekday() != Weekday::Sun {
        return Err(ContribError::Validation(format!(
            "since should be a Sunday, but got {}",
            since.weekday()
        )));
    }

    let weeks = week_count(now, since);
    let start = since.date_naive();

    for row in 0..DAYS_PER_WEEK {
        for col in 0..weeks {
            let key = cell_key(start, row, col);
            let level = HeatLevel::from_count(buckets.count(&key));
            write!(out, "{} ", level.style().apply_to(DAY_BLOCK))?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}
