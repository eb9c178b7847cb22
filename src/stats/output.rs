use super::week_count;
use crate::model::{DayBuckets, StatsOutput, SCHEMA_VERSION};
use crate::util::day_key;
use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

pub fn build_output<Tz>(
    buckets: &DayBuckets,
    email: &str,
    now: &DateTime<Tz>,
    since: &DateTime<Tz>,
    repositories: usize,
) -> StatsOutput
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        email: email.to_string(),
        since: day_key(since),
        until: day_key(now),
        weeks: week_count(now, since) as u32,
        repositories,
        days: buckets.day_counts(),
    }
}

pub fn output_json<Tz>(
    buckets: &DayBuckets,
    email: &str,
    now: &DateTime<Tz>,
    since: &DateTime<Tz>,
    repositories: usize,
) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let output = build_output(buckets, email, now, since, repositories);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
