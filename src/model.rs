use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SCHEMA_VERSION: u32 = 1;

/// A single commit as read from a repository log.
#[derive(Debug, Clone)]
pub struct CommitRecord {
    pub id: String,
    pub author_email: String,
    pub author_time: DateTime<Utc>,
}

/// Commits of one author grouped by local calendar day (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default)]
pub struct DayBuckets {
    days: HashMap<String, Vec<CommitRecord>>,
}

impl DayBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(days: usize) -> Self {
        Self {
            days: HashMap::with_capacity(days),
        }
    }

    pub fn push(&mut self, day: String, commit: CommitRecord) {
        self.days.entry(day).or_default().push(commit);
    }

    /// Number of commits recorded for `day`, zero if the day has no bucket.
    pub fn count(&self, day: &str) -> usize {
        self.days.get(day).map_or(0, Vec::len)
    }

    pub fn get(&self, day: &str) -> Option<&[CommitRecord]> {
        self.days.get(day).map(Vec::as_slice)
    }

    pub fn total_commits(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Per-day counts sorted by date.
    pub fn day_counts(&self) -> Vec<DayCount> {
        let mut counts: Vec<DayCount> = self
            .days
            .iter()
            .map(|(date, commits)| DayCount {
                date: date.clone(),
                count: commits.len() as u32,
            })
            .collect();
        counts.sort_by(|a, b| a.date.cmp(&b.date));
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub date: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub email: String,
    pub since: String,
    pub until: String,
    pub weeks: u32,
    pub repositories: usize,
    pub days: Vec<DayCount>,
}
