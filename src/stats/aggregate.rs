use crate::error::{ContribError, Result};
use crate::git::GitRepo;
use crate::model::{CommitRecord, DayBuckets};
use crate::util::{day_key, snap_to_sunday_midnight};
use chrono::{DateTime, TimeZone, Utc};
use indicatif::ProgressBar;
use std::fmt::Display;

/// A one-year window snapped back to Sunday spans at most 53 whole weeks.
const WINDOW_DAYS: usize = 53 * 7;

/// Reads every repository in `repos` and buckets the commits authored by `email` per day.
///
/// `since` is snapped to Sunday midnight first so every repository is queried with the
/// same lower bound. The first repository that cannot be read aborts the whole run.
pub fn collect_day_buckets<Tz>(
    repos: &[String],
    email: &str,
    since: &DateTime<Tz>,
    progress: Option<&ProgressBar>,
) -> Result<DayBuckets>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let since = snap_to_sunday_midnight(since);
    let since_utc = since.with_timezone(&Utc);
    let tz = since.timezone();
    let mut buckets = DayBuckets::with_capacity(WINDOW_DAYS);

    for path in repos {
        if let Some(pb) = progress {
            pb.set_message(path.clone());
        }
        log::debug!("Reading commits of {path} since {since_utc}");

        let matched = read_repo(path, since_utc, email, &tz, &mut buckets).map_err(|e| {
            ContribError::Repository {
                path: path.clone(),
                source: Box::new(e),
            }
        })?;
        log::debug!("{matched} matching commits in {path}");

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    Ok(buckets)
}

fn read_repo<Tz>(path: &str, since: DateTime<Utc>, email: &str, tz: &Tz, buckets: &mut DayBuckets) -> Result<usize>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let repo = GitRepo::open(path)?;
    let commits = repo.log_since(since)?;
    bucket_commits(commits, email, tz, buckets)
}

/// Adds the records authored by exactly `email` to `buckets`, keyed by their author date in
/// `tz`. Returns how many records matched.
pub fn bucket_commits<I, Tz>(records: I, email: &str, tz: &Tz, buckets: &mut DayBuckets) -> Result<usize>
where
    I: IntoIterator<Item = Result<CommitRecord>>,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut matched = 0;
    for record in records {
        let record = record?;
        if record.author_email != email {
            continue;
        }
        let day = day_key(&record.author_time.with_timezone(tz));
        buckets.push(day, record);
        matched += 1;
    }
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;

    fn record(id: &str, email: &str, time: DateTime<Utc>) -> Result<CommitRecord> {
        Ok(CommitRecord {
            id: id.to_string(),
            author_email: email.to_string(),
            author_time: time,
        })
    }

    #[test]
    fn keeps_only_exact_author_email() {
        let day = Utc.with_ymd_and_hms(2024, 5, 7, 10, 0, 0).unwrap();
        let records = vec![
            record("1", "a@x.com", day),
            record("2", "a@x.com", day),
            record("3", "a@x.com", day),
            record("4", "b@y.com", day),
            record("5", "A@x.com", day),
        ];
        let mut buckets = DayBuckets::new();
        let matched = bucket_commits(records, "a@x.com", &Utc, &mut buckets).unwrap();

        assert_eq!(matched, 3);
        assert_eq!(buckets.count("2024-05-07"), 3);
        assert!(buckets
            .get("2024-05-07")
            .unwrap()
            .iter()
            .all(|c| c.author_email == "a@x.com"));
    }

    #[test]
    fn buckets_by_local_date() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        // 02:00 UTC on the 8th is still the 7th at UTC-5
        let late = Utc.with_ymd_and_hms(2024, 5, 8, 2, 0, 0).unwrap();
        let mut buckets = DayBuckets::new();
        bucket_commits(vec![record("1", "a@x.com", late)], "a@x.com", &tz, &mut buckets).unwrap();

        assert_eq!(buckets.count("2024-05-07"), 1);
        assert_eq!(buckets.count("2024-05-08"), 0);
    }

    #[test]
    fn repeated_runs_accumulate_into_same_day() {
        let day = Utc.with_ymd_and_hms(2024, 5, 7, 10, 0, 0).unwrap();
        let mut buckets = DayBuckets::new();
        bucket_commits(vec![record("1", "a@x.com", day)], "a@x.com", &Utc, &mut buckets).unwrap();
        bucket_commits(vec![record("1", "a@x.com", day)], "a@x.com", &Utc, &mut buckets).unwrap();

        assert_eq!(buckets.count("2024-05-07"), 2);
        assert_eq!(buckets.total_commits(), 2);
    }

    #[test]
    fn record_error_aborts() {
        let day = Utc.with_ymd_and_hms(2024, 5, 7, 10, 0, 0).unwrap();
        let records = vec![
            record("1", "a@x.com", day),
            Err(ContribError::Other("broken object".to_string())),
        ];
        let mut buckets = DayBuckets::new();
        assert!(bucket_commits(records, "a@x.com", &Utc, &mut buckets).is_err());
    }

    #[test]
    fn invalid_repository_aborts_collection() {
        let dir = tempfile::tempdir().unwrap();
        let repos = vec![dir.path().to_string_lossy().into_owned()];
        let since = Utc.with_ymd_and_hms(2024, 5, 7, 10, 0, 0).unwrap();
        let err = collect_day_buckets(&repos, "a@x.com", &since, None).unwrap_err();

        match &err {
            ContribError::Repository { path, source } => {
                assert_eq!(path, &repos[0]);
                assert!(matches!(**source, ContribError::Git(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains(&repos[0]));
        assert!(std::error::Error::source(&err).is_some());
    }
}
