use crate::error::{ContribError, Result};
use crate::model::CommitRecord;
use chrono::{DateTime, Utc};
use gix::{ObjectId, Repository};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted at `path`. Parent directories are not searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let repo = gix::open(&path)?;
        Ok(Self { repo, path })
    }

    /// Commits reachable from HEAD whose commit time is at or after `since`.
    /// An unborn HEAD yields an empty log.
    pub fn log_since(&self, since: DateTime<Utc>) -> Result<CommitLog<'_>> {
        let mut head = self.repo.head()?;
        let mut stack = VecDeque::new();
        if head.is_unborn() {
            log::debug!("{} has no commits yet", self.path.display());
        } else {
            let head_commit = head.peel_to_commit_in_place()?;
            stack.push_back(head_commit.id);
        }

        Ok(CommitLog {
            repo: &self.repo,
            since: since.timestamp(),
            seen: HashSet::new(),
            stack,
        })
    }
}

/// Forward-only walk over the history of one repository.
///
/// Each commit is visited once. Dropping the log releases it; reading again requires a new
/// call to [`GitRepo::log_since`].
pub struct CommitLog<'repo> {
    repo: &'repo Repository,
    since: i64,
    seen: HashSet<ObjectId>,
    stack: VecDeque<ObjectId>,
}

impl CommitLog<'_> {
    fn read(&mut self, commit_id: ObjectId) -> Result<Option<CommitRecord>> {
        let repo = self.repo;
        let commit = repo.find_commit(commit_id)?;
        for parent in commit.parent_ids() {
            self.stack.push_back(parent.detach());
        }

        let commit_secs = commit.time()?.seconds;
        if commit_secs < self.since {
            return Ok(None);
        }

        let author = commit.author()?;
        let author_secs = author
            .time()
            .map_err(|e| ContribError::Parse(format!("Invalid author time in {commit_id}: {e}")))?
            .seconds;

        Ok(Some(CommitRecord {
            id: commit_id.to_string(),
            author_email: author.email.to_string(),
            author_time: to_utc(author_secs)?,
        }))
    }
}

impl Iterator for CommitLog<'_> {
    type Item = Result<CommitRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(commit_id) = self.stack.pop_back() {
            if !self.seen.insert(commit_id) {
                continue;
            }
            match self.read(commit_id) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => {
                    self.stack.clear();
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

fn to_utc(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| ContribError::InvalidDate(format!("Invalid timestamp: {secs}")))
}
