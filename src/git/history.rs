//! Commit history grouped by calendar date.
//!
//! Grouping keys off adjacency: a date that shows up again after a different
//! date starts a new bucket instead of joining the earlier one. Merge-heavy
//! histories can therefore report the same date more than once.

use git2::{ErrorCode, Sort};

use crate::error::{AppError, Result};
use crate::git::repository::{commit_to_record, commit_to_summary, BareRepo};
use crate::models::{CommitRecord, CommitSummary, DateBucket};

/// Scan state for grouping a commit sequence into contiguous date runs.
#[derive(Debug, Default)]
enum Grouping {
    #[default]
    Idle,
    Accumulating {
        date: String,
        commits: Vec<CommitRecord>,
    },
    Closed,
}

/// Incremental date grouper. Feed commits in history order, then `finish`.
#[derive(Debug, Default)]
pub struct DateGrouper {
    state: Grouping,
    buckets: Vec<DateBucket>,
}

impl DateGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: CommitRecord) {
        self.state = match std::mem::take(&mut self.state) {
            Grouping::Idle | Grouping::Closed => Grouping::Accumulating {
                date: record.date.clone(),
                commits: vec![record],
            },
            Grouping::Accumulating { date, mut commits } if date == record.date => {
                commits.push(record);
                Grouping::Accumulating { date, commits }
            }
            Grouping::Accumulating { date, commits } => {
                self.buckets.push(DateBucket { date, commits });
                Grouping::Accumulating {
                    date: record.date.clone(),
                    commits: vec![record],
                }
            }
        };
    }

    /// Flush the open run, if any, and return every bucket in input order.
    pub fn finish(mut self) -> Vec<DateBucket> {
        if let Grouping::Accumulating { date, commits } =
            std::mem::replace(&mut self.state, Grouping::Closed)
        {
            self.buckets.push(DateBucket { date, commits });
        }
        self.buckets
    }
}

pub fn group_by_date<I>(commits: I) -> Vec<DateBucket>
where
    I: IntoIterator<Item = CommitRecord>,
{
    let mut grouper = DateGrouper::new();
    for commit in commits {
        grouper.push(commit);
    }
    grouper.finish()
}

impl BareRepo {
    /// History reachable from `branch`, newest first, bucketed by date.
    ///
    /// Walks the full history on every call.
    pub fn commit_list(&self, branch: &str) -> Result<Vec<DateBucket>> {
        let Some(records) = self.history(branch)? else {
            return Ok(Vec::new());
        };
        Ok(group_by_date(records))
    }

    /// Number of commits reachable from `branch`. O(history length), never cached.
    pub fn count_commits(&self, branch: &str) -> Result<usize> {
        let Some(mut revwalk) = self.revwalk_from(branch)? else {
            return Ok(0);
        };

        revwalk.try_fold(0usize, |count, oid| {
            oid.map(|_| count + 1)
                .map_err(|e| AppError::HistoryUnavailable(e.message().to_string()))
        })
    }

    pub fn last_commit(&self, branch: &str) -> Result<CommitSummary> {
        let commit = self.resolve_commit(branch)?;
        Ok(commit_to_summary(&commit))
    }

    pub fn commit_info(&self, hash: &str) -> Result<CommitSummary> {
        let commit = self.resolve_commit(hash)?;
        Ok(commit_to_summary(&commit))
    }

    fn history(&self, branch: &str) -> Result<Option<Vec<CommitRecord>>> {
        let Some(revwalk) = self.revwalk_from(branch)? else {
            return Ok(None);
        };

        let mut records = Vec::new();
        for oid in revwalk {
            let oid = oid.map_err(|e| AppError::HistoryUnavailable(e.message().to_string()))?;
            let commit = self
                .repo()
                .find_commit(oid)
                .map_err(|e| AppError::HistoryUnavailable(e.message().to_string()))?;
            records.push(commit_to_record(self.repo(), &commit)?);
        }

        Ok(Some(records))
    }

    /// Time-sorted revision walk from `branch`; `None` when HEAD is unborn.
    fn revwalk_from(&self, branch: &str) -> Result<Option<git2::Revwalk<'_>>> {
        if branch == "HEAD" {
            if let Err(e) = self.repo().head() {
                if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound {
                    return Ok(None);
                }
                return Err(AppError::HistoryUnavailable(e.message().to_string()));
            }
        }

        let start = self.resolve_commit(branch)?.id();

        let mut revwalk = self
            .repo()
            .revwalk()
            .map_err(|e| AppError::HistoryUnavailable(e.message().to_string()))?;
        revwalk
            .set_sorting(Sort::TIME)
            .and_then(|_| revwalk.push(start))
            .map_err(|e| AppError::HistoryUnavailable(e.message().to_string()))?;

        Ok(Some(revwalk))
    }
}
