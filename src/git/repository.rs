use chrono::{DateTime, FixedOffset, Offset, Utc};
use git2::{Commit, DiffOptions, Repository};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::{CommitRecord, CommitStats, CommitSummary};

/// A repository opened for the duration of one operation.
///
/// Holds no state beyond the libgit2 handle, so every request opens its own
/// and nothing is shared between callers.
pub struct BareRepo {
    repo: Repository,
    name: String,
    path: PathBuf,
}

impl BareRepo {
    pub fn open<P: AsRef<Path>>(name: &str, path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let repo = Repository::open(&path)
            .map_err(|_| AppError::RepoNotFound(name.to_string()))?;

        Ok(Self {
            repo,
            name: name.to_string(),
            path,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Resolve any revision (`HEAD`, branch, tag, full or short hash) to a commit.
    pub fn resolve_commit(&self, rev: &str) -> Result<Commit<'_>> {
        self.repo
            .revparse_single(rev)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|_| AppError::ObjectNotFound(rev.to_string()))
    }
}

pub fn commit_to_record(repo: &Repository, commit: &Commit) -> Result<CommitRecord> {
    let time = commit.time();
    Ok(CommitRecord {
        hash: commit.id().to_string(),
        message: commit.message().unwrap_or("").to_string(),
        author: commit.author().name().unwrap_or("Unknown").to_string(),
        committer: commit.committer().name().unwrap_or("Unknown").to_string(),
        timestamp: time.seconds(),
        date: format_commit_date(time),
        stats: commit_stats(repo, commit)?,
    })
}

pub fn commit_to_summary(commit: &Commit) -> CommitSummary {
    CommitSummary {
        hash: commit.id().to_string(),
        message: commit.message().unwrap_or("").to_string(),
        author: commit.author().name().unwrap_or("Unknown").to_string(),
        date: format_commit_date(commit.time()),
    }
}

/// Line and file totals against the first parent (empty tree for a root commit).
pub fn commit_stats(repo: &Repository, commit: &Commit) -> Result<CommitStats> {
    let tree = commit.tree()?;
    let parent_tree = if commit.parent_count() > 0 {
        Some(commit.parent(0)?.tree()?)
    } else {
        None
    };

    let mut opts = DiffOptions::new();
    opts.context_lines(0);

    let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;
    let stats = diff.stats()?;

    Ok(CommitStats {
        files: stats.files_changed(),
        insertions: stats.insertions(),
        deletions: stats.deletions(),
        lines: stats.insertions() + stats.deletions(),
    })
}

/// Calendar date of a commit time, rendered in the offset it was recorded with.
pub fn format_commit_date(time: git2::Time) -> String {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)
        .unwrap_or_else(|| Utc.fix());

    DateTime::from_timestamp(time.seconds(), 0)
        .map(|utc| utc.with_timezone(&offset).format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_commit_date_uses_commit_offset() {
        // 2024-03-01T23:30:00Z
        let ts = 1_709_335_800;
        assert_eq!(format_commit_date(git2::Time::new(ts, 0)), "2024-03-01");
        assert_eq!(format_commit_date(git2::Time::new(ts, 60)), "2024-03-02");
        assert_eq!(format_commit_date(git2::Time::new(ts, -300)), "2024-03-01");
    }

    #[test]
    fn test_open_missing_repository() {
        let result = BareRepo::open("nope", "/definitely/not/a/real/repo.git");
        assert!(matches!(result, Err(AppError::RepoNotFound(name)) if name == "nope"));
    }
}
