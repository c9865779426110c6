//! Commit history DTOs.
//!
//! - `CommitRecord`: one commit with its change statistics
//! - `DateBucket`: a contiguous run of commits sharing a calendar date
//! - `CommitSummary`: lightweight view used by last-commit and lookup

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub committer: String,
    pub timestamp: i64,
    /// `YYYY-MM-DD` in the committer's own UTC offset
    pub date: String,
    pub stats: CommitStats,
}

/// Totals against the first parent, or the empty tree for a root commit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CommitStats {
    pub files: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub lines: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateBucket {
    pub date: String,
    pub commits: Vec<CommitRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitSummary {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub date: String,
}
