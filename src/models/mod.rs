//! Data transfer objects (DTOs) for API responses.
//!
//! Every value here is an immutable snapshot produced per request.
//! - `tree`: TreeEntry, FileContent
//! - `commit`: CommitRecord, CommitStats, DateBucket, CommitSummary
//! - `diff`: DiffResult, Change
//! - `repository`: RepositoryInfo, Tag, CreateRepoRequest

pub mod commit;
pub mod diff;
pub mod repository;
pub mod tree;

pub use commit::*;
pub use diff::*;
pub use repository::*;
pub use tree::*;
