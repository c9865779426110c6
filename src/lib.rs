//! Bare Git repository browser.
//!
//! Reads metadata, tags, trees, file contents, date-grouped history and
//! commit diffs from bare repositories kept under one storage root, and
//! creates new bare repositories there.

pub mod error;
pub mod git;
pub mod models;
pub mod routes;

pub use error::{AppError, Result};
pub use git::{BareRepo, CreateOptions, RepoStore, SharedStore};
