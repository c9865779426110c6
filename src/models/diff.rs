//! Diff DTOs.
//!
//! - `DiffResult`: the two endpoints of a comparison plus its changes
//! - `Change`: one classified entry; renames carry both paths, every other
//!   kind carries exactly one

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffResult {
    /// Endpoint of the comparison
    pub to_commit: String,
    /// Baseline the endpoint is compared against
    pub from_commit: String,
    pub changes: Vec<Change>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Change {
    Added { path: String },
    Deleted { path: String },
    Modified { path: String },
    Renamed { from: String, to: String },
    Copied { path: String },
    TypeChanged { path: String },
}

impl Change {
    /// Single path for every kind except renames.
    pub fn path(&self) -> Option<&str> {
        match self {
            Change::Added { path }
            | Change::Deleted { path }
            | Change::Modified { path }
            | Change::Copied { path }
            | Change::TypeChanged { path } => Some(path),
            Change::Renamed { .. } => None,
        }
    }
}
