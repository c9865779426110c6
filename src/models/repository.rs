//! Repository-level DTOs.
//!
//! - `RepositoryInfo`: metadata of a bare repository (header display)
//! - `Tag`: tag name, target commit and annotation
//! - `CreateRepoRequest`: request body for creating a bare repository

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryInfo {
    pub name: String,
    pub description: String,
    pub branches: Vec<String>,
    pub active_branch: Option<String>,
    pub total_commits: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub commit: String,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteSpec {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRepoRequest {
    pub name: String,
    pub description: Option<String>,
    pub remote: Option<RemoteSpec>,
    #[serde(default)]
    pub initial_commit: bool,
}
