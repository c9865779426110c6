//! API route handlers - maps HTTP endpoints to repository operations.
//!
//! Every handler opens the named repository for the duration of the request.
//! Each submodule defines routes for a feature area:
//! - `repository`: List, create, metadata and tags
//! - `tree`: Tree listing and file content at a commit
//! - `commits`: Date-grouped history, last commit, single commit
//! - `diff`: Changes between two commits

pub mod commits;
pub mod diff;
pub mod repository;
pub mod tree;

use axum::Router;
use serde::Deserialize;

use crate::git::SharedStore;

pub fn create_router(store: SharedStore) -> Router {
    Router::new()
        .merge(repository::routes(store.clone()))
        .merge(tree::routes(store.clone()))
        .merge(commits::routes(store.clone()))
        .merge(diff::routes(store))
}

/// Shared `?branch=` query, defaulting to HEAD.
#[derive(Debug, Deserialize)]
pub(crate) struct BranchQuery {
    #[serde(default = "default_ref")]
    pub branch: String,
}

pub(crate) fn default_ref() -> String {
    "HEAD".to_string()
}
