//! Commit history endpoints.
//!
//! - GET /api/v1/repos/{name}/commits?branch=
//!   Full history from `branch`, grouped into contiguous date runs.
//!   Walks every reachable commit; slow on long histories.
//!
//! - GET /api/v1/repos/{name}/commits/last?branch=
//! - GET /api/v1/repos/{name}/commits/{hash}

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use super::BranchQuery;
use crate::error::Result;
use crate::git::SharedStore;
use crate::models::{CommitSummary, DateBucket};

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/api/v1/repos/{name}/commits", get(get_commits))
        .route("/api/v1/repos/{name}/commits/last", get(get_last_commit))
        .route("/api/v1/repos/{name}/commits/{hash}", get(get_commit))
        .with_state(store)
}

async fn get_commits(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
    Query(query): Query<BranchQuery>,
) -> Result<Json<Vec<DateBucket>>> {
    let repo = store.open(&name)?;
    let start = std::time::Instant::now();
    let buckets = repo.commit_list(&query.branch)?;
    tracing::debug!(
        "grouped history of {} into {} buckets in {:?}",
        name,
        buckets.len(),
        start.elapsed()
    );
    Ok(Json(buckets))
}

async fn get_last_commit(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
    Query(query): Query<BranchQuery>,
) -> Result<Json<CommitSummary>> {
    let repo = store.open(&name)?;
    Ok(Json(repo.last_commit(&query.branch)?))
}

async fn get_commit(
    State(store): State<SharedStore>,
    Path((name, hash)): Path<(String, String)>,
) -> Result<Json<CommitSummary>> {
    let repo = store.open(&name)?;
    Ok(Json(repo.commit_info(&hash)?))
}
