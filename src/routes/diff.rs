//! Diff endpoint.
//!
//! GET /api/v1/repos/{name}/diff?to=<commit>&from=<optional>
//!
//! Without `from`, `to` is compared against its first parent; a root commit
//! then answers 400.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::git::SharedStore;
use crate::models::DiffResult;

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/api/v1/repos/{name}/diff", get(get_diff))
        .with_state(store)
}

#[derive(Debug, Deserialize)]
struct DiffQuery {
    to: String,
    from: Option<String>,
}

async fn get_diff(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
    Query(query): Query<DiffQuery>,
) -> Result<Json<DiffResult>> {
    let repo = store.open(&name)?;
    let response = repo.diff(&query.to, query.from.as_deref())?;
    Ok(Json(response))
}
