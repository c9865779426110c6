//! Tree and file endpoints.
//!
//! - GET /api/v1/repos/{name}/tree?commit=&deep=
//! - GET /api/v1/repos/{name}/file?commit=&path=

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::default_ref;
use crate::error::Result;
use crate::git::SharedStore;
use crate::models::{FileContent, TreeEntry};

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/api/v1/repos/{name}/tree", get(get_tree))
        .route("/api/v1/repos/{name}/file", get(get_file_content))
        .with_state(store)
}

#[derive(Debug, Deserialize)]
struct TreeQuery {
    #[serde(default = "default_ref")]
    commit: String,
    #[serde(default)]
    deep: bool,
}

async fn get_tree(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
    Query(query): Query<TreeQuery>,
) -> Result<Json<Vec<TreeEntry>>> {
    let repo = store.open(&name)?;
    let entries = repo.walk(&query.commit, query.deep)?;
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
struct FileQuery {
    #[serde(default = "default_ref")]
    commit: String,
    path: String,
}

async fn get_file_content(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
    Query(query): Query<FileQuery>,
) -> Result<Json<FileContent>> {
    let repo = store.open(&name)?;
    let file = repo.read_file(&query.commit, &query.path)?;
    Ok(Json(file))
}
