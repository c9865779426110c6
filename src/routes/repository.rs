//! Repository-level endpoints.
//!
//! - GET /api/v1/repos
//!   Names of the bare repositories under the storage root.
//!
//! - POST /api/v1/repos { name, description?, remote?: { name, url }, initial_commit? }
//!   Creates `<root>/<name>.git`. 409 when it already exists.
//!
//! - GET /api/v1/repos/{name}?branch=
//!   Description, branches, active branch and total commits.
//!   `null` when the repository is not bare.
//!
//! - GET /api/v1/repos/{name}/tags
//!   Tags with target commit and annotation message.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use super::BranchQuery;
use crate::error::Result;
use crate::git::{CreateOptions, SharedStore};
use crate::models::{CreateRepoRequest, RepositoryInfo, Tag};

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/api/v1/repos", get(list_repositories).post(create_repository))
        .route("/api/v1/repos/{name}", get(get_repository_info))
        .route("/api/v1/repos/{name}/tags", get(get_tags))
        .with_state(store)
}

async fn list_repositories(State(store): State<SharedStore>) -> Result<Json<Vec<String>>> {
    Ok(Json(store.list()?))
}

async fn create_repository(
    State(store): State<SharedStore>,
    Json(request): Json<CreateRepoRequest>,
) -> Result<(StatusCode, Json<Option<RepositoryInfo>>)> {
    let options = CreateOptions {
        description: request.description,
        remote: request.remote,
        initial_commit: request.initial_commit,
    };

    let repo = store.create(&request.name, &options)?;
    let info = repo.info("HEAD")?;
    Ok((StatusCode::CREATED, Json(info)))
}

async fn get_repository_info(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
    Query(query): Query<BranchQuery>,
) -> Result<Json<Option<RepositoryInfo>>> {
    let repo = store.open(&name)?;
    Ok(Json(repo.info(&query.branch)?))
}

async fn get_tags(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Tag>>> {
    let repo = store.open(&name)?;
    Ok(Json(repo.tags()?))
}
