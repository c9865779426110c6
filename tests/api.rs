mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use bare_git_viewer::routes::create_router;
use common::{bare_fixture, commit_snapshot, DAY_ONE, HOUR};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_tree_file_and_diff_endpoints() {
    let fx = bare_fixture("demo");
    let c1 = commit_snapshot(&fx.repo, &[("a.txt", b"one\n")], "c1", DAY_ONE);
    let c2 = commit_snapshot(
        &fx.repo,
        &[("a.txt", b"one\ntwo\n"), ("b/x.txt", b"hello")],
        "c2",
        DAY_ONE + HOUR,
    );
    let app = create_router(Arc::new(fx.store.clone()));

    let (status, body) = send(app.clone(), get("/api/v1/repos/demo/tree?deep=true")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"type": "blob", "name": "a.txt", "path": "a.txt", "size": 8},
            {"type": "tree", "name": "b", "path": "b", "content": [
                {"type": "blob", "name": "x.txt", "path": "b/x.txt", "size": 5}
            ]}
        ])
    );

    let uri = format!("/api/v1/repos/demo/file?commit={}&path=b/x.txt", c2);
    let (status, body) = send(app.clone(), get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"name": "x.txt", "content": "hello"}));

    let uri = format!("/api/v1/repos/demo/diff?to={}", c2);
    let (status, body) = send(app.clone(), get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["to_commit"], c2.to_string());
    assert_eq!(body["from_commit"], c1.to_string());
    assert_eq!(
        body["changes"],
        json!([
            {"type": "modified", "path": "a.txt"},
            {"type": "added", "path": "b/x.txt"}
        ])
    );

    let uri = format!("/api/v1/repos/demo/diff?to={}", c1);
    let (status, body) = send(app, get(&uri)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("no parent"));
}

#[tokio::test]
async fn test_commit_endpoints() {
    let fx = bare_fixture("demo");
    let c1 = commit_snapshot(&fx.repo, &[("a.txt", b"1\n")], "first", DAY_ONE);
    commit_snapshot(&fx.repo, &[("a.txt", b"1\n2\n")], "second", DAY_ONE + HOUR);
    let app = create_router(Arc::new(fx.store.clone()));

    let (status, body) = send(app.clone(), get("/api/v1/repos/demo/commits")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["date"], "2024-01-01");
    assert_eq!(body[0]["commits"][0]["message"], "second");
    assert_eq!(body[0]["commits"][1]["stats"]["insertions"], 1);

    let (status, body) = send(app.clone(), get("/api/v1/repos/demo/commits/last")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "second");

    let uri = format!("/api/v1/repos/demo/commits/{}", c1);
    let (status, body) = send(app.clone(), get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hash"], c1.to_string());

    let (status, _) = send(app, get("/api/v1/repos/demo/commits/last?branch=ghost")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_list_and_info_endpoints() {
    let dir = tempfile::tempdir().unwrap();
    let store = bare_git_viewer::git::RepoStore::new(dir.path());
    let app = create_router(Arc::new(store));

    let create = |body: Value| {
        Request::builder()
            .method("POST")
            .uri("/api/v1/repos")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    };

    let (status, body) = send(
        app.clone(),
        create(json!({
            "name": "demo",
            "description": "A demo",
            "remote": {"name": "origin", "url": "https://example.com/demo.git"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "demo");
    assert_eq!(body["description"], "A demo");
    assert_eq!(body["total_commits"], 0);

    let (status, _) = send(app.clone(), create(json!({"name": "demo"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(app.clone(), get("/api/v1/repos")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["demo"]));

    let (status, body) = send(app.clone(), get("/api/v1/repos/demo/tags")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(app, get("/api/v1/repos/missing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Repository not found: missing");
}
