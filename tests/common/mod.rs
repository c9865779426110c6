#![allow(dead_code)]

use std::collections::BTreeMap;

use bare_git_viewer::git::RepoStore;
use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

/// 2024-01-01T10:00:00Z
pub const DAY_ONE: i64 = 1_704_103_200;
pub const HOUR: i64 = 3_600;
pub const DAY: i64 = 86_400;

pub struct Fixture {
    pub dir: TempDir,
    pub store: RepoStore,
    pub repo: Repository,
}

/// A store rooted in a temp dir holding one empty bare repository named `name`.
pub fn bare_fixture(name: &str) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init_bare(dir.path().join(format!("{}.git", name))).unwrap();
    let store = RepoStore::new(dir.path());
    Fixture { dir, store, repo }
}

/// Write `files` as a full snapshot and commit it on HEAD.
pub fn commit_snapshot(
    repo: &Repository,
    files: &[(&str, &[u8])],
    message: &str,
    timestamp: i64,
) -> Oid {
    let tree_id = write_tree(
        repo,
        files.iter().map(|(p, c)| (p.to_string(), c.to_vec())).collect(),
    );
    commit_tree(repo, tree_id, message, timestamp)
}

/// Commit an already written tree on HEAD.
pub fn commit_tree(repo: &Repository, tree_id: Oid, message: &str, timestamp: i64) -> Oid {
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = Signature::new("Ada Lovelace", "ada@example.com", &Time::new(timestamp, 0)).unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

fn write_tree(repo: &Repository, files: Vec<(String, Vec<u8>)>) -> Oid {
    let mut blobs = Vec::new();
    let mut dirs: BTreeMap<String, Vec<(String, Vec<u8>)>> = BTreeMap::new();

    for (path, data) in files {
        match path.split_once('/') {
            Some((dir, rest)) => dirs
                .entry(dir.to_string())
                .or_default()
                .push((rest.to_string(), data)),
            None => blobs.push((path, data)),
        }
    }

    let mut builder = repo.treebuilder(None).unwrap();
    for (name, data) in blobs {
        let oid = repo.blob(&data).unwrap();
        builder.insert(name, oid, 0o100644).unwrap();
    }
    for (name, children) in dirs {
        let oid = write_tree(repo, children);
        builder.insert(name, oid, 0o040000).unwrap();
    }
    builder.write().unwrap()
}

/// Write a single tree level from explicit `(name, oid, filemode)` entries.
pub fn write_entries(repo: &Repository, entries: &[(&str, Oid, i32)]) -> Oid {
    let mut builder = repo.treebuilder(None).unwrap();
    for (name, oid, mode) in entries {
        builder.insert(*name, *oid, *mode).unwrap();
    }
    builder.write().unwrap()
}
