//! Storage root holding every bare repository as `<root>/<name>.git`.
//!
//! The store only knows where repositories live. Each `open` returns a fresh
//! `BareRepo`, so concurrent requests never share a libgit2 handle.
//!
//! Creation is not atomic: the existence check and `init` are separate
//! steps, and callers creating the same name concurrently must serialize.

use git2::{Repository, RepositoryInitOptions, Signature};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::git::repository::BareRepo;
use crate::models::RemoteSpec;

const INITIAL_COMMIT_MESSAGE: &str = "init: initial commit";

#[derive(Debug, Clone)]
pub struct RepoStore {
    root: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub description: Option<String>,
    pub remote: Option<RemoteSpec>,
    /// Record an empty-tree commit on HEAD right after init
    pub initial_commit: bool,
}

impl RepoStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn repo_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(format!("{}.git", name)))
    }

    pub fn open(&self, name: &str) -> Result<BareRepo> {
        let path = self.repo_path(name)?;
        debug!(name, path = %path.display(), "opening repository");
        BareRepo::open(name, &path)
    }

    /// Names of the bare repositories directly under the root, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let read_dir = std::fs::read_dir(&self.root).map_err(|e| {
            AppError::Internal(format!("cannot read {}: {}", self.root.display(), e))
        })?;

        let mut names = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| AppError::Internal(e.to_string()))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().to_string();
            let Some(name) = file_name.strip_suffix(".git") else {
                continue;
            };
            if name.is_empty() {
                continue;
            }

            match Repository::open(&path) {
                Ok(repo) if repo.is_bare() => names.push(name.to_string()),
                _ => debug!(path = %path.display(), "skipping non-bare directory"),
            }
        }

        names.sort_by_key(|n| n.to_lowercase());
        Ok(names)
    }

    /// Initialise `<root>/<name>.git` as a bare repository.
    pub fn create(&self, name: &str, options: &CreateOptions) -> Result<BareRepo> {
        let path = self.repo_path(name)?;
        if path.exists() {
            return Err(AppError::CreationConflict(name.to_string()));
        }

        let mut init_opts = RepositoryInitOptions::new();
        init_opts.bare(true).mkdir(true).mkpath(true);
        let repo = Repository::init_opts(&path, &init_opts)?;

        if let Some(description) = options.description.as_deref().filter(|d| !d.is_empty()) {
            std::fs::write(repo.path().join("description"), format!("{}\n", description))
                .map_err(|e| AppError::Internal(format!("cannot write description: {}", e)))?;
        }

        if let Some(remote) = &options.remote {
            repo.remote(&remote.name, &remote.url)?;
        }

        if options.initial_commit {
            write_initial_commit(&repo)?;
        }

        info!(name, path = %path.display(), "created bare repository");
        drop(repo);
        BareRepo::open(name, &path)
    }
}

pub type SharedStore = Arc<RepoStore>;

fn write_initial_commit(repo: &Repository) -> Result<()> {
    let sig = repo
        .signature()
        .or_else(|_| Signature::now("bare-git-viewer", "bare-git-viewer@localhost"))?;

    let tree_id = repo.treebuilder(None)?.write()?;
    let tree = repo.find_tree(tree_id)?;
    repo.commit(Some("HEAD"), &sig, &sig, INITIAL_COMMIT_MESSAGE, &tree, &[])?;
    Ok(())
}

/// Repository names are a single plain path component.
fn validate_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
        _ => Err(AppError::InvalidPath(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("project").is_ok());
        assert!(validate_name("my-repo.v2").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name(".").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("/etc").is_err());
        assert!(validate_name("a\\b").is_err());
    }

    #[test]
    fn test_repo_path_appends_git_suffix() {
        let store = RepoStore::new("/srv/repos");
        assert_eq!(
            store.repo_path("demo").unwrap(),
            PathBuf::from("/srv/repos/demo.git")
        );
    }

    #[test]
    fn test_open_unknown_repository() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RepoStore::new(tmp.path());
        assert!(matches!(store.open("missing"), Err(AppError::RepoNotFound(_))));
    }
}
