use git2::{Delta, DiffFindOptions, DiffOptions};

use crate::error::{AppError, Result};
use crate::git::repository::BareRepo;
use crate::models::{Change, DiffResult};

impl BareRepo {
    /// Compare `to` against `from`, or against its first parent when `from` is omitted.
    ///
    /// `to` is always the endpoint and `from` the baseline, whichever of the
    /// two is older. Changes keep the order the tree diff reports them in.
    pub fn diff(&self, to: &str, from: Option<&str>) -> Result<DiffResult> {
        let to_commit = self.resolve_commit(to)?;
        let to_tree = to_commit.tree()?;

        let from_commit = match from {
            Some(rev) => self.resolve_commit(rev)?,
            None if to_commit.parent_count() == 0 => {
                return Err(AppError::NoParentCommit(to_commit.id().to_string()));
            }
            None => to_commit.parent(0)?,
        };
        let from_tree = from_commit.tree()?;

        let mut opts = DiffOptions::new();
        opts.context_lines(0).include_typechange(true);

        let mut diff = self
            .repo()
            .diff_tree_to_tree(Some(&from_tree), Some(&to_tree), Some(&mut opts))?;

        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;

        let changes = diff
            .deltas()
            .filter_map(|delta| {
                let old_path = delta.old_file().path().map(|p| p.to_string_lossy().to_string());
                let new_path = delta.new_file().path().map(|p| p.to_string_lossy().to_string());
                classify_delta(delta.status(), old_path, new_path)
            })
            .collect();

        Ok(DiffResult {
            to_commit: to_commit.id().to_string(),
            from_commit: from_commit.id().to_string(),
            changes,
        })
    }
}

/// Turn one raw delta into a typed change.
///
/// Renames keep both paths. Every other kind reports the "before" path when
/// there is one, else the "after" path. Deltas that describe no change
/// between two trees are dropped.
pub fn classify_delta(
    status: Delta,
    old_path: Option<String>,
    new_path: Option<String>,
) -> Option<Change> {
    if status == Delta::Renamed {
        return Some(Change::Renamed {
            from: old_path?,
            to: new_path?,
        });
    }

    let path = old_path.or(new_path)?;
    match status {
        Delta::Added => Some(Change::Added { path }),
        Delta::Deleted => Some(Change::Deleted { path }),
        Delta::Modified => Some(Change::Modified { path }),
        Delta::Copied => Some(Change::Copied { path }),
        Delta::Typechange => Some(Change::TypeChanged { path }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_rename_keeps_both_paths() {
        let change = classify_delta(Delta::Renamed, some("old.txt"), some("new.txt")).unwrap();
        assert_eq!(
            change,
            Change::Renamed {
                from: "old.txt".to_string(),
                to: "new.txt".to_string(),
            }
        );
        assert_eq!(change.path(), None);
    }

    #[test]
    fn test_single_path_prefers_before_path() {
        let change = classify_delta(Delta::Copied, some("src.txt"), some("copy.txt")).unwrap();
        assert_eq!(change, Change::Copied { path: "src.txt".to_string() });
    }

    #[test]
    fn test_single_path_falls_back_to_after_path() {
        let change = classify_delta(Delta::Added, None, some("new.txt")).unwrap();
        assert_eq!(change, Change::Added { path: "new.txt".to_string() });
    }

    #[test]
    fn test_each_kind_is_classified() {
        let cases = [
            (Delta::Added, "added"),
            (Delta::Deleted, "deleted"),
            (Delta::Modified, "modified"),
            (Delta::Copied, "copied"),
            (Delta::Typechange, "type-changed"),
        ];

        for (status, expected) in cases {
            let change = classify_delta(status, some("f"), some("f")).unwrap();
            let json = serde_json::to_value(&change).unwrap();
            assert_eq!(json["type"], expected);
            assert_eq!(json["path"], "f");
        }
    }

    #[test]
    fn test_unchanged_deltas_are_dropped() {
        assert!(classify_delta(Delta::Unmodified, some("f"), some("f")).is_none());
        assert!(classify_delta(Delta::Ignored, some("f"), some("f")).is_none());
        assert!(classify_delta(Delta::Modified, None, None).is_none());
    }
}
