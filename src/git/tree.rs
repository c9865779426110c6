use git2::{ObjectType, Oid, Repository};
use std::path::Path;

use crate::error::{AppError, Result};
use crate::git::repository::BareRepo;
use crate::models::{FileContent, TreeEntry};

/// A walked entry waiting for its children to be attached.
struct Slot {
    entry: Option<TreeEntry>,
    children: Vec<usize>,
}

impl BareRepo {
    /// List the tree of `commit`, one level deep or, with `deep`, all the way down.
    ///
    /// Sibling order is whatever the object store reports for each tree.
    pub fn walk(&self, commit: &str, deep: bool) -> Result<Vec<TreeEntry>> {
        let tree_id = self.resolve_commit(commit)?.tree_id();
        walk_tree(self.repo(), tree_id, deep)
    }

    /// Read a blob at `path` in `commit` as UTF-8 text.
    pub fn read_file(&self, commit: &str, path: &str) -> Result<FileContent> {
        let tree = self.resolve_commit(commit)?.tree()?;

        let entry = tree
            .get_path(Path::new(path))
            .map_err(|_| AppError::ObjectNotFound(path.to_string()))?;

        let obj = entry.to_object(self.repo())?;
        let blob = obj
            .as_blob()
            .ok_or_else(|| AppError::InvalidPath(format!("{} is not a file", path)))?;

        let content = String::from_utf8(blob.content().to_vec())
            .map_err(|_| AppError::Encoding(path.to_string()))?;

        let name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string());

        Ok(FileContent { name, content })
    }
}

/// Shape a tree into nested entries using an explicit worklist, so deeply
/// nested trees never grow the call stack.
///
/// Slots are appended in discovery order, which puts every child after its
/// parent; assembling in reverse therefore always finds children finished.
pub fn walk_tree(repo: &Repository, root: Oid, deep: bool) -> Result<Vec<TreeEntry>> {
    let mut slots: Vec<Slot> = Vec::new();
    let mut top_level: Vec<usize> = Vec::new();
    let mut worklist: Vec<(Oid, Option<usize>, String)> = vec![(root, None, String::new())];
    let odb = repo.odb()?;

    while let Some((tree_id, owner, base_path)) = worklist.pop() {
        let tree = repo.find_tree(tree_id)?;

        for entry in tree.iter() {
            let name = entry.name().unwrap_or("").to_string();
            let path = if base_path.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", base_path, name)
            };

            let walked = match entry.kind() {
                Some(ObjectType::Blob) => {
                    // header only, the blob body is never loaded
                    let (size, _) = odb.read_header(entry.id())?;
                    let size = size as u64;
                    TreeEntry::Blob { name, path, size }
                }
                Some(ObjectType::Tree) => {
                    if deep {
                        worklist.push((entry.id(), Some(slots.len()), path.clone()));
                    }
                    TreeEntry::Tree {
                        name,
                        path,
                        content: None,
                    }
                }
                // gitlinks (submodules) have no object in this store
                _ => continue,
            };

            let idx = slots.len();
            slots.push(Slot {
                entry: Some(walked),
                children: Vec::new(),
            });
            match owner {
                Some(parent) => slots[parent].children.push(idx),
                None => top_level.push(idx),
            }
        }
    }

    if deep {
        for idx in (0..slots.len()).rev() {
            let child_ids = std::mem::take(&mut slots[idx].children);
            let children: Vec<TreeEntry> = child_ids
                .into_iter()
                .filter_map(|c| slots[c].entry.take())
                .collect();

            if let Some(TreeEntry::Tree { content, .. }) = slots[idx].entry.as_mut() {
                *content = Some(children);
            }
        }
    }

    Ok(top_level
        .into_iter()
        .filter_map(|idx| slots[idx].entry.take())
        .collect())
}
