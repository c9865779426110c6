//! Tree and file-content DTOs.
//!
//! - `TreeEntry`: one blob or sub-tree of a commit's tree, optionally nested
//! - `FileContent`: decoded text of a single blob plus its basename

use serde::{Deserialize, Serialize};

/// An item inside a tree, tagged by object kind.
///
/// `content` on a tree entry is only populated by a deep walk; a shallow
/// walk leaves it out of the serialized form entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeEntry {
    Blob {
        name: String,
        path: String,
        size: u64,
    },
    Tree {
        name: String,
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<Vec<TreeEntry>>,
    },
}

impl TreeEntry {
    pub fn name(&self) -> &str {
        match self {
            TreeEntry::Blob { name, .. } | TreeEntry::Tree { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeEntry::Blob { path, .. } | TreeEntry::Tree { path, .. } => path,
        }
    }

    pub fn is_blob(&self) -> bool {
        matches!(self, TreeEntry::Blob { .. })
    }

    /// Nested entries of a deeply walked tree, `None` for blobs and shallow trees.
    pub fn children(&self) -> Option<&[TreeEntry]> {
        match self {
            TreeEntry::Tree { content: Some(c), .. } => Some(c),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileContent {
    pub name: String,
    pub content: String,
}
