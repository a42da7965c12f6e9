//! Folder structure tree built from discovered paths.
//!
//! The tree mirrors the on-disk hierarchy under the content root: each key
//! is a folder name, each value the folders below it. Top-level keys are
//! categories (`assets`, `graphs`, `maps`, ... any name is accepted).

use crate::utils::paths;
use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::{Deserialize, Serialize};

/// Nested mapping of folder name to sub-folders.
///
/// Serialized as a plain JSON object; an empty folder is `{}`. Keys keep
/// their insertion order.
///
/// Note that equality ignores key order, as with any map. Compare the
/// serialized form when order matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderTree {
    /// Child folders keyed by name
    children: IndexMap<String, FolderTree>,
}

impl FolderTree {
    /// Create an empty tree
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a folder exists for every prefix of `segments`.
    ///
    /// Existing folders are never replaced, so inserting a path twice or
    /// inserting a parent after its child leaves the tree unchanged.
    /// Returns the folder named by the last segment.
    pub fn insert_path<'a, I>(&mut self, segments: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut current = self;
        for segment in segments {
            current = current.children.entry(segment.to_string()).or_default();
        }
        current
    }

    /// Look up a direct child folder
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Self> {
        self.children.get(name)
    }

    /// Whether a `/`-separated folder path can be followed from this node
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        let mut current = self;
        for segment in paths::segments(path) {
            match current.children.get(segment) {
                Some(child) => current = child,
                None => return false,
            }
        }
        true
    }

    /// Number of direct child folders
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether this folder has no sub-folders
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of folders below this node, at any depth
    #[must_use]
    pub fn folder_count(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.folder_count())
            .sum()
    }

    /// Iterate direct children in insertion order
    pub fn iter(&self) -> Iter<'_, String, Self> {
        self.children.iter()
    }
}

impl<'a> IntoIterator for &'a FolderTree {
    type Item = (&'a String, &'a FolderTree);
    type IntoIter = Iter<'a, String, FolderTree>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Build the folder tree from scanned file and directory paths.
///
/// Every directory path is inserted first, then the parent chain of every
/// file that sits below a folder. Files directly under the root add
/// nothing. Given the same inputs the result is identical, keys ordered by
/// first appearance.
///
/// # Examples
///
/// ```
/// use content_manifest::build_structure;
///
/// let files = ["assets/a.json", "assets/sub/b.json", "top.json"];
/// let dirs = ["assets", "assets/sub", "graphs", "graphs/empty"];
/// let tree = build_structure(&files, &dirs);
///
/// assert!(tree.contains_path("assets/sub"));
/// assert!(tree.contains_path("graphs/empty"));
/// assert_eq!(tree.len(), 2);
/// ```
#[must_use]
pub fn build_structure<F, D>(files: &[F], directories: &[D]) -> FolderTree
where
    F: AsRef<str>,
    D: AsRef<str>,
{
    let mut tree = FolderTree::new();

    for dir in directories {
        tree.insert_path(paths::segments(dir.as_ref()));
    }

    // Folders holding only data files are normally listed already; this
    // keeps the tree consistent when they are not.
    for file in files {
        if let Some((parent, _name)) = file.as_ref().rsplit_once('/') {
            tree.insert_path(paths::segments(parent));
        }
    }

    tree
}
