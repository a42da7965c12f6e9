//! Filesystem scanning for data files and directories.
//!
//! Both scans walk the whole content root and report paths relative to it,
//! `/`-separated and sorted. Entries that cannot be read during the walk
//! (permission errors, symlink loops) are skipped.

use crate::config::Config;
use crate::utils::paths::to_manifest_path;
use crate::{DATA_EXTENSION, MANIFEST_FILE};
use std::path::Path;
use tracing::{Level, debug, span};
use walkdir::{DirEntry, WalkDir};

/// What counts as a data file, and how the walk treats symlinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Data file extensions, without the leading dot
    pub extensions: Vec<String>,
    /// File name never reported as a data file (the manifest itself)
    pub manifest_file: String,
    /// Whether to descend into symlinked directories
    pub follow_symlinks: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: vec![DATA_EXTENSION.to_string()],
            manifest_file: MANIFEST_FILE.to_string(),
            follow_symlinks: false,
        }
    }
}

impl ScanOptions {
    /// Builds scan options from the `[scan]` configuration section.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            extensions: config.scan.extensions.clone(),
            manifest_file: config.scan.manifest_file.clone(),
            follow_symlinks: config.scan.follow_symlinks,
        }
    }

    /// Whether a file with this name is a data file to list.
    #[must_use]
    pub fn is_data_file(&self, file_name: &str) -> bool {
        if file_name == self.manifest_file {
            return false;
        }
        self.extensions.iter().any(|ext| {
            file_name
                .strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }
}

/// Finds every data file under `root` using the default options.
///
/// See [`find_data_files_with`].
#[must_use]
pub fn find_data_files(root: &Path) -> Vec<String> {
    find_data_files_with(root, &ScanOptions::default())
}

/// Finds every data file under `root`, excluding the manifest itself.
///
/// Returns root-relative, `/`-separated paths in ascending order. An empty
/// tree yields an empty list.
#[must_use]
pub fn find_data_files_with(root: &Path, options: &ScanOptions) -> Vec<String> {
    let span = span!(Level::DEBUG, "find_data_files", root = %root.display());
    let _guard = span.enter();

    let mut files: Vec<String> = walk(root, options)
        .filter(|entry| !is_directory(entry))
        .filter(|entry| options.is_data_file(&entry.file_name().to_string_lossy()))
        .filter_map(|entry| to_manifest_path(entry.path(), root))
        .collect();

    files.sort_unstable();
    files.dedup();

    debug!(count = files.len(), "Data files collected");
    files
}

/// Finds every directory under `root` using the default options.
///
/// See [`find_all_directories_with`].
#[must_use]
pub fn find_all_directories(root: &Path) -> Vec<String> {
    find_all_directories_with(root, &ScanOptions::default())
}

/// Finds every directory under `root`, empty ones included.
///
/// The root itself is never part of the result. Paths are root-relative,
/// `/`-separated, sorted and unique.
#[must_use]
pub fn find_all_directories_with(root: &Path, options: &ScanOptions) -> Vec<String> {
    let span = span!(Level::DEBUG, "find_all_directories", root = %root.display());
    let _guard = span.enter();

    let mut directories: Vec<String> = walk(root, options)
        .filter(is_directory)
        .filter_map(|entry| to_manifest_path(entry.path(), root))
        .collect();

    directories.sort_unstable();
    directories.dedup();

    debug!(count = directories.len(), "Directories collected");
    directories
}

/// Walks all descendants of `root`, dropping entries that fail to read.
fn walk(root: &Path, options: &ScanOptions) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(options.follow_symlinks)
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!(root = %root.display(), error = %err, "Skipping unreadable entry");
                None
            }
        })
}

/// A symlink to a directory counts as a directory even when not followed.
fn is_directory(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}
