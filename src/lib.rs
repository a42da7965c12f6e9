#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)] // Simple counters cannot overflow

//! # content-manifest - Content Directory Manifest Maintainer
//!
//! Scans a content directory tree for JSON data files and records what it
//! finds in a single `manifest.json` index, so downstream consumers can
//! discover the available assets without walking the filesystem themselves.
//!
//! ## Architecture
//!
//! - [`scanner`]: Recursive discovery of data files and directories
//! - [`structure`]: Nested folder tree built from the discovered paths
//! - [`manifest`]: Loading, defaulting and writing the manifest file
//! - [`report`]: Human-readable summary of a run
//! - [`commands`]: The `update` procedure tying everything together
//! - [`config`]: Optional TOML configuration
//! - [`output`]: Colored, verbosity-aware status messages
//!
//! ## Example Usage
//!
//! ```no_run
//! use content_manifest::ManifestContext;
//! use content_manifest::commands::update::{self, UpdateOptions};
//!
//! # fn main() -> anyhow::Result<()> {
//! let ctx = ManifestContext::from_root("content".into());
//! let summary = update::execute(&ctx, &UpdateOptions::default(), &mut std::io::stdout())?;
//! println!("{} files recorded", summary.file_count);
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Command implementations (the manifest update run).
pub mod commands;

/// Configuration parsing and validation.
pub mod config;

/// Fatal error conditions of a manifest run.
pub mod errors;

/// Manifest model and persistence.
pub mod manifest;

/// Output formatting and verbosity control.
pub mod output;

/// Run summary rendering.
pub mod report;

/// Filesystem scanning for data files and directories.
pub mod scanner;

/// Folder structure tree construction.
pub mod structure;

/// Utility functions and helpers.
pub mod utils;

#[cfg(test)]
pub mod test_utils;

use std::path::PathBuf;

pub use errors::ManifestError;
pub use manifest::Manifest;
pub use structure::{FolderTree, build_structure};

/// Current version of the update-manifest binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default content root, relative to the working directory.
pub const DEFAULT_CONTENT_DIR: &str = "content";

/// File name of the manifest inside the content root.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Extension (without the dot) that marks a data file.
pub const DATA_EXTENSION: &str = "json";

/// Version written into a freshly created manifest.
pub const DEFAULT_MANIFEST_VERSION: &str = "1.0.0";

/// Central context for a manifest run.
///
/// Holds the resolved content root, the manifest location inside it, and
/// the configuration the run was started with.
///
/// # Examples
///
/// ```
/// use content_manifest::ManifestContext;
///
/// let ctx = ManifestContext::from_root("/srv/game/content".into());
/// assert!(ctx.manifest_path.ends_with("manifest.json"));
/// ```
#[derive(Debug, Clone)]
pub struct ManifestContext {
    /// Directory tree being scanned.
    pub content_root: PathBuf,

    /// Location of the manifest file (inside the content root).
    pub manifest_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,
}

impl ManifestContext {
    /// Creates a context from a configuration, resolving the manifest path
    /// inside the configured content directory.
    #[must_use]
    pub fn new(config: config::Config) -> Self {
        let content_root = config.scan.content_dir.clone();
        let manifest_path = content_root.join(&config.scan.manifest_file);
        Self {
            content_root,
            manifest_path,
            config,
        }
    }

    /// Creates a context with default settings for the given content root.
    #[must_use]
    pub fn from_root(content_root: PathBuf) -> Self {
        let mut config = config::Config::default();
        config.scan.content_dir = content_root;
        Self::new(config)
    }

    /// Checks whether the content root exists and is a directory.
    #[must_use]
    pub fn content_root_exists(&self) -> bool {
        self.content_root.is_dir()
    }

    /// Returns an error if the content root is missing.
    ///
    /// # Errors
    /// Returns [`ManifestError::ContentRootMissing`] if the directory does not exist.
    pub fn check_content_root(&self) -> Result<(), ManifestError> {
        if !self.content_root_exists() {
            return Err(ManifestError::ContentRootMissing {
                path: self.content_root.clone(),
            });
        }
        Ok(())
    }

    /// Scan options derived from the configuration.
    #[must_use]
    pub fn scan_options(&self) -> scanner::ScanOptions {
        scanner::ScanOptions::from_config(&self.config)
    }
}
