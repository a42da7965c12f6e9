//! The manifest file: model, loading and writing.
//!
//! The manifest is the single JSON index consumers read to discover the
//! content tree:
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "generated": "2024-03-07",
//!   "structure": { "assets": { "sub": {} } },
//!   "files": ["assets/a.json", "assets/sub/b.json"]
//! }
//! ```
//!
//! Every run rewrites it in full. `version` survives from the previous file,
//! `generated`, `structure` and `files` are always replaced. Any other
//! top-level keys are carried over untouched.

use crate::errors::ManifestError;
use crate::structure::FolderTree;
use crate::{DEFAULT_MANIFEST_VERSION, utils};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// The persisted content index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    /// Content version, preserved across runs
    pub version: String,
    /// Date of the last run (`YYYY-MM-DD`)
    pub generated: String,
    /// Folder hierarchy under the content root
    pub structure: FolderTree,
    /// Sorted data file paths relative to the content root
    pub files: Vec<String>,
    /// Unrecognized top-level keys from an existing manifest
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// How [`load_or_init`] obtained the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// An existing manifest file was parsed
    Loaded,
    /// No manifest existed, a default one was created
    Created,
}

/// Shape accepted when reading a manifest back.
///
/// Only `version` has to be well-formed: the other known fields are about to
/// be replaced, so a malformed value there is dropped instead of failing.
#[derive(Deserialize)]
struct RawManifest {
    /// Version string, if present; an explicit `null` is rejected
    #[serde(default, deserialize_with = "present_version")]
    version: Option<String>,
    /// Everything else, in file order
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl Manifest {
    /// Create an empty manifest stamped with today's date
    #[must_use]
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
            generated: utils::today(),
            structure: FolderTree::new(),
            files: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Parse manifest JSON text
    ///
    /// A missing `version` falls back to `default_version`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object or `version` is
    /// present but not a string (`null` included).
    pub fn from_json(text: &str, default_version: &str) -> serde_json::Result<Self> {
        let raw: RawManifest = serde_json::from_str(text)?;
        let mut rest = raw.rest;

        let generated = take_field(&mut rest, "generated");
        let structure = take_field(&mut rest, "structure");
        let files = take_field(&mut rest, "files");

        Ok(Self {
            version: raw.version.unwrap_or_else(|| default_version.to_string()),
            generated,
            structure,
            files,
            extra: rest,
        })
    }

    /// Serialize as 2-space indented JSON with a trailing newline
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }

    /// Replace the scanned content and stamp the run date
    pub fn refresh(&mut self, files: Vec<String>, structure: FolderTree, generated: String) {
        self.files = files;
        self.structure = structure;
        self.generated = generated;
    }

    /// Read and parse an existing manifest file
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::InvalidManifest`] if the file cannot be read
    /// or parsed.
    pub fn load(path: &Path, default_version: &str) -> Result<Self, ManifestError> {
        let invalid = |source: anyhow::Error| ManifestError::InvalidManifest {
            path: path.to_path_buf(),
            source,
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
            .map_err(invalid)?;

        let manifest = Self::from_json(&text, default_version)
            .map_err(anyhow::Error::from)
            .map_err(invalid)?;

        debug!(
            path = %path.display(),
            version = %manifest.version,
            files = manifest.files.len(),
            "Manifest loaded"
        );
        Ok(manifest)
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST_VERSION)
    }
}

/// A `version` key that is present must hold a string.
fn present_version<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

/// Remove `key` from `map`, decoding it or falling back to the default.
fn take_field<T: DeserializeOwned + Default>(map: &mut Map<String, Value>, key: &str) -> T {
    map.remove(key)
        .and_then(|value| match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                debug!(field = key, error = %err, "Discarding malformed manifest field");
                None
            }
        })
        .unwrap_or_default()
}

/// Load the manifest at `path`, or create a default one if it is absent.
///
/// # Errors
///
/// Returns [`ManifestError::InvalidManifest`] if the file exists but cannot
/// be read or parsed.
pub fn load_or_init(
    path: &Path,
    default_version: &str,
) -> Result<(Manifest, LoadStatus), ManifestError> {
    if path.exists() {
        let manifest = Manifest::load(path, default_version)?;
        return Ok((manifest, LoadStatus::Loaded));
    }

    info!(path = %path.display(), "No manifest found, starting a new one");
    Ok((Manifest::new(default_version), LoadStatus::Created))
}

/// Write `manifest` to `path`, replacing any previous content.
///
/// # Errors
///
/// Returns [`ManifestError::WriteFailed`] if serialization or the write fails.
pub fn write(path: &Path, manifest: &Manifest) -> Result<(), ManifestError> {
    let failed = |source: anyhow::Error| ManifestError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let text = manifest
        .to_json()
        .map_err(anyhow::Error::from)
        .map_err(failed)?;
    fs::write(path, text)
        .with_context(|| format!("Failed to write {}", path.display()))
        .map_err(failed)?;

    debug!(path = %path.display(), files = manifest.files.len(), "Manifest written");
    Ok(())
}
