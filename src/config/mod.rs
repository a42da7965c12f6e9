pub mod parser;
pub mod validator;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{DATA_EXTENSION, DEFAULT_CONTENT_DIR, DEFAULT_MANIFEST_VERSION, MANIFEST_FILE};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanConfig {
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,
    /// Data file extensions, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestConfig {
    /// Version stamped into a manifest that is created from scratch
    #[serde(default = "default_manifest_version")]
    pub default_version: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            manifest_file: default_manifest_file(),
            extensions: default_extensions(),
            follow_symlinks: false,
        }
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            default_version: default_manifest_version(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// Unlike a missing manifest, a missing configuration file is an error:
    /// it is only read when explicitly requested.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The file contains invalid TOML
    /// - A value fails validation
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = parser::parse_config_str(&content)?;

        if let Err(e) = validator::ConfigValidator::new().validate_config_str(&content) {
            crate::output::warning(&format!("Configuration validation failed: {e}"));
        }

        Ok(config)
    }

    /// Load configuration from `path` when given, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the given file cannot be loaded.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path)
                .with_context(|| format!("Failed to load configuration: {}", path.display())),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(toml_str.as_bytes())?;
        Ok(())
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn apply_overrides(&mut self, content_dir: Option<PathBuf>, manifest_file: Option<String>) {
        if let Some(dir) = content_dir {
            self.scan.content_dir = dir;
        }
        if let Some(name) = manifest_file {
            self.scan.manifest_file = name;
        }
    }
}

// Default functions for serde
fn default_content_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CONTENT_DIR)
}

fn default_manifest_file() -> String {
    MANIFEST_FILE.to_string()
}

fn default_extensions() -> Vec<String> {
    vec![DATA_EXTENSION.to_string()]
}

fn default_manifest_version() -> String {
    DEFAULT_MANIFEST_VERSION.to_string()
}
