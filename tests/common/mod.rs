#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Working directory holding a `content/` folder, laid out the way the
/// binary expects when invoked without arguments.
pub struct TestContent {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestContent {
    /// Create a working directory with an empty `content/` folder
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join("content");
        fs::create_dir_all(&root)?;
        Ok(Self { temp_dir, root })
    }

    /// Create a working directory without any content folder
    pub fn without_root() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().join("content");
        Ok(Self { temp_dir, root })
    }

    pub fn workdir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("manifest.json")
    }

    pub fn file(&self, rel: &str, content: &str) -> Result<PathBuf> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn dir(&self, rel: &str) -> Result<PathBuf> {
        let path = self.root.join(rel);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    pub fn read_manifest(&self) -> Result<serde_json::Value> {
        let text = fs::read_to_string(self.manifest_path())?;
        Ok(serde_json::from_str(&text)?)
    }

    /// The binary, run from the working directory with colors disabled
    pub fn command(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("update-manifest")?;
        cmd.current_dir(self.workdir())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        Ok(cmd)
    }
}
