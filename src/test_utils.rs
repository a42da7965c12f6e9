#[cfg(test)]
pub mod fixtures {
    use crate::{MANIFEST_FILE, ManifestContext};
    use anyhow::Result;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// A throwaway content root inside a temporary directory.
    pub struct ContentTree {
        pub temp_dir: TempDir,
        pub root: PathBuf,
    }

    impl ContentTree {
        pub fn new() -> Result<Self> {
            let temp_dir = tempfile::tempdir()?;
            let root = temp_dir.path().join("content");
            fs::create_dir_all(&root)?;
            Ok(Self { temp_dir, root })
        }

        pub fn root(&self) -> &Path {
            &self.root
        }

        pub fn manifest_path(&self) -> PathBuf {
            self.root.join(MANIFEST_FILE)
        }

        pub fn context(&self) -> ManifestContext {
            ManifestContext::from_root(self.root.clone())
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
    }
}
