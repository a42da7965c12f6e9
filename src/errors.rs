use std::path::PathBuf;
use thiserror::Error;

/// Conditions that abort a manifest run.
///
/// Each variant is terminal: the run stops, nothing is retried and no
/// fallback manifest is produced.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The content root does not exist (or is not a directory).
    #[error("Content directory not found: {}", path.display())]
    ContentRootMissing {
        /// Path that was expected to be the content root
        path: PathBuf,
    },

    /// The existing manifest could not be read or is not a valid manifest.
    #[error("Error reading {}", path.display())]
    InvalidManifest {
        /// Location of the manifest file
        path: PathBuf,
        /// Underlying read or parse failure
        #[source]
        source: anyhow::Error,
    },

    /// The manifest could not be written back.
    #[error("Error writing {}", path.display())]
    WriteFailed {
        /// Location of the manifest file
        path: PathBuf,
        /// Underlying I/O or serialization failure
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_root_message() {
        let err = ManifestError::ContentRootMissing {
            path: PathBuf::from("content"),
        };
        assert_eq!(err.to_string(), "Content directory not found: content");
    }

    #[test]
    fn test_invalid_manifest_cause_in_chain() {
        let err = ManifestError::InvalidManifest {
            path: PathBuf::from("content/manifest.json"),
            source: anyhow::anyhow!("expected value at line 1 column 1"),
        };
        assert_eq!(err.to_string(), "Error reading content/manifest.json");

        let chained = format!("{:#}", anyhow::Error::from(err));
        assert!(chained.contains("expected value"));
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = ManifestError::WriteFailed {
            path: PathBuf::from("manifest.json"),
            source: anyhow::anyhow!("permission denied"),
        }
        .into();
        assert!(matches!(
            err.downcast_ref::<ManifestError>(),
            Some(ManifestError::WriteFailed { .. })
        ));
    }
}
