use crate::manifest::{self, LoadStatus, Manifest};
use crate::output::Verbosity;
use crate::report::Reporter;
use crate::structure::build_structure;
use crate::{ManifestContext, scanner, utils};
use anyhow::Result;
use std::io::{self, Write};
use tracing::{Level, info, span, warn};

/// Switches for a single update run
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Scan and report, but leave the manifest file untouched
    pub dry_run: bool,
    /// How much of the report to print
    pub verbosity: Verbosity,
}

/// What an update run found and did
#[derive(Debug, Clone)]
pub struct UpdateSummary {
    /// Number of directories under the content root
    pub directory_count: usize,
    /// Number of data files recorded
    pub file_count: usize,
    /// Whether the manifest was loaded or created
    pub status: LoadStatus,
    /// Whether the manifest file was written
    pub written: bool,
    /// The manifest as written (or as it would have been)
    pub manifest: Manifest,
}

/// Rescan the content root and rewrite its manifest
///
/// The report is written to `out`. Nothing is written to disk if the
/// content root is missing or the existing manifest cannot be parsed.
/// A failing `out` is logged and never stops the manifest from being saved.
///
/// # Errors
///
/// Returns an error if:
/// - The content root does not exist ([`crate::ManifestError::ContentRootMissing`])
/// - The existing manifest is unreadable ([`crate::ManifestError::InvalidManifest`])
/// - The manifest cannot be written ([`crate::ManifestError::WriteFailed`])
pub fn execute<W: Write>(
    ctx: &ManifestContext,
    options: &UpdateOptions,
    out: &mut W,
) -> Result<UpdateSummary> {
    let span = span!(Level::INFO, "update_manifest", root = %ctx.content_root.display());
    let _guard = span.enter();

    ctx.check_content_root()?;

    let mut reporter = Reporter::new(out, options.verbosity);
    let mut report_failed = false;
    let mut report = |result: io::Result<()>| {
        if let Err(err) = result {
            if !report_failed {
                warn!(error = %err, "Report output failed, continuing without it");
            }
            report_failed = true;
        }
    };
    report(reporter.scan_started(&ctx.content_root));

    let scan_options = ctx.scan_options();
    let files = scanner::find_data_files_with(&ctx.content_root, &scan_options);
    let directories = scanner::find_all_directories_with(&ctx.content_root, &scan_options);
    report(reporter.scan_results(&directories, &files));

    let (mut manifest, status) =
        manifest::load_or_init(&ctx.manifest_path, &ctx.config.manifest.default_version)?;
    report(reporter.manifest_status(status, &ctx.manifest_path));

    let structure = build_structure(&files, &directories);
    let file_count = files.len();
    manifest.refresh(files, structure, utils::today());

    if !options.dry_run {
        manifest::write(&ctx.manifest_path, &manifest)?;
    }
    report(reporter.written(options.dry_run));
    report(reporter.summary(&manifest));
    report(reporter.done());

    info!(
        files = file_count,
        directories = directories.len(),
        dry_run = options.dry_run,
        "Manifest update finished"
    );

    Ok(UpdateSummary {
        directory_count: directories.len(),
        file_count,
        status,
        written: !options.dry_run,
        manifest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManifestError;
    use crate::test_utils::fixtures::ContentTree;
    use std::fs;

    fn run(tree: &ContentTree, options: &UpdateOptions) -> Result<UpdateSummary> {
        execute(&tree.context(), options, &mut std::io::sink())
    }

    #[test]
    fn test_first_run_creates_manifest() -> Result<()> {
        let tree = ContentTree::new()?;
        tree.file("assets/a.json", "{}")?;
        tree.file("assets/sub/b.json", "{}")?;
        tree.dir("graphs/empty")?;

        let summary = run(&tree, &UpdateOptions::default())?;
        assert_eq!(summary.status, LoadStatus::Created);
        assert_eq!(summary.file_count, 2);
        assert_eq!(summary.directory_count, 4);
        assert!(summary.written);

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(tree.manifest_path())?)?;
        assert_eq!(written["version"], "1.0.0");
        assert_eq!(written["generated"], utils::today().as_str());
        assert_eq!(
            written["files"],
            serde_json::json!(["assets/a.json", "assets/sub/b.json"])
        );
        assert_eq!(
            written["structure"],
            serde_json::json!({"assets": {"sub": {}}, "graphs": {"empty": {}}})
        );
        Ok(())
    }

    #[test]
    fn test_second_run_does_not_list_manifest() -> Result<()> {
        let tree = ContentTree::new()?;
        tree.file("maps/m.json", "{}")?;

        run(&tree, &UpdateOptions::default())?;
        let summary = run(&tree, &UpdateOptions::default())?;

        assert_eq!(summary.status, LoadStatus::Loaded);
        assert_eq!(summary.manifest.files, vec!["maps/m.json"]);
        Ok(())
    }

    #[test]
    fn test_missing_root_fails_without_writing() -> Result<()> {
        let tree = ContentTree::new()?;
        let ctx = crate::ManifestContext::from_root(tree.root().join("nope"));

        let err = execute(&ctx, &UpdateOptions::default(), &mut std::io::sink()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ManifestError>(),
            Some(ManifestError::ContentRootMissing { .. })
        ));
        assert!(!ctx.manifest_path.exists());
        Ok(())
    }

    #[test]
    fn test_corrupt_manifest_left_untouched() -> Result<()> {
        let tree = ContentTree::new()?;
        tree.file("assets/a.json", "{}")?;
        tree.file("manifest.json", "{\"version\": \"1.0.0\", \"files\": [")?;

        let err = run(&tree, &UpdateOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ManifestError>(),
            Some(ManifestError::InvalidManifest { .. })
        ));
        assert_eq!(
            fs::read_to_string(tree.manifest_path())?,
            "{\"version\": \"1.0.0\", \"files\": ["
        );
        Ok(())
    }

    #[test]
    fn test_dry_run_writes_nothing() -> Result<()> {
        let tree = ContentTree::new()?;
        tree.file("assets/a.json", "{}")?;

        let options = UpdateOptions {
            dry_run: true,
            ..UpdateOptions::default()
        };
        let summary = run(&tree, &options)?;

        assert!(!summary.written);
        assert_eq!(summary.manifest.files, vec!["assets/a.json"]);
        assert!(!tree.manifest_path().exists());
        Ok(())
    }

    /// Output whose reader has gone away, like stdout piped into `head`
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_closed_output_still_writes_manifest() -> Result<()> {
        let tree = ContentTree::new()?;
        tree.file("assets/a.json", "{}")?;

        let summary = execute(&tree.context(), &UpdateOptions::default(), &mut ClosedPipe)?;

        assert!(summary.written);
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(tree.manifest_path())?)?;
        assert_eq!(written["files"], serde_json::json!(["assets/a.json"]));
        Ok(())
    }

    #[test]
    fn test_report_written_to_output() -> Result<()> {
        colored::control::set_override(false);
        let tree = ContentTree::new()?;
        tree.file("assets/a.json", "{}")?;

        let mut out = Vec::new();
        execute(&tree.context(), &UpdateOptions::default(), &mut out)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Found 1 directories (including empty ones)"));
        assert!(text.contains("manifest.json not found, creating new one"));
        assert!(text.contains("   - assets/a.json"));
        assert!(text.contains("[FOLDER] assets/"));
        assert!(text.trim_end().ends_with("Done!"));
        Ok(())
    }
}
