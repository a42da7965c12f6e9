//! Human-readable summary of a manifest run.
//!
//! The report goes to stdout (any [`Write`] in tests), separate from the
//! `tracing` diagnostics on stderr.

use crate::manifest::{LoadStatus, Manifest};
use crate::output::Verbosity;
use crate::structure::FolderTree;
use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;

/// Indentation per nesting level in the structure rendering
const INDENT: &str = "   ";

/// Render the folder tree, one `[FOLDER] name/` line per folder.
///
/// Pre-order, children indented one level below their parent. Empty folders
/// print as a bare line.
///
/// ```text
/// [FOLDER] assets/
///    [FOLDER] sub/
/// [FOLDER] graphs/
///    [FOLDER] empty/
/// ```
#[must_use]
pub fn render_structure(tree: &FolderTree) -> String {
    let mut output = String::new();
    render_level(&mut output, tree, 0);
    output
}

/// Recursively render one level of the tree.
fn render_level(output: &mut String, tree: &FolderTree, depth: usize) {
    for (name, child) in tree {
        output.push_str(&INDENT.repeat(depth));
        output.push_str("[FOLDER] ");
        output.push_str(name);
        output.push_str("/\n");

        if !child.is_empty() {
            render_level(output, child, depth + 1);
        }
    }
}

/// Writes the progress and summary lines of one run.
pub struct Reporter<'a, W: Write> {
    /// Destination of the report
    out: &'a mut W,
    /// Quiet mode keeps only warnings and the final status
    verbosity: Verbosity,
}

impl<'a, W: Write> Reporter<'a, W> {
    /// Create a reporter writing to `out`
    pub fn new(out: &'a mut W, verbosity: Verbosity) -> Self {
        Self { out, verbosity }
    }

    /// Whether informational lines are printed
    fn chatty(&self) -> bool {
        self.verbosity != Verbosity::Quiet
    }

    /// Announce the scan
    ///
    /// # Errors
    /// Returns an error if writing to the output fails.
    pub fn scan_started(&mut self, root: &Path) -> io::Result<()> {
        if self.chatty() {
            writeln!(self.out, "Scanning {} for data files...\n", root.display())?;
        }
        Ok(())
    }

    /// Counts and the diagnostic list of directories, followed by a blank line
    ///
    /// # Errors
    /// Returns an error if writing to the output fails.
    pub fn scan_results(&mut self, directories: &[String], files: &[String]) -> io::Result<()> {
        if !self.chatty() {
            return Ok(());
        }

        writeln!(
            self.out,
            "Found {} directories (including empty ones)",
            directories.len()
        )?;
        writeln!(self.out, "Found {} data file(s)", files.len())?;

        if !directories.is_empty() {
            writeln!(self.out, "\n{}", "Directories found:".bold())?;
            for dir in directories {
                writeln!(self.out, "{INDENT}- {dir}")?;
            }
        }
        writeln!(self.out)
    }

    /// Whether the manifest was loaded or is being created
    ///
    /// # Errors
    /// Returns an error if writing to the output fails.
    pub fn manifest_status(&mut self, status: LoadStatus, path: &Path) -> io::Result<()> {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        match status {
            LoadStatus::Loaded if self.chatty() => {
                writeln!(self.out, "Loaded existing {name}")?;
            }
            LoadStatus::Loaded => {}
            LoadStatus::Created => {
                writeln!(
                    self.out,
                    "{}",
                    format!("WARNING: {name} not found, creating new one")
                        .yellow()
                        .bold()
                )?;
            }
        }

        if self.chatty() {
            writeln!(
                self.out,
                "Building folder structure from directories and file paths..."
            )?;
        }
        Ok(())
    }

    /// Outcome of the write step
    ///
    /// # Errors
    /// Returns an error if writing to the output fails.
    pub fn written(&mut self, dry_run: bool) -> io::Result<()> {
        if dry_run {
            writeln!(
                self.out,
                "{}\n",
                "Dry run: manifest not written".yellow().bold()
            )
        } else {
            writeln!(
                self.out,
                "{}\n",
                "SUCCESS: Manifest updated successfully!".green()
            )
        }
    }

    /// Version, date, file list and folder tree of the written manifest
    ///
    /// # Errors
    /// Returns an error if writing to the output fails.
    pub fn summary(&mut self, manifest: &Manifest) -> io::Result<()> {
        if self.chatty() {
            writeln!(self.out, "{}", "Manifest Summary:".bold())?;
            writeln!(self.out, "{INDENT}Version: {}", manifest.version)?;
            writeln!(self.out, "{INDENT}Generated: {}", manifest.generated)?;
            writeln!(self.out, "{INDENT}Files: {}\n", manifest.files.len())?;
        }

        if manifest.files.is_empty() {
            writeln!(
                self.out,
                "{}",
                "WARNING: No data files found in content folder".yellow().bold()
            )?;
            if self.chatty() {
                writeln!(
                    self.out,
                    "{INDENT}Add JSON files to content subfolders and run this again"
                )?;
            }
        } else if self.chatty() {
            writeln!(self.out, "{}", "Files in manifest:".bold())?;
            for file in &manifest.files {
                writeln!(self.out, "{INDENT}- {file}")?;
            }
        }

        if self.chatty() && !manifest.structure.is_empty() {
            writeln!(self.out, "\n{}", "Folder structure:".bold())?;
            write!(self.out, "{}", render_structure(&manifest.structure))?;
        }
        Ok(())
    }

    /// Closing line
    ///
    /// # Errors
    /// Returns an error if writing to the output fails.
    pub fn done(&mut self) -> io::Result<()> {
        if self.chatty() {
            writeln!(self.out, "\nDone!")?;
        }
        Ok(())
    }
}
