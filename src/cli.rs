//! Command-line interface definitions for update-manifest.
//!
//! The CLI definition is shared between the main binary and build tools
//! (like xtask) for man page generation.
//!
//! Note: Field-level documentation is provided via clap attributes, so we
//! allow `missing_docs` for this module to avoid redundant documentation.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for update-manifest.
#[derive(Parser, Debug)]
#[command(
    name = "update-manifest",
    version = crate::VERSION,
    about = "Update the content manifest with every JSON file in the content folder",
    long_about = "Scans the content folder recursively, records every JSON data file and \
                  the folder hierarchy (empty folders included) in manifest.json, and prints \
                  a summary of what was found."
)]
pub struct Cli {
    /// Content folder to scan [default: content]
    #[arg(long, value_name = "DIR")]
    pub content_dir: Option<PathBuf>,

    /// Manifest file name inside the content folder [default: manifest.json]
    #[arg(long, value_name = "NAME")]
    pub manifest_name: Option<String>,

    /// Read settings from a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Scan and report without writing the manifest
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print warnings and the final status
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["update-manifest"]).unwrap();
        assert!(cli.content_dir.is_none());
        assert!(cli.manifest_name.is_none());
        assert!(!cli.dry_run);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_overrides_parse() {
        let cli = Cli::try_parse_from([
            "update-manifest",
            "--content-dir",
            "data",
            "--manifest-name",
            "index.json",
            "-n",
            "-q",
        ])
        .unwrap();
        assert_eq!(cli.content_dir, Some(PathBuf::from("data")));
        assert_eq!(cli.manifest_name.as_deref(), Some("index.json"));
        assert!(cli.dry_run);
        assert!(cli.quiet);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["update-manifest", "-q", "-v"]).is_err());
    }
}
