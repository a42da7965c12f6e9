//! xtask for content-manifest - build automation and tooling
//!
//! This binary provides development tasks like man page generation and a
//! configuration template.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use content_manifest::config::Config;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "xtask", about = "Build automation for content-manifest")]
enum Task {
    /// Generate the man page from the clap definition
    GenerateManPages {
        /// Output directory for man pages (default: ./man)
        #[arg(short, long, default_value = "man")]
        output: PathBuf,
    },

    /// Write a configuration file holding every default value
    ConfigTemplate {
        /// Destination file
        #[arg(short, long, default_value = "update-manifest.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let task = Task::parse();

    match task {
        Task::GenerateManPages { output } => generate_man_pages(&output)?,
        Task::ConfigTemplate { output } => write_config_template(&output)?,
    }

    Ok(())
}

fn generate_man_pages(output_dir: &Path) -> Result<()> {
    println!("Generating man pages...");

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let cmd = content_manifest::cli::Cli::command();

    let man_path = output_dir.join("update-manifest.1");
    let man_file = fs::File::create(&man_path)
        .with_context(|| format!("Failed to create man page: {}", man_path.display()))?;

    clap_mangen::Man::new(cmd).render(&mut std::io::BufWriter::new(man_file))?;

    println!("✓ Generated: {}", man_path.display());
    println!("\nTo view the man page:");
    println!("  man {}", man_path.display());

    Ok(())
}

fn write_config_template(output: &Path) -> Result<()> {
    Config::default()
        .save(output)
        .with_context(|| format!("Failed to write config template: {}", output.display()))?;

    println!("✓ Generated: {}", output.display());
    Ok(())
}
