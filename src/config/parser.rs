use super::Config;
use anyhow::{Context, Result};

pub fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse TOML config")?;

    // Validation errors are returned directly without wrapping
    validate_config(&config)?;
    Ok(config)
}

/// Checks values that deserialize fine but cannot drive a scan.
///
/// # Errors
///
/// Returns an error describing the first invalid value.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.scan.extensions.is_empty() {
        anyhow::bail!("At least one data file extension is required");
    }

    for ext in &config.scan.extensions {
        if ext.is_empty() || ext.contains('.') {
            anyhow::bail!("Invalid data file extension {ext:?}: give it without dots, e.g. \"json\"");
        }
    }

    let name = config.scan.manifest_file.as_str();
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        anyhow::bail!("Manifest file must be a plain file name, got {name:?}");
    }

    if config.manifest.default_version.trim().is_empty() {
        anyhow::bail!("Default manifest version cannot be empty");
    }

    Ok(())
}
