use anyhow::Result;
use colored::Colorize;
use std::collections::HashSet;

/// Detects configuration keys that are not recognized
pub struct ConfigValidator {
    /// Set of valid configuration fields
    known_fields: HashSet<String>,
}

impl ConfigValidator {
    /// Create a new validator with known configuration fields
    #[must_use]
    pub fn new() -> Self {
        let known_fields = [
            "scan",
            "scan.content_dir",
            "scan.manifest_file",
            "scan.extensions",
            "scan.follow_symlinks",
            "manifest",
            "manifest.default_version",
        ]
        .iter()
        .map(ToString::to_string)
        .collect();

        Self { known_fields }
    }

    /// Validate configuration text and warn about unknown fields
    ///
    /// Returns the unknown field paths that were reported.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML
    pub fn validate_config_str(&self, content: &str) -> Result<Vec<String>> {
        let parsed: toml::Value = toml::from_str(content)?;

        let mut unknown_fields = Vec::new();
        self.check_table(&parsed, "", &mut unknown_fields);

        if !unknown_fields.is_empty() {
            eprintln!("{}", "Configuration warnings:".yellow().bold());
            for field in &unknown_fields {
                eprintln!("  Unknown configuration field: {}", field.yellow());
            }
            eprintln!();
        }

        Ok(unknown_fields)
    }

    /// Recursively checks a TOML table for unknown fields
    ///
    /// # Arguments
    ///
    /// * `table` - The TOML value to validate (expected to be a table)
    /// * `prefix` - The current path prefix (e.g., "scan")
    /// * `unknown` - Vector to collect unknown field paths
    fn check_table(&self, table: &toml::Value, prefix: &str, unknown: &mut Vec<String>) {
        if let toml::Value::Table(map) = table {
            for (key, value) in map {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };

                if !self.known_fields.contains(&full_key) {
                    unknown.push(full_key);
                } else if let toml::Value::Table(_) = value {
                    self.check_table(value, &full_key, unknown);
                }
            }
        }
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_fields_pass() -> Result<()> {
        let unknown = ConfigValidator::new().validate_config_str(
            "[scan]\ncontent_dir = \"content\"\nextensions = [\"json\"]\n\n[manifest]\ndefault_version = \"2.0.0\"\n",
        )?;
        assert!(unknown.is_empty());
        Ok(())
    }

    #[test]
    fn test_unknown_fields_reported() -> Result<()> {
        let unknown = ConfigValidator::new().validate_config_str(
            "[scan]\nignore = [\"*.tmp\"]\n\n[output]\ncolor = false\n",
        )?;
        assert_eq!(unknown, vec!["output".to_string(), "scan.ignore".to_string()]);
        Ok(())
    }
}
