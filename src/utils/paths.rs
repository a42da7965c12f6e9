use std::path::{Component, Path};

/// Converts `path` into a manifest path string relative to `base`.
///
/// Components are joined with `/` whatever the host separator is. Returns
/// `None` for the base itself and for paths outside of it.
#[must_use]
pub fn to_manifest_path(path: &Path, base: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;

    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Splits a manifest path into its `/`-separated segments.
pub fn segments(manifest_path: &str) -> impl Iterator<Item = &str> {
    manifest_path.split('/')
}
