//! Mapping between logical partial names and files under a partials root.

use std::path::{Component, Path, PathBuf};

/// File extension every partial carries on disk.
pub const PARTIAL_EXTENSION: &str = "hbs";

/// Resolve `name` to `root/<name>.hbs` if that file exists right now.
///
/// `None` is an ordinary outcome (the partial is missing), not an error.
/// Leading slashes are ignored so that a name never escapes `root`.
pub fn resolve_partial_path(root: &Path, name: &str) -> Option<PathBuf> {
    let relative = name.trim_start_matches('/');
    let full = root.join(format!("{}.{}", relative, PARTIAL_EXTENSION));
    if full.is_file() {
        Some(full)
    } else {
        tracing::trace!("Partial '{}' not found at {:?}", name, full);
        None
    }
}

/// Translate a resolved partial path back into its logical name.
///
/// Paths outside `root` fall back to their full display form.
pub fn partial_name_from_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let relative = relative.with_extension("");

    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        relative.display().to_string()
    } else {
        parts.join("/")
    }
}
