//! Enumerate the partials available under a partials root.

use crate::resolve::{partial_name_from_path, PARTIAL_EXTENSION};
use promptkit_core::{AppError, AppResult};
use std::path::Path;

/// List the logical names of every partial file under `partial_root`, sorted.
///
/// A missing root simply has no partials.
pub fn list_partials(partial_root: &Path) -> AppResult<Vec<String>> {
    if !partial_root.is_dir() {
        tracing::debug!("Partials directory {:?} does not exist", partial_root);
        return Ok(Vec::new());
    }

    let mut names = Vec::new();

    for entry in walkdir::WalkDir::new(partial_root).follow_links(true) {
        let entry = entry.map_err(|e| {
            AppError::Partials(format!("Failed to walk {:?}: {}", partial_root, e))
        })?;
        let path = entry.path();

        if entry.file_type().is_file()
            && path.extension().and_then(|s| s.to_str()) == Some(PARTIAL_EXTENSION)
        {
            names.push(partial_name_from_path(partial_root, path));
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_partials() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("common")).unwrap();
        fs::write(root.join("role-expert.hbs"), "").unwrap();
        fs::write(root.join("common/header.hbs"), "").unwrap();
        fs::write(root.join("notes.md"), "").unwrap();

        let names = list_partials(root).unwrap();
        assert_eq!(names, vec!["common/header", "role-expert"]);
    }

    #[test]
    fn test_missing_root() {
        let temp = TempDir::new().unwrap();
        assert!(list_partials(&temp.path().join("partials")).unwrap().is_empty());
    }
}
