//! Config discovery for runs started without an explicit config path

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List `.json` files directly inside `dir`, sorted by path
pub fn find_config_candidates(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            candidates.push(path.to_path_buf());
        }
    }

    candidates.sort();
    Ok(candidates)
}

/// Pick the single config document in `dir`
///
/// Refuses to choose when there are none or several.
pub fn discover_config(dir: &Path) -> Result<PathBuf> {
    let mut candidates = find_config_candidates(dir)?;
    match candidates.len() {
        0 => Err(Error::NoConfigFound(dir.to_path_buf())),
        1 => {
            let path = candidates.remove(0);
            tracing::info!(path = %path.display(), "discovered config");
            Ok(path)
        }
        _ => Err(Error::AmbiguousConfig {
            dir: dir.to_path_buf(),
            candidates,
        }),
    }
}
