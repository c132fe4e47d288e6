//! Shard file discovery for table folders.

use std::path::{Path, PathBuf};

use crate::error::{ConsolidateError, Result};

/// Lists the regular files directly inside a shard folder.
///
/// Subdirectories are skipped, not recursed into. Returns files sorted by
/// filename.
pub fn list_member_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| ConsolidateError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| ConsolidateError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        files.push(path);
    }

    // Sort by filename
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}
