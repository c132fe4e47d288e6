//! Explicit header detection for shard folders.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{ConsolidateError, Result};
use crate::row::split_row;

/// Reads the header stored in a same-named file inside a shard folder.
///
/// `diagnoses_icd.csv/diagnoses_icd.csv` holds the header in its first line.
/// Returns `None` when the candidate is not a regular file or its first line
/// is empty.
pub fn read_header_candidate(path: &Path) -> Result<Option<Vec<String>>> {
    if !path.is_file() {
        return Ok(None);
    }

    let file = File::open(path).map_err(|e| ConsolidateError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut buf = Vec::new();
    BufReader::new(file)
        .read_until(b'\n', &mut buf)
        .map_err(|e| ConsolidateError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    let end = buf
        .iter()
        .position(|b| *b == b'\n' || *b == b'\r')
        .unwrap_or(buf.len());
    let first_line = String::from_utf8_lossy(&buf[..end]);

    if first_line.is_empty() {
        return Ok(None);
    }

    Ok(Some(split_row(&first_line)))
}
