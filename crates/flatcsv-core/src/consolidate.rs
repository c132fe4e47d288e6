//! Consolidation of a shard folder into one flat CSV.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use tracing::{debug, info};

use crate::discovery::list_member_files;
use crate::error::{ConsolidateError, Result};
use crate::row::{pad_row, synthetic_header};
use crate::sniff::sniff_max_cols;
use crate::source::ShardSource;

/// A consolidated CSV that was written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedTable {
    /// Path of the written CSV.
    pub output: PathBuf,
    /// Number of shard files read.
    pub shards: usize,
    /// Number of data rows written (header excluded).
    pub rows: usize,
    /// Column count of every row.
    pub columns: usize,
}

/// What happened when a shard folder was consolidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsolidateOutcome {
    Written(ConsolidatedTable),
    /// The folder held no regular files; nothing was written.
    EmptyFolder,
    /// No shard produced a row; nothing was written.
    NoRows,
}

/// Consolidates every shard in `folder` into a single CSV at `out_csv`.
///
/// The first row is `header` when given, padded to the table width,
/// otherwise `col_1..col_N`. Each shard row follows in filename order,
/// right-padded with empty fields to the widest row in the folder. An
/// existing `out_csv` is overwritten.
pub fn consolidate_folder(
    folder: &Path,
    out_csv: &Path,
    header: Option<&[String]>,
) -> Result<ConsolidateOutcome> {
    let files = list_member_files(folder)?;
    if files.is_empty() {
        info!(folder = %folder.display(), "skipping empty folder");
        return Ok(ConsolidateOutcome::EmptyFolder);
    }

    let sources = files
        .iter()
        .map(|path| ShardSource::open(path))
        .collect::<Result<Vec<_>>>()?;

    let max_cols = sniff_max_cols(&sources)?;
    if max_cols == 0 {
        info!(folder = %folder.display(), shards = sources.len(), "no rows found");
        return Ok(ConsolidateOutcome::NoRows);
    }
    debug!(
        folder = %folder.display(),
        shards = sources.len(),
        columns = max_cols,
        "sniffed column count"
    );

    if let Some(parent) = out_csv.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConsolidateError::DirectoryCreate {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let file = File::create(out_csv).map_err(|e| ConsolidateError::OutputCreate {
        path: out_csv.to_path_buf(),
        source: e,
    })?;
    // A caller-supplied header may be wider than the data.
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .flexible(true)
        .from_writer(file);
    let write_err = |e: csv::Error| ConsolidateError::CsvWrite {
        path: out_csv.to_path_buf(),
        source: e,
    };

    let header_row = match header {
        Some(names) => pad_row(names.to_vec(), max_cols),
        None => synthetic_header(max_cols),
    };
    writer.write_record(&header_row).map_err(write_err)?;

    let mut rows = 0usize;
    for source in &sources {
        debug!(shard = %source.path().display(), kind = source.kind(), "streaming shard");
        for row in source.rows()? {
            writer
                .write_record(&pad_row(row?, max_cols))
                .map_err(write_err)?;
            rows += 1;
        }
    }

    writer.flush().map_err(|e| ConsolidateError::OutputFlush {
        path: out_csv.to_path_buf(),
        source: e,
    })?;

    info!(
        output = %out_csv.display(),
        shards = sources.len(),
        rows,
        columns = max_cols,
        "wrote consolidated table"
    );

    Ok(ConsolidateOutcome::Written(ConsolidatedTable {
        output: out_csv.to_path_buf(),
        shards: sources.len(),
        rows,
        columns: max_cols,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn shard_folder(dir: &TempDir, name: &str, shards: &[(&str, &str)]) -> PathBuf {
        let folder = dir.path().join(name);
        std::fs::create_dir_all(&folder).unwrap();
        for (file, content) in shards {
            std::fs::write(folder.join(file), content).unwrap();
        }
        folder
    }

    #[test]
    fn test_consolidate_pads_short_rows() {
        let dir = TempDir::new().unwrap();
        let folder = shard_folder(&dir, "t.csv", &[("part-0", "a,b,c\nd\n")]);
        let out = dir.path().join("out").join("t.csv");

        let outcome = consolidate_folder(&folder, &out, None).unwrap();

        assert_eq!(
            outcome,
            ConsolidateOutcome::Written(ConsolidatedTable {
                output: out.clone(),
                shards: 1,
                rows: 2,
                columns: 3,
            })
        );
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text, "col_1,col_2,col_3\r\na,b,c\r\nd,,\r\n");
    }

    #[test]
    fn test_consolidate_explicit_header_padded() {
        let dir = TempDir::new().unwrap();
        let folder = shard_folder(&dir, "t.csv", &[("part-0", "1,2,3\n")]);
        let out = dir.path().join("t.csv.out");
        let header = vec!["id".to_string(), "name".to_string()];

        consolidate_folder(&folder, &out, Some(&header)).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text, "id,name,\r\n1,2,3\r\n");
    }

    #[test]
    fn test_consolidate_empty_folder_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let folder = shard_folder(&dir, "t.csv", &[]);
        let out = dir.path().join("out").join("t.csv");

        let outcome = consolidate_folder(&folder, &out, None).unwrap();

        assert_eq!(outcome, ConsolidateOutcome::EmptyFolder);
        assert!(!out.exists());
        assert!(!out.parent().unwrap().exists());
    }

    #[test]
    fn test_consolidate_blank_shards_write_nothing() {
        let dir = TempDir::new().unwrap();
        let folder = shard_folder(&dir, "t.csv", &[("part-0", "\n\n"), ("part-1", "\r\n")]);
        let out = dir.path().join("t.out.csv");

        let outcome = consolidate_folder(&folder, &out, None).unwrap();

        assert_eq!(outcome, ConsolidateOutcome::NoRows);
        assert!(!out.exists());
    }

    #[test]
    fn test_consolidate_quotes_only_when_needed() {
        let dir = TempDir::new().unwrap();
        let folder = shard_folder(&dir, "t.csv", &[("part-0", "say \"hi\",ok\n")]);
        let out = dir.path().join("t.out.csv");

        consolidate_folder(&folder, &out, None).unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text, "col_1,col_2\r\n\"say \"\"hi\"\"\",ok\r\n");
    }

    #[test]
    fn test_consolidate_overwrites_existing_output() {
        let dir = TempDir::new().unwrap();
        let folder = shard_folder(&dir, "t.csv", &[("part-0", "x\n")]);
        let out = dir.path().join("t.out.csv");
        std::fs::write(&out, "stale,stale,stale\nmore\nlines\n").unwrap();

        consolidate_folder(&folder, &out, None).unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "col_1\r\nx\r\n");
    }
}
