//! Per-table dispatch: consolidate, skip, or warn.

use std::path::{Path, PathBuf};

use tracing::{info, info_span, warn};

use crate::consolidate::{ConsolidateOutcome, ConsolidatedTable, consolidate_folder};
use crate::error::Result;
use crate::header::read_header_candidate;

/// Result of dispatching one table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
    /// Sharded folder consolidated into a flat CSV.
    Consolidated(ConsolidatedTable),
    /// Sharded folder with no regular files.
    EmptyFolder,
    /// Sharded folder whose shards produced no rows.
    NoRows,
    /// Table already stored as a single file; left untouched.
    AlreadyFlat,
    /// Neither a folder nor a file exists for the table.
    NotFound,
}

impl TableOutcome {
    /// Short status label for summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Consolidated(_) => "consolidated",
            Self::EmptyFolder => "empty folder",
            Self::NoRows => "no rows",
            Self::AlreadyFlat => "already flat",
            Self::NotFound => "not found",
        }
    }
}

impl From<ConsolidateOutcome> for TableOutcome {
    fn from(outcome: ConsolidateOutcome) -> Self {
        match outcome {
            ConsolidateOutcome::Written(table) => Self::Consolidated(table),
            ConsolidateOutcome::EmptyFolder => Self::EmptyFolder,
            ConsolidateOutcome::NoRows => Self::NoRows,
        }
    }
}

/// Outcome of one table together with where it was looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub table: String,
    pub base_dir: PathBuf,
    /// `base_dir/table`, whether it turned out to be a folder, a file, or absent.
    pub source: PathBuf,
    pub outcome: TableOutcome,
}

/// Progress of one table inside a module run.
#[derive(Debug, Clone, Copy)]
pub enum TableEvent<'a> {
    /// A sharded folder is about to be consolidated.
    Consolidating { table: &'a str, folder: &'a Path },
    /// The table is done, whatever the outcome.
    Finished(&'a TableReport),
}

/// Dispatches `table_name` found under `base_dir`.
///
/// A folder is consolidated into `out_dir/table_name`, using the first line of
/// `base_dir/table_name/table_name` as header when that file exists. A plain
/// file is already flat and is left alone. Anything else is reported missing.
pub fn process_table(base_dir: &Path, table_name: &str, out_dir: &Path) -> Result<TableReport> {
    let span = info_span!("table", table = %table_name);
    let _guard = span.enter();

    let source = base_dir.join(table_name);
    let out_csv = out_dir.join(table_name);

    let outcome: TableOutcome = if source.is_dir() {
        info!(folder = %source.display(), "consolidating folder");
        let header = read_header_candidate(&source.join(table_name))?;
        if let Some(names) = &header {
            info!(columns = names.len(), "using header from inner table file");
        }
        consolidate_folder(&source, &out_csv, header.as_deref())?.into()
    } else if source.is_file() {
        info!(file = %source.display(), "found flat file already, skipping");
        TableOutcome::AlreadyFlat
    } else {
        warn!(base_dir = %base_dir.display(), "table not found, skipping");
        TableOutcome::NotFound
    };

    Ok(TableReport {
        table: table_name.to_string(),
        base_dir: base_dir.to_path_buf(),
        source,
        outcome,
    })
}
