//! Consolidation of sharded CSV exports into flat CSV files.
//!
//! Some database dump tools split one logical table across a folder of small
//! files, and encode tiny rows into the names of zero-byte files. This crate
//! turns such a folder back into a single CSV.
//!
//! # Features
//!
//! - **Discovery**: List the shard files of a table folder
//! - **Shard Sources**: Read rows from file content or from zero-byte filenames
//! - **Column Sniffing**: Find the widest row across all shards
//! - **Consolidation**: Write one padded CSV per table
//! - **Dispatch**: Decide per table whether to consolidate, skip, or warn
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use flatcsv_core::{TableModule, prepare_output_dirs, run_module};
//!
//! let out_root = Path::new("flat_csv");
//! prepare_output_dirs(out_root)?;
//! let report = run_module(TableModule::Hosp, Path::new("mimic/hosp"), out_root, |_| {})?;
//! ```

mod consolidate;
mod discovery;
mod dispatch;
mod error;
mod header;
mod module;
mod row;
mod sniff;
mod source;

// === Error Types ===
pub use error::{ConsolidateError, Result};

// === Discovery & Sources ===
pub use discovery::list_member_files;
pub use source::{LineRows, ShardRows, ShardSource};

// === Rows & Columns ===
pub use header::read_header_candidate;
pub use row::{pad_row, split_row, synthetic_header};
pub use sniff::sniff_max_cols;

// === Consolidation ===
pub use consolidate::{ConsolidateOutcome, ConsolidatedTable, consolidate_folder};
pub use dispatch::{TableEvent, TableOutcome, TableReport, process_table};

// === Modules ===
pub use module::{
    HOSP_SHARDED_TABLES, ICU_SHARDED_TABLES, ModuleReport, TableModule, prepare_output_dirs,
    run_module,
};
