//! Fixed table modules and the per-module run loop.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info_span;

use crate::dispatch::{TableEvent, TableReport, process_table};
use crate::error::{ConsolidateError, Result};

/// Sharded tables of the `hosp` module.
pub const HOSP_SHARDED_TABLES: &[&str] = &[
    "diagnoses_icd.csv",
    "hcpcsevents.csv",
    "procedures_icd.csv",
    "provider.csv",
];

/// Sharded tables of the `icu` module.
pub const ICU_SHARDED_TABLES: &[&str] = &["caregiver.csv"];

/// A fixed group of tables, processed into its own output subfolder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableModule {
    Hosp,
    Icu,
}

impl TableModule {
    /// Modules in processing order.
    pub const ALL: [TableModule; 2] = [TableModule::Hosp, TableModule::Icu];

    /// Lowercase name, also the output subfolder name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Hosp => "hosp",
            Self::Icu => "icu",
        }
    }

    pub fn sharded_tables(self) -> &'static [&'static str] {
        match self {
            Self::Hosp => HOSP_SHARDED_TABLES,
            Self::Icu => ICU_SHARDED_TABLES,
        }
    }

    /// Output subfolder for this module under `out_root`.
    pub fn output_dir(self, out_root: &Path) -> PathBuf {
        out_root.join(self.name())
    }
}

impl fmt::Display for TableModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything one module run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReport {
    pub module: TableModule,
    pub base_dir: PathBuf,
    pub output_dir: PathBuf,
    pub tables: Vec<TableReport>,
}

/// Creates the output subfolder of every module under `out_root`.
pub fn prepare_output_dirs(out_root: &Path) -> Result<()> {
    for module in TableModule::ALL {
        create_dir(&module.output_dir(out_root))?;
    }
    Ok(())
}

/// Dispatches every sharded table of `module` found under `base_dir`.
///
/// Tables are processed in their fixed order. `on_event` hears about a
/// sharded folder before it is consolidated, and about every table once it is
/// done. The first hard error aborts the module.
pub fn run_module<F>(
    module: TableModule,
    base_dir: &Path,
    out_root: &Path,
    mut on_event: F,
) -> Result<ModuleReport>
where
    F: FnMut(TableEvent<'_>),
{
    let span = info_span!("module", module = %module, base_dir = %base_dir.display());
    let _guard = span.enter();

    let output_dir = module.output_dir(out_root);
    create_dir(&output_dir)?;

    let mut tables = Vec::with_capacity(module.sharded_tables().len());
    for &table in module.sharded_tables() {
        let folder = base_dir.join(table);
        if folder.is_dir() {
            on_event(TableEvent::Consolidating {
                table,
                folder: &folder,
            });
        }
        let report = process_table(base_dir, table, &output_dir)?;
        on_event(TableEvent::Finished(&report));
        tables.push(report);
    }

    Ok(ModuleReport {
        module,
        base_dir: base_dir.to_path_buf(),
        output_dir,
        tables,
    })
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| ConsolidateError::DirectoryCreate {
        path: path.to_path_buf(),
        source: e,
    })
}
