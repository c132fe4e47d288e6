use std::path::PathBuf;

use flatcsv_core::{ModuleReport, TableOutcome};

#[derive(Debug)]
pub struct RunResult {
    pub out_root: PathBuf,
    pub modules: Vec<ModuleReport>,
}

impl RunResult {
    /// Number of tables written to the output root.
    pub fn consolidated_count(&self) -> usize {
        self.modules
            .iter()
            .flat_map(|module| &module.tables)
            .filter(|table| matches!(table.outcome, TableOutcome::Consolidated(_)))
            .count()
    }
}
