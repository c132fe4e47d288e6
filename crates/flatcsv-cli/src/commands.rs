use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use flatcsv_core::{TableEvent, TableModule, TableOutcome, prepare_output_dirs, run_module};

use crate::types::RunResult;

/// Consolidates both modules into `out_root`, writing progress lines to `out`.
///
/// Output subfolders for every module are created before any table is
/// touched. The first hard error stops the run.
pub fn run_flatten<W: Write>(
    hosp_dir: &Path,
    icu_dir: &Path,
    out_root: &Path,
    out: &mut W,
) -> Result<RunResult> {
    let start = Instant::now();
    prepare_output_dirs(out_root)
        .with_context(|| format!("prepare output root {}", out_root.display()))?;

    let mut modules = Vec::with_capacity(TableModule::ALL.len());
    for module in TableModule::ALL {
        let base_dir = match module {
            TableModule::Hosp => hosp_dir,
            TableModule::Icu => icu_dir,
        };

        writeln!(out)?;
        writeln!(out, "=== {} module ===", module.name().to_uppercase())?;

        let mut progress: io::Result<()> = Ok(());
        let report = run_module(module, base_dir, out_root, |event| {
            if progress.is_ok() {
                progress = write_table_event(out, event);
            }
        })
        .with_context(|| format!("consolidate {module} module from {}", base_dir.display()))?;
        progress?;

        modules.push(report);
    }

    let result = RunResult {
        out_root: out_root.to_path_buf(),
        modules,
    };
    info!(
        out_root = %out_root.display(),
        consolidated = result.consolidated_count(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );
    Ok(result)
}

/// Writes the human-readable progress lines for one table event.
///
/// The "Consolidating folder" line goes out before any shard is read, so a
/// hard error is preceded by the table it happened in.
pub fn write_table_event<W: Write>(out: &mut W, event: TableEvent<'_>) -> io::Result<()> {
    let report = match event {
        TableEvent::Consolidating { folder, .. } => {
            return writeln!(out, "* Consolidating folder: {}", folder.display());
        }
        TableEvent::Finished(report) => report,
    };
    let source = report.source.display();
    match &report.outcome {
        TableOutcome::Consolidated(table) => {
            writeln!(out, "  ✓ Wrote {}", table.output.display())
        }
        TableOutcome::EmptyFolder => writeln!(out, "  - Skipping empty folder: {source}"),
        TableOutcome::NoRows => writeln!(out, "  - No rows found in: {source}"),
        TableOutcome::AlreadyFlat => {
            writeln!(out, "* Found flat file already: {source} (skipping)")
        }
        TableOutcome::NotFound => writeln!(
            out,
            "* WARNING: {} not found in {} (skipping)",
            report.table,
            report.base_dir.display()
        ),
    }
}
