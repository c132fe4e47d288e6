//! Integration tests for the flatten run command.

use std::path::Path;

use tempfile::TempDir;

use flatcsv_cli::commands::run_flatten;
use flatcsv_cli::summary::summary_table;
use flatcsv_core::TableOutcome;

fn write_shards(folder: &Path, shards: &[(&str, &str)]) {
    std::fs::create_dir_all(folder).unwrap();
    for (name, content) in shards {
        std::fs::write(folder.join(name), content).unwrap();
    }
}

/// hosp: one sharded, one flat, one missing, one empty table.
/// icu: one sharded table with an inner header file.
fn mimic_layout() -> TempDir {
    let root = TempDir::new().unwrap();
    let hosp = root.path().join("hosp");
    let icu = root.path().join("icu");

    write_shards(
        &hosp.join("diagnoses_icd.csv"),
        &[
            ("10002428,25797028,2155-07-14,G0378,1,Hospital", ""),
            ("part-0001", "10002429,25797029,,I10,2,Clinic\n"),
        ],
    );
    std::fs::write(hosp.join("hcpcsevents.csv"), "subject_id,hadm_id\n1,2\n").unwrap();
    std::fs::create_dir_all(hosp.join("provider.csv")).unwrap();
    write_shards(
        &icu.join("caregiver.csv"),
        &[
            ("10001", ""),
            ("10002", ""),
            ("caregiver.csv", "caregiver_id\n"),
        ],
    );

    root
}

fn read_normalized(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap().replace("\r\n", "\n")
}

#[test]
fn test_run_flatten_progress_lines() {
    let root = mimic_layout();
    let out_root = root.path().join("flat_csv");
    let mut progress = Vec::new();

    run_flatten(
        &root.path().join("hosp"),
        &root.path().join("icu"),
        &out_root,
        &mut progress,
    )
    .unwrap();

    let text = String::from_utf8(progress)
        .unwrap()
        .replace(&root.path().display().to_string(), "<ROOT>");
    assert_eq!(
        text,
        "\n=== HOSP module ===\n\
         * Consolidating folder: <ROOT>/hosp/diagnoses_icd.csv\n\
         \x20 ✓ Wrote <ROOT>/flat_csv/hosp/diagnoses_icd.csv\n\
         * Found flat file already: <ROOT>/hosp/hcpcsevents.csv (skipping)\n\
         * WARNING: procedures_icd.csv not found in <ROOT>/hosp (skipping)\n\
         * Consolidating folder: <ROOT>/hosp/provider.csv\n\
         \x20 - Skipping empty folder: <ROOT>/hosp/provider.csv\n\
         \n=== ICU module ===\n\
         * Consolidating folder: <ROOT>/icu/caregiver.csv\n\
         \x20 ✓ Wrote <ROOT>/flat_csv/icu/caregiver.csv\n"
    );
}

#[test]
fn test_run_flatten_outputs() {
    let root = mimic_layout();
    let out_root = root.path().join("flat_csv");

    let result = run_flatten(
        &root.path().join("hosp"),
        &root.path().join("icu"),
        &out_root,
        &mut std::io::sink(),
    )
    .unwrap();

    assert_eq!(result.consolidated_count(), 2);
    let hosp_outputs: Vec<_> = std::fs::read_dir(out_root.join("hosp"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(hosp_outputs, vec!["diagnoses_icd.csv"]);

    insta::assert_snapshot!(read_normalized(&out_root.join("hosp").join("diagnoses_icd.csv")), @r"
    col_1,col_2,col_3,col_4,col_5,col_6
    10002428,25797028,2155-07-14,G0378,1,Hospital
    10002429,25797029,,I10,2,Clinic
    ");
    insta::assert_snapshot!(read_normalized(&out_root.join("icu").join("caregiver.csv")), @r"
    caregiver_id
    10001
    10002
    caregiver_id
    ");
}

#[test]
fn test_run_flatten_creates_module_dirs_without_tables() {
    let root = TempDir::new().unwrap();
    let out_root = root.path().join("out");

    let result = run_flatten(
        &root.path().join("missing-hosp"),
        &root.path().join("missing-icu"),
        &out_root,
        &mut std::io::sink(),
    )
    .unwrap();

    assert!(out_root.join("hosp").is_dir());
    assert!(out_root.join("icu").is_dir());
    assert_eq!(result.consolidated_count(), 0);
    assert!(
        result
            .modules
            .iter()
            .flat_map(|m| &m.tables)
            .all(|t| t.outcome == TableOutcome::NotFound)
    );
}

#[test]
fn test_run_flatten_fails_on_unreadable_out_root() {
    let root = TempDir::new().unwrap();
    let blocker = root.path().join("flat_csv");
    std::fs::write(&blocker, "not a directory").unwrap();

    let result = run_flatten(
        &root.path().join("hosp"),
        &root.path().join("icu"),
        &blocker,
        &mut std::io::sink(),
    );

    let error = result.unwrap_err();
    assert!(format!("{error:#}").contains("prepare output root"));
}

#[test]
fn test_run_flatten_stops_at_first_failing_table() {
    let root = mimic_layout();
    let out_root = root.path().join("flat_csv");
    // A directory where the consolidated CSV should go makes the write fail.
    std::fs::create_dir_all(out_root.join("hosp").join("diagnoses_icd.csv")).unwrap();
    let mut progress = Vec::new();

    let result = run_flatten(
        &root.path().join("hosp"),
        &root.path().join("icu"),
        &out_root,
        &mut progress,
    );

    let error = result.unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("consolidate hosp module"), "{message}");
    assert!(message.contains("failed to create output"), "{message}");
    assert!(!out_root.join("icu").join("caregiver.csv").exists());

    let text = String::from_utf8(progress).unwrap();
    assert!(text.ends_with("diagnoses_icd.csv\n"), "{text}");
    assert!(text.contains("* Consolidating folder: "), "{text}");
    assert!(!text.contains("ICU module"), "{text}");
}

#[test]
fn test_summary_table_lists_every_table() {
    let root = mimic_layout();
    let out_root = root.path().join("flat_csv");
    let result = run_flatten(
        &root.path().join("hosp"),
        &root.path().join("icu"),
        &out_root,
        &mut std::io::sink(),
    )
    .unwrap();

    let rendered = summary_table(&result).to_string();

    for table in [
        "diagnoses_icd.csv",
        "hcpcsevents.csv",
        "procedures_icd.csv",
        "provider.csv",
        "caregiver.csv",
    ] {
        assert!(rendered.contains(table), "missing {table} in:\n{rendered}");
    }
    assert!(rendered.contains("TOTAL"));
}
