//! I/O operations for raw tables and view results.
//!
//! Raw tables are read from JSON; view results are written to an output
//! directory as individual JSON files, one combined JSON file and a
//! markdown summary.

use crate::error::Result;
use crate::markdown;
use crate::result::ViewResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use wmt_scoreboard_core::{load_dataset, Dataset, RawTable};

/// Default output directory path.
pub const OUTPUT_DIR: &str = "scoreboard/output";

/// Raw per-view results, relative to the output directory.
pub const RAW_DIR: &str = "raw";

/// Summary file name.
pub const SUMMARY_FILE: &str = "summary.md";

/// Detailed report file name.
pub const REPORT_FILE: &str = "report.md";

/// Combined results file name.
pub const ALL_RESULTS_FILE: &str = "all_views.json";

/// Ensure output directories exist under `out_dir`.
pub fn ensure_output_dirs(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir.join(RAW_DIR))?;
    Ok(())
}

/// Read raw wide tables from a JSON array.
pub fn read_tables_json(path: impl AsRef<Path>) -> Result<Vec<RawTable>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Read raw tables from JSON and normalize them.
pub fn load_tables_file(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let tables = read_tables_json(path)?;
    let dataset = load_dataset(&tables)?;
    info!(path = %path.display(), observations = dataset.len(), "Loaded tables file");
    Ok(dataset)
}

/// Write view results to a JSON file.
pub fn write_results_json(results: &[ViewResult], path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write an individual result to the raw directory.
pub fn write_raw_result(out_dir: &Path, result: &ViewResult) -> Result<PathBuf> {
    ensure_output_dirs(out_dir)?;
    let filename = out_dir
        .join(RAW_DIR)
        .join(format!("{}.json", result.view_id.replace('/', "_")));
    let json = serde_json::to_string_pretty(result)?;
    fs::write(&filename, json)?;
    Ok(filename)
}

/// Write all outputs (raw JSON, combined JSON, summary and detailed report).
pub fn write_all_outputs(out_dir: &Path, results: &[ViewResult]) -> Result<()> {
    ensure_output_dirs(out_dir)?;

    for result in results {
        write_raw_result(out_dir, result)?;
    }

    write_results_json(results, out_dir.join(ALL_RESULTS_FILE))?;
    fs::write(out_dir.join(SUMMARY_FILE), markdown::generate_summary(results))?;
    fs::write(out_dir.join(REPORT_FILE), markdown::generate_detailed_report(results))?;

    info!(
        out_dir = %out_dir.display(),
        views = results.len(),
        "Wrote score board outputs"
    );
    Ok(())
}

/// Read results from a JSON file.
pub fn read_results_json(path: impl AsRef<Path>) -> Result<Vec<ViewResult>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::result::ViewOutcome;
    use wmt_scoreboard_core::{compute_view, Selection, ViewKind};

    const TABLES: &str = r#"[
        {
            "model": "Mistral Base",
            "columns": {
                "Language Pair": ["en-it", "en-de"],
                "BLEU": [16, 11],
                "ChrF": [48.37, 48.62],
                "COMET": [79, 81]
            }
        }
    ]"#;

    #[test]
    fn test_load_tables_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.json");
        fs::write(&path, TABLES).unwrap();

        let dataset = load_tables_file(&path).unwrap();
        assert_eq!(dataset.len(), 6);
        assert_eq!(dataset.language_pairs(), vec!["en-it", "en-de"]);
    }

    #[test]
    fn test_malformed_tables_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.json");
        fs::write(&path, TABLES.replace("\"COMET\"", "\"TER\"")).unwrap();

        let err = load_tables_file(&path).unwrap_err();
        assert!(matches!(err, ReportError::Malformed(_)));
        assert!(err.to_string().contains("COMET"));
    }

    #[test]
    fn test_write_all_outputs_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = load_dataset(&serde_json::from_str::<Vec<RawTable>>(TABLES).unwrap()).unwrap();
        let results = vec![
            ViewResult::new(
                "page/bar",
                "Bars",
                compute_view(&dataset, &Selection::all(), ViewKind::GroupedBar),
            ),
            ViewResult::new(
                "page/corr",
                "Correlation",
                compute_view(&dataset, &Selection::all(), ViewKind::Correlation),
            ),
        ];

        write_all_outputs(dir.path(), &results).unwrap();

        assert!(dir.path().join(RAW_DIR).join("page_bar.json").exists());
        assert!(dir.path().join(SUMMARY_FILE).exists());
        assert!(dir.path().join(REPORT_FILE).exists());

        let back = read_results_json(dir.path().join(ALL_RESULTS_FILE)).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[0].outcome, results[0].outcome);
        assert!(matches!(back[1].outcome, ViewOutcome::Chart(_)));
    }
}
