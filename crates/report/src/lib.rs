//! Data-loading and presentation collaborators for the WMT score board.
//!
//! This crate feeds the core pipeline with the built-in WMT 24 biomedical
//! tables and turns its chart specs into files a renderer can consume.
//!
//! # Quick Start
//!
//! ```no_run
//! use wmt_scoreboard_report::run_all_views;
//!
//! let results = run_all_views().unwrap();
//! for result in &results {
//!     println!("{}: {}", result.view_id, result.status());
//! }
//! ```
//!
//! # Modules
//!
//! - [`catalog`] - Built-in result tables
//! - [`pages`] - Named view presets per page
//! - [`result`] - The `ViewResult` struct
//! - [`io`] - Reading tables and writing results
//! - [`markdown`] - Markdown report generation

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod io;
pub mod markdown;
pub mod pages;
pub mod result;

pub use catalog::Source;
pub use error::{ReportError, Result};
pub use pages::{Page, PageView};
pub use result::{ViewOutcome, ViewResult};

use std::path::Path;
use tracing::info;
use wmt_scoreboard_core::{load_dataset, Dataset};

/// Load the dataset of a built-in source.
pub fn load_source(source: Source) -> Result<Dataset> {
    Ok(load_dataset(&source.tables())?)
}

/// Render every page against its built-in source.
pub fn run_all_views() -> Result<Vec<ViewResult>> {
    let mut results = Vec::new();
    for page in Page::ALL {
        let dataset = load_source(page.source())?;
        results.extend(page.render(&dataset));
    }
    info!(views = results.len(), "Rendered all pages");
    Ok(results)
}

/// Render every page and write outputs under `out_dir`.
///
/// Writes `raw/<page>_<view>.json`, `all_views.json`, `summary.md` and
/// `report.md`.
pub fn run_and_write_all(out_dir: &Path) -> Result<Vec<ViewResult>> {
    let results = run_all_views()?;
    io::write_all_outputs(out_dir, &results)?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_all_views_covers_every_page() {
        let results = run_all_views().unwrap();
        assert_eq!(results.len(), 1 + 2 + 6);
        assert!(results.iter().all(|r| r.status() == "ok"));
    }

    #[test]
    fn test_run_and_write_all() {
        let dir = tempfile::tempdir().unwrap();
        let results = run_and_write_all(dir.path()).unwrap();
        let summary = std::fs::read_to_string(dir.path().join(io::SUMMARY_FILE)).unwrap();
        assert!(summary.contains(&format!("Total views: {}", results.len())));
    }
}
