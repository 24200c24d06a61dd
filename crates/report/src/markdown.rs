//! Markdown output generation for score board views.
//!
//! This module renders view results, chart specs and datasets as plain
//! markdown tables, the "table dump" form of a chart.

use crate::result::{ViewOutcome, ViewResult};
use std::fmt::{self, Write};
use wmt_scoreboard_core::{to_wide, ChartSpec, Dataset, Metric};

const MISSING: &str = "n/a";

fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => MISSING.to_string(),
    }
}

fn render(f: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut output = String::new();
    f(&mut output).expect("formatting into a String cannot fail");
    output
}

/// Generate a markdown summary from view results.
pub fn generate_summary(results: &[ViewResult]) -> String {
    render(|output| {
        writeln!(output, "# Score Board Summary")?;
        writeln!(output)?;
        writeln!(output, "Generated: {}", chrono::Utc::now().to_rfc3339())?;
        writeln!(output)?;
        writeln!(output, "## Views")?;
        writeln!(output)?;
        writeln!(output, "| View ID | Title | Kind | Status | Categories | Series |")?;
        writeln!(output, "|---------|-------|------|--------|------------|--------|")?;

        for result in results {
            let (kind, categories, series) = match result.chart() {
                Some(chart) => (
                    chart.kind.to_string(),
                    chart.categories.len().to_string(),
                    chart.series.len().to_string(),
                ),
                None => ("-".to_string(), "0".to_string(), "0".to_string()),
            };
            writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} |",
                result.view_id,
                result.title,
                kind,
                result.status(),
                categories,
                series
            )?;
        }

        writeln!(output)?;
        writeln!(output, "---")?;
        writeln!(output, "Total views: {}", results.len())
    })
}

/// Render one chart as a table: categories down, series across.
pub fn chart_table(chart: &ChartSpec) -> String {
    render(|output| {
        if chart.is_empty() {
            return writeln!(output, "_No data for the current selection._");
        }
        write!(output, "| Category |")?;
        for series in &chart.series {
            write!(output, " {} |", series.name)?;
        }
        writeln!(output)?;
        write!(output, "|----------|")?;
        for _ in &chart.series {
            write!(output, "------|")?;
        }
        writeln!(output)?;

        for (i, category) in chart.categories.iter().enumerate() {
            write!(output, "| {} |", category)?;
            for series in &chart.series {
                write!(output, " {} |", cell(series.values.get(i).copied().flatten()))?;
            }
            writeln!(output)?;
        }

        if let Some(warnings) = chart.metadata.get("warnings").and_then(|w| w.as_array()) {
            for warning in warnings.iter().filter_map(|w| w.as_str()) {
                writeln!(output)?;
                writeln!(output, "> excluded: {}", warning)?;
            }
        }
        Ok(())
    })
}

/// Render a dataset in wide form, one row per model and pair.
pub fn dataset_table(dataset: &Dataset) -> String {
    render(|output| {
        writeln!(output, "| Model | Variant | Language Pair | BLEU | ChrF | COMET |")?;
        writeln!(output, "|-------|---------|---------------|------|------|-------|")?;
        for row in to_wide(dataset) {
            writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} |",
                row.model,
                row.variant,
                row.language_pair,
                cell(row.score(Metric::Bleu)),
                cell(row.score(Metric::ChrF)),
                cell(row.score(Metric::Comet)),
            )?;
        }
        Ok(())
    })
}

/// Generate detailed markdown report with a table per view.
pub fn generate_detailed_report(results: &[ViewResult]) -> String {
    render(|output| {
        writeln!(output, "# Detailed Score Board Report")?;
        writeln!(output)?;
        writeln!(output, "Generated: {}", chrono::Utc::now().to_rfc3339())?;
        writeln!(output)?;

        for result in results {
            writeln!(output, "## {}", result.title)?;
            writeln!(output)?;
            writeln!(output, "**View:** `{}`", result.view_id)?;
            writeln!(output)?;
            match &result.outcome {
                ViewOutcome::Chart(chart) => write!(output, "{}", chart_table(chart))?,
                ViewOutcome::Insufficient { reason } => writeln!(output, "_{}_", reason)?,
            }
            writeln!(output)?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wmt_scoreboard_core::{compute_view, InsufficientDataError, Observation, Selection, ViewKind};

    fn dataset() -> Dataset {
        Dataset::from_observations(vec![
            Observation::new("Mistral Base", "", "en-de", Metric::Bleu, 11.0),
            Observation::new("Mistral Base", "", "en-de", Metric::ChrF, 48.62),
            Observation::new("Mistral Base", "", "en-de", Metric::Comet, 81.0),
            Observation::new("Mistral Model B", "", "en-de", Metric::Bleu, 22.0),
        ])
    }

    #[test]
    fn test_dataset_table_marks_missing_cells() {
        let table = dataset_table(&dataset());
        assert!(table.contains("| Mistral Base |  | en-de | 11.00 | 48.62 | 81.00 |"));
        assert!(table.contains("| Mistral Model B |  | en-de | 22.00 | n/a | n/a |"));
    }

    #[test]
    fn test_chart_table_rows_follow_categories() {
        let chart = compute_view(&dataset(), &Selection::all(), ViewKind::GroupedBar).unwrap();
        let table = chart_table(&chart);
        assert!(table.starts_with("| Category | BLEU | ChrF | COMET |"));
        assert!(table.contains("| Mistral Model B (en-de) | 22.00 | n/a | n/a |"));
    }

    #[test]
    fn test_chart_table_empty_state() {
        let chart = compute_view(
            &dataset(),
            &Selection::all().with_models(["nobody"]),
            ViewKind::GroupedBar,
        )
        .unwrap();
        assert_eq!(chart_table(&chart), "_No data for the current selection._\n");
    }

    #[test]
    fn test_summary_lists_every_view() {
        let ok = ViewResult::new(
            "p/bar",
            "Bars",
            compute_view(&dataset(), &Selection::all(), ViewKind::GroupedBar),
        );
        let insufficient = ViewResult::new(
            "p/corr",
            "Correlation",
            Err(InsufficientDataError::new("correlation", 1, 2)),
        );
        let summary = generate_summary(&[ok, insufficient]);
        assert!(summary.contains("| p/bar | Bars | grouped_bar | ok | 2 | 3 |"));
        assert!(summary.contains("| p/corr | Correlation | - | insufficient | 0 | 0 |"));
        assert!(summary.contains("Total views: 2"));
    }

    #[test]
    fn test_detailed_report_includes_reason() {
        let result = ViewResult::new(
            "p/corr",
            "Correlation",
            Err(InsufficientDataError::new("correlation", 1, 2)),
        );
        let report = generate_detailed_report(&[result]);
        assert!(report.contains("## Correlation"));
        assert!(report.contains("at least 2 required"));
    }
}
