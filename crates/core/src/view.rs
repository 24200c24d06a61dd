// Copyright 2025 WMT Scoreboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! View composer.
//!
//! Turns filtered observations into data-only [`ChartSpec`]s. A chart spec
//! is `{kind, title, categories, series, metadata}`; `null` values in a
//! series mean the cell is absent or undefined, never zero.
//!
//! | kind          | categories          | series                  |
//! |---------------|---------------------|-------------------------|
//! | `grouped_bar` | display keys        | one per metric          |
//! | `metric_bar`  | models              | one per variant / pair  |
//! | `box_plot`    | models              | one per variant / pair  |
//! | `scatter`     | display keys        | BLEU, ChrF, COMET       |
//! | `correlation` | metrics             | one row per metric      |

use crate::error::InsufficientDataError;
use crate::observation::{distinct, Dataset, Metric};
use crate::reshape::{to_long, to_wide};
use crate::selection::{apply, Selection};
use crate::stats::{pearson, FiveNumber};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Series name for rows with neither variant nor language pair.
pub const NO_CONTEXT: &str = "(none)";

/// Chart kinds the composer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    /// Display key on x, score on y, one series per metric.
    GroupedBar,
    /// Model on x, one metric on y, one series per language pair.
    MetricBar,
    /// Model on x, one metric on y, colored by language pair.
    BoxPlot,
    /// BLEU on x, ChrF on y, COMET as size, colored by model.
    Scatter,
    /// Pearson correlation between the three metrics.
    Correlation,
}

impl ViewKind {
    /// All view kinds.
    pub const ALL: [ViewKind; 5] = [
        ViewKind::GroupedBar,
        ViewKind::MetricBar,
        ViewKind::BoxPlot,
        ViewKind::Scatter,
        ViewKind::Correlation,
    ];

    /// Stable snake_case name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GroupedBar => "grouped_bar",
            Self::MetricBar => "metric_bar",
            Self::BoxPlot => "box_plot",
            Self::Scatter => "scatter",
            Self::Correlation => "correlation",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.name() == normalized)
            .ok_or_else(|| format!("unknown view kind: {}", s))
    }
}

/// Named column of values aligned with the chart categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend entry.
    pub name: String,
    /// One value per category; `None` when absent or undefined.
    pub values: Vec<Option<f64>>,
}

/// Renderer-agnostic chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Chart kind.
    pub kind: ViewKind,
    /// Chart title.
    pub title: String,
    /// Categorical axis labels.
    pub categories: Vec<String>,
    /// Value series aligned with `categories`.
    pub series: Vec<Series>,
    /// Axis names, color keys, warnings and other per-kind details.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl ChartSpec {
    fn new(kind: ViewKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            categories: Vec::new(),
            series: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Replace the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Whether the chart has nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Look up a series by name.
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    fn meta(mut self, key: &str, value: Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    fn finish(self, dataset: &Dataset) -> Self {
        let placeholders = dataset.iter().filter(|o| o.is_placeholder()).count();
        let empty = self.is_empty();
        debug!(
            kind = %self.kind,
            categories = self.categories.len(),
            series = self.series.len(),
            placeholders,
            "Composed view"
        );
        self.meta("placeholder_scores", json!(placeholders))
            .meta("empty", json!(empty))
    }
}

/// Filter `dataset` with `selection` and compose the requested chart.
///
/// Bar and box views never fail; an empty selection yields an empty chart.
/// Scatter and correlation need complete rows and report
/// [`InsufficientDataError`] otherwise.
pub fn compute_view(
    dataset: &Dataset,
    selection: &Selection,
    kind: ViewKind,
) -> Result<ChartSpec, InsufficientDataError> {
    match kind {
        ViewKind::GroupedBar => Ok(grouped_bar(&apply(dataset, selection))),
        ViewKind::MetricBar => {
            let metric = selection.metric.unwrap_or(Metric::Bleu);
            Ok(metric_bar(&apply(dataset, &selection.clone().with_metric(metric)), metric))
        }
        ViewKind::BoxPlot => {
            let metric = selection.metric.unwrap_or(Metric::Bleu);
            Ok(box_plot(&apply(dataset, &selection.clone().with_metric(metric)), metric))
        }
        ViewKind::Scatter => scatter(&apply(dataset, &selection.without_metric())),
        ViewKind::Correlation => correlation(&apply(dataset, &selection.without_metric())),
    }
}

/// Side-by-side metric comparison per display key.
pub fn grouped_bar(dataset: &Dataset) -> ChartSpec {
    let long = to_long(dataset);
    let categories = distinct(long.iter().map(|r| r.display_key.as_str()));
    let scores: HashMap<(&str, Metric), f64> = long
        .iter()
        .map(|r| ((r.display_key.as_str(), r.metric), r.score))
        .collect();

    let series = Metric::ALL
        .into_iter()
        .filter(|m| long.iter().any(|r| r.metric == *m))
        .map(|metric| Series {
            name: metric.to_string(),
            values: categories
                .iter()
                .map(|c| scores.get(&(c.as_str(), metric)).copied())
                .collect(),
        })
        .collect();

    let mut spec = ChartSpec::new(ViewKind::GroupedBar, "Model Performance Metrics")
        .meta("x_label", json!("Model"))
        .meta("y_label", json!("Score"))
        .meta("color", json!("Metric"));
    spec.categories = categories;
    spec.series = series;
    spec.finish(dataset)
}

// Models as categories, one series per row context, for one metric.
fn by_model_and_context(dataset: &Dataset, metric: Metric) -> (Vec<String>, Vec<Series>) {
    let rows: Vec<_> = dataset.iter().filter(|o| o.metric == metric).collect();
    let models = distinct(rows.iter().map(|o| o.model.as_str()));
    let contexts: Vec<String> = {
        let raw: Vec<String> = rows.iter().map(|o| o.context()).collect();
        distinct(raw.iter().map(String::as_str))
    };

    let series = contexts
        .iter()
        .map(|ctx| Series {
            name: if ctx.is_empty() { NO_CONTEXT.to_string() } else { ctx.clone() },
            values: models
                .iter()
                .map(|model| {
                    rows.iter()
                        .find(|o| o.model == *model && o.context() == *ctx)
                        .map(|o| o.score)
                })
                .collect(),
        })
        .collect();
    (models, series)
}

/// One metric per model, one bar per language pair.
pub fn metric_bar(dataset: &Dataset, metric: Metric) -> ChartSpec {
    let (categories, series) = by_model_and_context(dataset, metric);
    let mut spec = ChartSpec::new(
        ViewKind::MetricBar,
        format!("{} Scores by Model and Language Pair", metric),
    )
    .meta("x_label", json!("Model"))
    .meta("y_label", json!(metric))
    .meta("color", json!("Language Pair"));
    spec.categories = categories;
    spec.series = series;
    spec.finish(dataset)
}

/// Score spread of one metric per model, colored by language pair.
pub fn box_plot(dataset: &Dataset, metric: Metric) -> ChartSpec {
    let (categories, series) = by_model_and_context(dataset, metric);

    let mut stats = serde_json::Map::new();
    for model in &categories {
        let values: Vec<f64> = dataset
            .iter()
            .filter(|o| o.metric == metric && o.model == *model)
            .map(|o| o.score)
            .collect();
        if let Some(summary) = FiveNumber::of(&values) {
            stats.insert(model.clone(), json!(summary));
        }
    }

    let mut spec = ChartSpec::new(
        ViewKind::BoxPlot,
        format!("Box Plot of {} by Model and Language Pair", metric),
    )
    .meta("x_label", json!("Model"))
    .meta("y_label", json!(metric))
    .meta("color", json!("Language Pair"))
    .meta("box_stats", Value::Object(stats));
    spec.categories = categories;
    spec.series = series;
    spec.finish(dataset)
}

/// BLEU against ChrF per row, COMET as marker size.
///
/// Rows missing any metric are left out and listed under
/// `metadata.warnings`. Zero scores are plotted like any other value.
pub fn scatter(dataset: &Dataset) -> Result<ChartSpec, InsufficientDataError> {
    let mut categories = Vec::new();
    let mut colors = Vec::new();
    let mut pairs = Vec::new();
    let mut columns: [Vec<Option<f64>>; 3] = Default::default();
    let mut warnings = Vec::new();

    for row in to_wide(dataset) {
        match row.complete() {
            Some(scores) => {
                categories.push(row.display_key());
                colors.push(row.model.clone());
                pairs.push(row.language_pair.clone());
                for (column, score) in columns.iter_mut().zip(scores) {
                    column.push(Some(score));
                }
            }
            None => {
                let missing: Vec<String> = row.missing().iter().map(Metric::to_string).collect();
                warn!(
                    row = %row.display_key(),
                    missing = %missing.join(","),
                    "Excluding incomplete row from scatter"
                );
                warnings.push(format!("{}: missing {}", row.display_key(), missing.join(", ")));
            }
        }
    }

    if categories.is_empty() {
        return Err(InsufficientDataError::new(ViewKind::Scatter.name(), 0, 1));
    }

    let mut spec = ChartSpec::new(ViewKind::Scatter, "BLEU vs ChrF Scores Colored by Model")
        .meta("x", json!(Metric::Bleu))
        .meta("y", json!(Metric::ChrF))
        .meta("size", json!(Metric::Comet))
        .meta("color", json!(colors))
        .meta("hover", json!(pairs))
        .meta("warnings", json!(warnings));
    spec.categories = categories;
    spec.series = Metric::ALL
        .into_iter()
        .zip(columns)
        .map(|(metric, values)| Series {
            name: metric.to_string(),
            values,
        })
        .collect();
    Ok(spec.finish(dataset))
}

/// Pearson correlation matrix over complete wide rows.
///
/// Diagonal entries are always 1.0. Off-diagonal entries involving a
/// zero-variance metric are `null`.
pub fn correlation(dataset: &Dataset) -> Result<ChartSpec, InsufficientDataError> {
    let complete: Vec<[f64; 3]> = to_wide(dataset)
        .iter()
        .filter_map(|r| r.complete())
        .collect();
    if complete.len() < 2 {
        return Err(InsufficientDataError::new(
            ViewKind::Correlation.name(),
            complete.len(),
            2,
        ));
    }

    let column = |i: usize| -> Vec<f64> { complete.iter().map(|r| r[i]).collect() };
    let columns = [column(0), column(1), column(2)];

    let mut undefined = 0usize;
    let series: Vec<Series> = Metric::ALL
        .into_iter()
        .map(|row| Series {
            name: row.to_string(),
            values: Metric::ALL
                .into_iter()
                .map(|col| {
                    if row == col {
                        return Some(1.0);
                    }
                    let r = pearson(&columns[row.index()], &columns[col.index()]);
                    if r.is_none() {
                        undefined += 1;
                    }
                    r
                })
                .collect(),
        })
        .collect();

    let mut spec = ChartSpec::new(ViewKind::Correlation, "Correlation Matrix of Performance Metrics")
        .meta("rows", json!(complete.len()))
        .meta("undefined_cells", json!(undefined));
    spec.categories = Metric::ALL.iter().map(Metric::to_string).collect();
    spec.series = series;
    Ok(spec.finish(dataset))
}
