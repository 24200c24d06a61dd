//! View result types.
//!
//! A [`ViewResult`] is one composed view of a page, stamped with the time it
//! was produced. Insufficient data is an outcome, not an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wmt_scoreboard_core::{ChartSpec, InsufficientDataError};

/// What composing a view produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewOutcome {
    /// A chart to render.
    Chart(ChartSpec),
    /// Not enough data; render an explanatory empty state.
    Insufficient {
        /// Human-readable explanation.
        reason: String,
    },
}

/// Canonical result of one page view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewResult {
    /// Stable identifier, `page/view`.
    pub view_id: String,
    /// Display title.
    pub title: String,
    /// Composed chart or empty-state reason.
    pub outcome: ViewOutcome,
    /// When the view was composed.
    pub timestamp: DateTime<Utc>,
}

impl ViewResult {
    /// Wrap a composer result.
    pub fn new(
        view_id: impl Into<String>,
        title: impl Into<String>,
        composed: Result<ChartSpec, InsufficientDataError>,
    ) -> Self {
        let outcome = match composed {
            Ok(chart) => ViewOutcome::Chart(chart),
            Err(e) => ViewOutcome::Insufficient {
                reason: e.to_string(),
            },
        };
        Self {
            view_id: view_id.into(),
            title: title.into(),
            outcome,
            timestamp: Utc::now(),
        }
    }

    /// The chart, if one was composed.
    pub fn chart(&self) -> Option<&ChartSpec> {
        match &self.outcome {
            ViewOutcome::Chart(chart) => Some(chart),
            ViewOutcome::Insufficient { .. } => None,
        }
    }

    /// Short status word for tables.
    pub fn status(&self) -> &'static str {
        match &self.outcome {
            ViewOutcome::Chart(chart) if chart.is_empty() => "no data",
            ViewOutcome::Chart(_) => "ok",
            ViewOutcome::Insufficient { .. } => "insufficient",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_outcome_keeps_reason() {
        let result = ViewResult::new(
            "visualizations/correlation",
            "Correlation",
            Err(InsufficientDataError::new("correlation", 1, 2)),
        );
        assert!(result.chart().is_none());
        assert_eq!(result.status(), "insufficient");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"]["status"], "insufficient");
        assert!(json["outcome"]["reason"].as_str().unwrap().contains("1 usable rows"));
    }

    #[test]
    fn test_result_timestamp_not_in_future() {
        let result = ViewResult::new(
            "x",
            "x",
            Err(InsufficientDataError::new("scatter", 0, 1)),
        );
        assert!(result.timestamp <= Utc::now());
    }
}
