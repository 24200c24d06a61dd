//! Named view presets, one per page of the score board.
//!
//! A page binds a catalog [`Source`] to the list of views it shows. Each view
//! is a [`Selection`] plus a [`ViewKind`]; the core does the rest.

use crate::catalog::{
    Source, MISTRAL_BASE, MISTRAL_MODEL_B, MISTRAL_MODEL_C, MISTRAL_MULTILINGUAL_E,
};
use crate::result::ViewResult;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wmt_scoreboard_core::{compute_view, Dataset, Metric, Selection, ViewKind};

/// One configured view on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    /// Identifier unique within the page.
    pub id: String,
    /// Title override; the composer's default title when `None`.
    pub title: Option<String>,
    /// Chart kind.
    pub kind: ViewKind,
    /// Subset of the page dataset to show.
    pub selection: Selection,
}

impl PageView {
    fn new(id: impl Into<String>, kind: ViewKind, selection: Selection) -> Self {
        Self {
            id: id.into(),
            title: None,
            kind,
            selection,
        }
    }

    fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Compose this view against `dataset`.
    pub fn render(&self, page: Page, dataset: &Dataset) -> ViewResult {
        let composed = compute_view(dataset, &self.selection, self.kind).map(|chart| match &self.title {
            Some(title) => chart.with_title(title.clone()),
            None => chart,
        });
        let title = match (&self.title, &composed) {
            (Some(title), _) => title.clone(),
            (None, Ok(chart)) => chart.title.clone(),
            (None, Err(_)) => self.id.clone(),
        };
        ViewResult::new(format!("{}/{}", page.name(), self.id), title, composed)
    }
}

/// Pages of the score board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Landing page summary chart.
    Dashboard,
    /// Monolingual and multilingual comparison tabs.
    Descriptions,
    /// Exploratory charts.
    Visualizations,
}

impl Page {
    /// All pages in navigation order.
    pub const ALL: [Page; 3] = [Page::Dashboard, Page::Descriptions, Page::Visualizations];

    /// Stable lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Descriptions => "descriptions",
            Self::Visualizations => "visualizations",
        }
    }

    /// Catalog source the page reads from.
    pub fn source(&self) -> Source {
        match self {
            Self::Dashboard => Source::Dashboard,
            Self::Descriptions => Source::Tasks,
            Self::Visualizations => Source::Visualizations,
        }
    }

    /// Views shown on this page, given its dataset.
    pub fn views(&self, dataset: &Dataset) -> Vec<PageView> {
        match self {
            Self::Dashboard => vec![PageView::new("summary", ViewKind::GroupedBar, Selection::all())],
            Self::Descriptions => vec![
                PageView::new(
                    "monolingual",
                    ViewKind::GroupedBar,
                    Selection::all()
                        .with_models([MISTRAL_BASE, MISTRAL_MODEL_B, MISTRAL_MODEL_C])
                        .with_pairs(["en-de"]),
                )
                .titled("Monolingual Model Performance Metrics"),
                PageView::new(
                    "multilingual",
                    ViewKind::GroupedBar,
                    Selection::all().with_models([MISTRAL_BASE, MISTRAL_MULTILINGUAL_E]),
                )
                .titled("Multilingual Model Performance Metrics"),
            ],
            Self::Visualizations => {
                let mut views = vec![PageView::new(
                    "box_bleu",
                    ViewKind::BoxPlot,
                    Selection::all().with_metric(Metric::Bleu),
                )];
                let fine_tuned = Selection::excluding_models(dataset, &[MISTRAL_BASE]);
                for metric in Metric::ALL {
                    views.push(PageView::new(
                        format!("bar_{}", metric.column().to_lowercase()),
                        ViewKind::MetricBar,
                        fine_tuned.clone().with_metric(metric),
                    ));
                }
                views.push(PageView::new("scatter", ViewKind::Scatter, Selection::all()));
                views.push(PageView::new("correlation", ViewKind::Correlation, Selection::all()));
                views
            }
        }
    }

    /// Compose every view of the page.
    pub fn render(&self, dataset: &Dataset) -> Vec<ViewResult> {
        let results: Vec<ViewResult> = self
            .views(dataset)
            .iter()
            .map(|view| view.render(*self, dataset))
            .collect();
        debug!(page = self.name(), views = results.len(), "Rendered page");
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ViewOutcome;
    use wmt_scoreboard_core::load_dataset;

    fn render(page: Page) -> Vec<ViewResult> {
        let dataset = load_dataset(&page.source().tables()).unwrap();
        page.render(&dataset)
    }

    #[test]
    fn test_dashboard_summary_uses_bare_model_keys() {
        let results = render(Page::Dashboard);
        assert_eq!(results.len(), 1);
        let chart = results[0].chart().unwrap();
        assert_eq!(chart.categories, vec!["Model A", "Model B", "Model C"]);
        assert_eq!(results[0].view_id, "dashboard/summary");
    }

    #[test]
    fn test_monolingual_tab_compares_en_de_only() {
        let results = render(Page::Descriptions);
        let chart = results[0].chart().unwrap();
        assert_eq!(chart.title, "Monolingual Model Performance Metrics");
        assert_eq!(
            chart.categories,
            vec![
                "Mistral Base (en-de)",
                "Mistral Model B (en-de)",
                "Mistral Model C (en-de)"
            ]
        );
    }

    #[test]
    fn test_multilingual_tab_keeps_placeholders() {
        let results = render(Page::Descriptions);
        let chart = results[1].chart().unwrap();
        assert_eq!(chart.categories.len(), 6);
        assert_eq!(chart.metadata["placeholder_scores"], serde_json::json!(6));
    }

    #[test]
    fn test_visualizations_page_views() {
        let results = render(Page::Visualizations);
        let ids: Vec<&str> = results.iter().map(|r| r.view_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "visualizations/box_bleu",
                "visualizations/bar_bleu",
                "visualizations/bar_chrf",
                "visualizations/bar_comet",
                "visualizations/scatter",
                "visualizations/correlation",
            ]
        );
        assert!(results.iter().all(|r| matches!(r.outcome, ViewOutcome::Chart(_))));
        let chrf = results[2].chart().unwrap();
        assert!(!chrf.categories.iter().any(|c| c == MISTRAL_BASE));
        assert_eq!(chrf.categories, vec!["Mistral B", "Mistral C", "Mistral Multilingual E"]);
    }

    #[test]
    fn test_dashboard_correlation_is_available_on_demand() {
        let dataset = load_dataset(&Source::Dashboard.tables()).unwrap();
        let view = PageView::new("corr", ViewKind::Correlation, Selection::all());
        let result = view.render(Page::Dashboard, &dataset);
        assert!(result.chart().is_some());
    }

    #[test]
    fn test_single_row_correlation_is_reported_not_raised() {
        let dataset = load_dataset(&Source::Tasks.tables()).unwrap();
        let view = PageView::new(
            "corr",
            ViewKind::Correlation,
            Selection::all().with_models([MISTRAL_MODEL_B]),
        );
        let result = view.render(Page::Descriptions, &dataset);
        assert_eq!(result.status(), "insufficient");
        assert_eq!(result.title, "corr");
    }
}
