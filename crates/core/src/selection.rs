// Copyright 2025 WMT Scoreboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Selection filter.
//!
//! A [`Selection`] is transient per-interaction state. Applying it is a pure
//! predicate over observations and never touches the input dataset.

use crate::observation::{Dataset, Metric, Observation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// User-chosen subset of the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Models to keep. Empty keeps every model.
    #[serde(default)]
    pub models: Vec<String>,
    /// Metric to keep. `None` keeps every metric.
    #[serde(default)]
    pub metric: Option<Metric>,
    /// Language pairs to keep. `None` keeps every pair; `Some(vec![])` keeps none.
    #[serde(default)]
    pub pairs: Option<Vec<String>>,
}

impl Selection {
    /// Select everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to the given models.
    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to one metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self
    }

    /// Restrict to the given language pairs.
    pub fn with_pairs<I, S>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pairs = Some(pairs.into_iter().map(Into::into).collect());
        self
    }

    /// Every model of `dataset` except the named ones.
    pub fn excluding_models(dataset: &Dataset, excluded: &[&str]) -> Self {
        let models = dataset
            .models()
            .into_iter()
            .filter(|m| !excluded.contains(&m.as_str()));
        Self::all().with_models(models)
    }

    /// Drop the metric restriction.
    pub fn without_metric(&self) -> Self {
        Self {
            metric: None,
            ..self.clone()
        }
    }

    /// Whether an observation satisfies every predicate.
    pub fn matches(&self, observation: &Observation) -> bool {
        let model_ok = self.models.is_empty() || self.models.iter().any(|m| *m == observation.model);
        let metric_ok = self.metric.map_or(true, |m| m == observation.metric);
        let pair_ok = self
            .pairs
            .as_ref()
            .map_or(true, |pairs| pairs.iter().any(|p| *p == observation.language_pair));
        model_ok && metric_ok && pair_ok
    }
}

/// Keep the observations matching `selection`, order preserved.
///
/// No match yields an empty dataset, not an error.
pub fn apply(dataset: &Dataset, selection: &Selection) -> Dataset {
    let kept: Vec<Observation> = dataset
        .iter()
        .filter(|o| selection.matches(o))
        .cloned()
        .collect();
    debug!(
        input = dataset.len(),
        kept = kept.len(),
        models = selection.models.len(),
        metric = ?selection.metric,
        "Applied selection"
    );
    Dataset::from_observations(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Dataset {
        let mut obs = Vec::new();
        for (model, pair) in [
            ("Mistral Base", "en-it"),
            ("Mistral Base", "en-de"),
            ("Mistral Model B", "en-de"),
            ("Mistral Model C", "en-de"),
        ] {
            for metric in Metric::ALL {
                obs.push(Observation::new(model, "", pair, metric, 10.0));
            }
        }
        Dataset::from_observations(obs)
    }

    #[test]
    fn test_model_selection_keeps_order() {
        let ds = sample();
        let sel = Selection::all().with_models(["Mistral Model B", "Mistral Model C"]);
        let out = apply(&ds, &sel);
        assert_eq!(out.len(), 6);
        assert_eq!(out.models(), vec!["Mistral Model B", "Mistral Model C"]);
        assert!(out.iter().take(3).all(|o| o.model == "Mistral Model B"));
    }

    #[test]
    fn test_empty_models_means_all() {
        let ds = sample();
        assert_eq!(apply(&ds, &Selection::all()), ds);
    }

    #[test]
    fn test_metric_and_pair_predicates() {
        let ds = sample();
        let sel = Selection::all().with_metric(Metric::Comet).with_pairs(["en-de"]);
        let out = apply(&ds, &sel);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|o| o.metric == Metric::Comet && o.language_pair == "en-de"));
    }

    #[test]
    fn test_no_match_is_empty_dataset() {
        let ds = sample();
        let out = apply(&ds, &Selection::all().with_models(["nobody"]));
        assert!(out.is_empty());
        assert_eq!(ds.len(), 12);
    }

    #[test]
    fn test_empty_pair_list_selects_nothing() {
        let ds = sample();
        let out = apply(&ds, &Selection::all().with_pairs(Vec::<String>::new()));
        assert!(out.is_empty());
    }

    #[test]
    fn test_excluding_models() {
        let ds = sample();
        let sel = Selection::excluding_models(&ds, &["Mistral Base"]);
        assert_eq!(sel.models, vec!["Mistral Model B", "Mistral Model C"]);
    }

    fn arb_dataset() -> impl Strategy<Value = Dataset> {
        let model = prop::sample::select(vec!["A", "B", "C"]);
        let pair = prop::sample::select(vec!["", "en-de", "en-fr"]);
        let metric = prop::sample::select(Metric::ALL.to_vec());
        prop::collection::vec((model, pair, metric, 0.0f64..100.0), 0..30).prop_map(|rows| {
            Dataset::from_observations(
                rows.into_iter()
                    .map(|(m, p, metric, s)| Observation::new(m, "", p, metric, s))
                    .collect(),
            )
        })
    }

    fn arb_selection() -> impl Strategy<Value = Selection> {
        (
            prop::sample::subsequence(vec!["A", "B", "C"], 0..=3),
            prop::option::of(prop::sample::select(Metric::ALL.to_vec())),
            prop::option::of(prop::sample::subsequence(vec!["", "en-de", "en-fr"], 0..=3)),
        )
            .prop_map(|(models, metric, pairs)| Selection {
                models: models.into_iter().map(String::from).collect(),
                metric,
                pairs: pairs.map(|p| p.into_iter().map(String::from).collect()),
            })
    }

    proptest! {
        /// Every kept observation matches, and every match is kept exactly once.
        #[test]
        fn prop_filter_is_sound_and_complete(ds in arb_dataset(), sel in arb_selection()) {
            let out = apply(&ds, &sel);
            prop_assert!(out.iter().all(|o| sel.matches(o)));
            let expected: Vec<&Observation> = ds.iter().filter(|o| sel.matches(o)).collect();
            prop_assert_eq!(out.len(), expected.len());
            for (a, b) in out.iter().zip(expected) {
                prop_assert_eq!(a, b);
            }
        }
    }
}
