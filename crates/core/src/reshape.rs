// Copyright 2025 WMT Scoreboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Reshape engine: long (tidy) and wide forms.
//!
//! Observations already carry their metric, so the long form is one
//! [`LongRow`] per observation. Starting from raw wide tables, [`melt`]
//! expands every wide row into one long row per metric column.

use crate::error::Result;
use crate::observation::{display_key, Dataset, Metric, Observation};
use crate::store::{RawTable, RecordStore};
use serde::{Deserialize, Serialize};

/// One (row, metric) score in tidy form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRow {
    /// Chart label for the row.
    pub display_key: String,
    /// Model identifier.
    pub model: String,
    /// Variant or language pair the key was built from.
    pub context: String,
    /// Metric of this score.
    pub metric: Metric,
    /// Score value.
    pub score: f64,
}

impl From<&Observation> for LongRow {
    fn from(o: &Observation) -> Self {
        Self {
            display_key: o.display_key(),
            model: o.model.clone(),
            context: o.context(),
            metric: o.metric,
            score: o.score,
        }
    }
}

/// One long row per observation, in dataset order.
pub fn to_long(dataset: &Dataset) -> Vec<LongRow> {
    dataset.iter().map(LongRow::from).collect()
}

/// Load wide tables and reshape them to long form in one step.
///
/// Rows come out row-major: every metric of the first wide row (BLEU, ChrF,
/// COMET), then every metric of the next. A column-major melt would instead
/// list all BLEU rows first.
pub fn melt(tables: &[RawTable]) -> Result<Vec<LongRow>> {
    let store = RecordStore::load(tables)?;
    Ok(to_long(store.all()))
}

/// One (model, variant, language pair) row with a slot per metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WideRow {
    /// Model identifier.
    pub model: String,
    /// Variant, empty if none.
    pub variant: String,
    /// Language pair, empty if none.
    pub language_pair: String,
    /// Scores indexed by [`Metric::index`].
    pub scores: [Option<f64>; 3],
}

impl WideRow {
    /// Score for one metric, if observed.
    pub fn score(&self, metric: Metric) -> Option<f64> {
        self.scores[metric.index()]
    }

    /// All three scores, when every metric was observed.
    pub fn complete(&self) -> Option<[f64; 3]> {
        match self.scores {
            [Some(b), Some(c), Some(m)] => Some([b, c, m]),
            _ => None,
        }
    }

    /// Metrics with no observation.
    pub fn missing(&self) -> Vec<Metric> {
        Metric::ALL
            .into_iter()
            .filter(|m| self.score(*m).is_none())
            .collect()
    }

    /// Chart label for this row.
    pub fn display_key(&self) -> String {
        display_key(&self.model, &self.variant, &self.language_pair)
    }
}

/// Group observations into wide rows, first-seen order.
pub fn to_wide(dataset: &Dataset) -> Vec<WideRow> {
    let mut rows: Vec<WideRow> = Vec::new();
    for o in dataset {
        let slot = match rows.iter().position(|r| o.same_row(&r.model, &r.variant, &r.language_pair)) {
            Some(i) => &mut rows[i],
            None => {
                rows.push(WideRow {
                    model: o.model.clone(),
                    variant: o.variant.clone(),
                    language_pair: o.language_pair.clone(),
                    scores: [None; 3],
                });
                let last = rows.len() - 1;
                &mut rows[last]
            }
        };
        slot.scores[o.metric.index()] = Some(o.score);
    }
    rows
}
