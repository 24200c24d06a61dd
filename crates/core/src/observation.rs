// Copyright 2025 WMT Scoreboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Observation and dataset types.
//!
//! An [`Observation`] is one score for one (model, variant, language pair,
//! metric) tuple. A [`Dataset`] is an ordered, immutable sequence of them;
//! insertion order is the default display order everywhere downstream.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Translation quality metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Corpus BLEU.
    #[serde(rename = "BLEU")]
    Bleu,
    /// Character n-gram F-score.
    #[serde(rename = "ChrF")]
    ChrF,
    /// Neural COMET score.
    #[serde(rename = "COMET")]
    Comet,
}

impl Metric {
    /// All metrics in canonical column order.
    pub const ALL: [Metric; 3] = [Metric::Bleu, Metric::ChrF, Metric::Comet];

    /// Column header used in wide tables.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Bleu => "BLEU",
            Self::ChrF => "ChrF",
            Self::Comet => "COMET",
        }
    }

    /// Position in [`Metric::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::Bleu => 0,
            Self::ChrF => 1,
            Self::Comet => 2,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bleu" => Ok(Self::Bleu),
            "chrf" => Ok(Self::ChrF),
            "comet" => Ok(Self::Comet),
            _ => Err(format!("unknown metric: {}", s)),
        }
    }
}

/// One measured score.
///
/// Absent `variant` and `language_pair` are empty strings, never missing.
/// A score of `0.0` is the "not yet evaluated" placeholder and is carried
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Top-level model identifier.
    pub model: String,
    /// Submodel or experiment variant.
    #[serde(default)]
    pub variant: String,
    /// Language pair such as `en-de`.
    #[serde(default)]
    pub language_pair: String,
    /// Metric this score belongs to.
    pub metric: Metric,
    /// Measured score.
    pub score: f64,
}

impl Observation {
    /// Create a new observation.
    pub fn new(
        model: impl Into<String>,
        variant: impl Into<String>,
        language_pair: impl Into<String>,
        metric: Metric,
        score: f64,
    ) -> Self {
        Self {
            model: model.into(),
            variant: variant.into(),
            language_pair: language_pair.into(),
            metric,
            score,
        }
    }

    /// Variant if set, else the language pair. Both when both are set.
    pub fn context(&self) -> String {
        context_of(&self.variant, &self.language_pair)
    }

    /// Composite chart label for this observation's row.
    pub fn display_key(&self) -> String {
        display_key(&self.model, &self.variant, &self.language_pair)
    }

    /// True when the score is the zero placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.score == 0.0
    }

    pub(crate) fn same_row(&self, model: &str, variant: &str, language_pair: &str) -> bool {
        self.model == model && self.variant == variant && self.language_pair == language_pair
    }
}

pub(crate) fn context_of(variant: &str, language_pair: &str) -> String {
    match (variant.is_empty(), language_pair.is_empty()) {
        (true, _) => language_pair.to_string(),
        (false, true) => variant.to_string(),
        (false, false) => format!("{}, {}", variant, language_pair),
    }
}

/// Build the display key for a (model, variant, language pair) triple.
///
/// `"{model} ({context})"` when the context is non-empty, else `model`.
/// Every view labels rows through this function.
pub fn display_key(model: &str, variant: &str, language_pair: &str) -> String {
    let context = context_of(variant, language_pair);
    if context.is_empty() {
        model.to_string()
    } else {
        format!("{} ({})", model, context)
    }
}

/// Ordered, immutable sequence of observations.
///
/// Cloning is cheap; clones share the same backing storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    observations: Arc<[Observation]>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            observations: Arc::from(Vec::new()),
        }
    }
}

impl Dataset {
    /// Wrap observations without validation. Use [`crate::RecordStore::load`]
    /// for raw input.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        Self {
            observations: observations.into(),
        }
    }

    /// Empty dataset.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether there are no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Borrow as a slice.
    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    /// Distinct model names in first-seen order.
    pub fn models(&self) -> Vec<String> {
        distinct(self.iter().map(|o| o.model.as_str()))
    }

    /// Distinct non-empty language pairs in first-seen order.
    pub fn language_pairs(&self) -> Vec<String> {
        distinct(
            self.iter()
                .map(|o| o.language_pair.as_str())
                .filter(|p| !p.is_empty()),
        )
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub(crate) fn distinct<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        if !seen.iter().any(|s| s == item) {
            seen.push(item.to_string());
        }
    }
    seen
}
