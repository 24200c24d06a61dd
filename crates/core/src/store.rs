// Copyright 2025 WMT Scoreboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Record store: normalizes raw wide tables into a [`Dataset`].
//!
//! Raw tables are column-oriented, one JSON array per column:
//!
//! ```json
//! {
//!   "model": "Mistral Base",
//!   "columns": {
//!     "Language Pair": ["en-it", "en-de"],
//!     "BLEU": [16, 11],
//!     "ChrF": [48.37, 48.62],
//!     "COMET": [79, 81]
//!   }
//! }
//! ```
//!
//! The schema is declared in [`columns`] and validated at load time.

use crate::error::{MalformedTableError, Result};
use crate::observation::{display_key, Dataset, Metric, Observation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info};

/// Column names of the wide-table schema.
pub mod columns {
    /// Model name. Optional when the table carries a table-level model.
    pub const MODEL: &str = "Model";
    /// Submodel / experiment variant. Optional.
    pub const SUBMODEL: &str = "Submodel";
    /// Language pair. Optional.
    pub const LANGUAGE_PAIR: &str = "Language Pair";
}

/// A wide table as supplied by a data-loading collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Model applied to rows without a `Model` cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Column name to cell values.
    pub columns: BTreeMap<String, Vec<Value>>,
}

impl RawTable {
    /// Create an empty table, optionally bound to a model.
    pub fn new(model: Option<&str>) -> Self {
        Self {
            model: model.map(str::to_string),
            columns: BTreeMap::new(),
        }
    }

    /// Add a column, builder style.
    pub fn column<V: Into<Value>>(mut self, name: &str, values: impl IntoIterator<Item = V>) -> Self {
        self.columns
            .insert(name.to_string(), values.into_iter().map(Into::into).collect());
        self
    }

    fn row_count(&self) -> usize {
        self.columns.values().map(Vec::len).max().unwrap_or(0)
    }
}

/// Owner of the canonical dataset for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    dataset: Dataset,
}

impl RecordStore {
    /// Normalize raw tables into a store.
    ///
    /// Loading the same tables twice yields equal datasets. Rows whose
    /// display keys coincide but whose (model, variant, language pair)
    /// differ are rejected, since views key their categories by display key.
    pub fn load(tables: &[RawTable]) -> Result<Self> {
        let mut observations = Vec::new();
        let mut seen: HashSet<(String, String, String, Metric)> = HashSet::new();
        let mut keys: HashMap<String, (String, String, String)> = HashMap::new();

        for (t, table) in tables.iter().enumerate() {
            validate_schema(t, table)?;
            for row in 0..table.row_count() {
                let model = match text_cell(t, row, table, columns::MODEL)? {
                    Some(name) => name,
                    None => table.model.clone().unwrap_or_default(),
                };
                if model.trim().is_empty() {
                    return Err(MalformedTableError::EmptyModel { table: t, row });
                }
                let variant = text_cell(t, row, table, columns::SUBMODEL)?.unwrap_or_default();
                let pair = text_cell(t, row, table, columns::LANGUAGE_PAIR)?.unwrap_or_default();

                let key = display_key(&model, &variant, &pair);
                match keys.get(&key) {
                    Some((m, v, p)) if *m != model || *v != variant || *p != pair => {
                        return Err(MalformedTableError::DisplayKeyCollision {
                            table: t,
                            row,
                            display_key: key,
                            model,
                            variant,
                            language_pair: pair,
                            existing_model: m.clone(),
                            existing_variant: v.clone(),
                            existing_language_pair: p.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        keys.insert(key, (model.clone(), variant.clone(), pair.clone()));
                    }
                }

                for metric in Metric::ALL {
                    let score = score_cell(t, row, table, metric)?;
                    let key = (model.clone(), variant.clone(), pair.clone(), metric);
                    if !seen.insert(key) {
                        return Err(MalformedTableError::DuplicateObservation {
                            table: t,
                            row,
                            model,
                            variant,
                            language_pair: pair,
                            metric,
                        });
                    }
                    observations.push(Observation::new(
                        model.clone(),
                        variant.clone(),
                        pair.clone(),
                        metric,
                        score,
                    ));
                }
            }
            debug!(table = t, rows = table.row_count(), "Normalized wide table");
        }

        info!(
            tables = tables.len(),
            observations = observations.len(),
            "Record store loaded"
        );

        Ok(Self {
            dataset: Dataset::from_observations(observations),
        })
    }

    /// The full dataset, in insertion order.
    pub fn all(&self) -> &Dataset {
        &self.dataset
    }

    /// Consume the store, keeping the dataset.
    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}

fn validate_schema(t: usize, table: &RawTable) -> Result<()> {
    if table.model.is_none() && !table.columns.contains_key(columns::MODEL) {
        return Err(MalformedTableError::MissingColumn {
            table: t,
            column: columns::MODEL.to_string(),
        });
    }
    for metric in Metric::ALL {
        if !table.columns.contains_key(metric.column()) {
            return Err(MalformedTableError::MissingColumn {
                table: t,
                column: metric.column().to_string(),
            });
        }
    }

    let expected = table.row_count();
    for (name, values) in &table.columns {
        if values.len() != expected {
            return Err(MalformedTableError::RaggedColumns {
                table: t,
                column: name.clone(),
                expected,
                actual: values.len(),
            });
        }
    }
    Ok(())
}

fn text_cell(t: usize, row: usize, table: &RawTable, column: &str) -> Result<Option<String>> {
    match table.columns.get(column).map(|values| &values[row]) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(MalformedTableError::NonTextLabel {
            table: t,
            row,
            column: column.to_string(),
            value: other.to_string(),
        }),
    }
}

fn score_cell(t: usize, row: usize, table: &RawTable, metric: Metric) -> Result<f64> {
    let cell = &table.columns[metric.column()][row];
    cell.as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MalformedTableError::NonNumericScore {
            table: t,
            row,
            metric,
            value: cell.to_string(),
        })
}
