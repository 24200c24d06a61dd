// Copyright 2025 WMT Scoreboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for the scoreboard core.
//!
//! Two kinds of failure exist and they are deliberately kept apart:
//!
//! - [`MalformedTableError`] comes out of loading. The caller cannot recover
//!   from it inside the core and should report it to the user.
//! - [`InsufficientDataError`] comes out of the scatter and correlation
//!   composers. The caller should render an empty state.

use crate::observation::Metric;
use thiserror::Error;

/// Errors raised while normalizing raw wide tables into observations.
///
/// `table` is the index of the table in the load call and `row` the row
/// within that table, both zero-based.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedTableError {
    /// A required column is absent from the table.
    #[error("table {table}: missing required column `{column}`")]
    MissingColumn {
        /// Table index.
        table: usize,
        /// Name of the absent column.
        column: String,
    },

    /// Columns of the same table have different lengths.
    #[error("table {table}: column `{column}` has {actual} rows, expected {expected}")]
    RaggedColumns {
        /// Table index.
        table: usize,
        /// Column whose length differs.
        column: String,
        /// Length of the longest column.
        expected: usize,
        /// Length of this column.
        actual: usize,
    },

    /// A score cell is not a finite number.
    #[error("table {table}, row {row}: {metric} score is not numeric: {value}")]
    NonNumericScore {
        /// Table index.
        table: usize,
        /// Row index.
        row: usize,
        /// Metric column of the cell.
        metric: Metric,
        /// The offending cell, as JSON.
        value: String,
    },

    /// A label cell (model, variant, language pair) is not text.
    #[error("table {table}, row {row}: column `{column}` is not text: {value}")]
    NonTextLabel {
        /// Table index.
        table: usize,
        /// Row index.
        row: usize,
        /// Label column of the cell.
        column: String,
        /// The offending cell, as JSON.
        value: String,
    },

    /// The row resolves to an empty model name.
    #[error("table {table}, row {row}: model name is empty")]
    EmptyModel {
        /// Table index.
        table: usize,
        /// Row index.
        row: usize,
    },

    /// The (model, variant, language pair, metric) tuple was already loaded.
    #[error("table {table}, row {row}: duplicate observation {model}/{variant}/{language_pair}/{metric}")]
    DuplicateObservation {
        /// Table index.
        table: usize,
        /// Row index.
        row: usize,
        /// Model of the repeated tuple.
        model: String,
        /// Variant of the repeated tuple.
        variant: String,
        /// Language pair of the repeated tuple.
        language_pair: String,
        /// Metric of the repeated tuple.
        metric: Metric,
    },

    /// A different (model, variant, language pair) row already uses this
    /// display key; the two could not be told apart on a chart axis.
    #[error(
        "table {table}, row {row}: display key `{display_key}` of {model}/{variant}/{language_pair} \
         is already used by {existing_model}/{existing_variant}/{existing_language_pair}"
    )]
    DisplayKeyCollision {
        /// Table index.
        table: usize,
        /// Row index.
        row: usize,
        /// The shared display key.
        display_key: String,
        /// Model of the rejected row.
        model: String,
        /// Variant of the rejected row.
        variant: String,
        /// Language pair of the rejected row.
        language_pair: String,
        /// Model of the row loaded first.
        existing_model: String,
        /// Variant of the row loaded first.
        existing_variant: String,
        /// Language pair of the row loaded first.
        existing_language_pair: String,
    },
}

/// Not enough usable rows to compose the requested view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("insufficient data for {view}: {usable} usable rows, at least {required} required")]
pub struct InsufficientDataError {
    /// View that was requested.
    pub view: String,
    /// Rows that survived filtering and completeness checks.
    pub usable: usize,
    /// Minimum rows the view needs.
    pub required: usize,
}

impl InsufficientDataError {
    /// Create a new error for the named view.
    pub fn new(view: impl Into<String>, usable: usize, required: usize) -> Self {
        Self {
            view: view.into(),
            usable,
            required,
        }
    }
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, MalformedTableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_messages_name_location() {
        let err = MalformedTableError::NonNumericScore {
            table: 1,
            row: 2,
            metric: Metric::ChrF,
            value: "\"n/a\"".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("table 1"));
        assert!(msg.contains("row 2"));
        assert!(msg.contains("ChrF"));
    }

    #[test]
    fn test_display_key_collision_names_both_rows() {
        let err = MalformedTableError::DisplayKeyCollision {
            table: 0,
            row: 1,
            display_key: "M (en-de)".to_string(),
            model: "M".to_string(),
            variant: String::new(),
            language_pair: "en-de".to_string(),
            existing_model: "M".to_string(),
            existing_variant: "en-de".to_string(),
            existing_language_pair: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "table 0, row 1: display key `M (en-de)` of M//en-de is already used by M/en-de/"
        );
    }

    #[test]
    fn test_insufficient_message() {
        let err = InsufficientDataError::new("correlation", 1, 2);
        assert_eq!(
            err.to_string(),
            "insufficient data for correlation: 1 usable rows, at least 2 required"
        );
    }
}
