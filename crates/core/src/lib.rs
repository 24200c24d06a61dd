// Copyright 2025 WMT Scoreboard Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core pipeline for WMT translation score boards.
//!
//! Data flows through four pure stages:
//!
//! ```text
//! RawTable[] ──load──▶ Dataset ──apply(Selection)──▶ Dataset
//!                                                     │
//!                              ChartSpec ◀──compose── to_long / to_wide
//! ```
//!
//! Every stage takes its input by reference and returns a new value, so a
//! loaded [`Dataset`] can be shared by any number of concurrent views.
//!
//! # Example
//!
//! ```
//! use wmt_scoreboard_core::{compute_view, load_dataset, RawTable, Selection, ViewKind};
//!
//! let table = RawTable::new(Some("Mistral Base"))
//!     .column("Language Pair", ["en-de"])
//!     .column("BLEU", [11.0])
//!     .column("ChrF", [48.62])
//!     .column("COMET", [81.0]);
//!
//! let dataset = load_dataset(&[table]).unwrap();
//! let chart = compute_view(&dataset, &Selection::all(), ViewKind::GroupedBar).unwrap();
//! assert_eq!(chart.categories, vec!["Mistral Base (en-de)"]);
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod observation;
pub mod reshape;
pub mod selection;
pub mod stats;
pub mod store;
pub mod view;

pub use error::{InsufficientDataError, MalformedTableError};
pub use observation::{display_key, Dataset, Metric, Observation};
pub use reshape::{melt, to_long, to_wide, LongRow, WideRow};
pub use selection::{apply, Selection};
pub use store::{RawTable, RecordStore};
pub use view::{compute_view, ChartSpec, Series, ViewKind};

/// Normalize raw wide tables into a dataset.
pub fn load_dataset(tables: &[RawTable]) -> Result<Dataset, MalformedTableError> {
    Ok(RecordStore::load(tables)?.into_dataset())
}
