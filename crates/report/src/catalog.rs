//! Built-in result tables for the WMT 24 biomedical translation task.
//!
//! Three independent sources exist, one per page of the score board. They use
//! different model names and are never merged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use wmt_scoreboard_core::store::columns;
use wmt_scoreboard_core::RawTable;

/// Base instruction-tuned model.
pub const MISTRAL_BASE: &str = "Mistral Base";
/// Monolingual fine-tune on the WMT 24 corpus.
pub const MISTRAL_MODEL_B: &str = "Mistral Model B";
/// Model B plus terminology-filtered augmentation.
pub const MISTRAL_MODEL_C: &str = "Mistral Model C";
/// Multilingual fine-tune on en-it, en-de and en-es.
pub const MISTRAL_MULTILINGUAL_E: &str = "Mistral Multilingual Model E";

/// Which built-in table set to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Summary sample of the landing page.
    Dashboard,
    /// One table per model, as on the model descriptions page.
    Tasks,
    /// Single combined table of the visualizations page.
    Visualizations,
}

impl Source {
    /// All sources.
    pub const ALL: [Source; 3] = [Source::Dashboard, Source::Tasks, Source::Visualizations];

    /// Stable lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Tasks => "tasks",
            Self::Visualizations => "visualizations",
        }
    }

    /// Raw tables of this source.
    pub fn tables(&self) -> Vec<RawTable> {
        match self {
            Self::Dashboard => dashboard_tables(),
            Self::Tasks => task_tables(),
            Self::Visualizations => visualization_tables(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|src| src.name() == s.to_lowercase())
            .ok_or_else(|| format!("unknown source: {}", s))
    }
}

/// Landing page summary: three models, no variants, no pairs.
pub fn dashboard_tables() -> Vec<RawTable> {
    vec![RawTable::new(None)
        .column(columns::MODEL, ["Model A", "Model B", "Model C"])
        .column(columns::SUBMODEL, ["", "", ""])
        .column("BLEU", [0.92, 0.89, 0.94])
        .column("ChrF", [0.91, 0.88, 0.93])
        .column("COMET", [0.90, 0.87, 0.92])]
}

/// Per-model tables. Zero scores of model E are not yet evaluated.
pub fn task_tables() -> Vec<RawTable> {
    vec![
        RawTable::new(Some(MISTRAL_BASE))
            .column(columns::LANGUAGE_PAIR, ["en-it", "en-de", "en-fr"])
            .column("BLEU", [16.0, 11.0, 27.0])
            .column("ChrF", [48.37, 48.62, 56.80])
            .column("COMET", [79.0, 81.0, 81.0]),
        RawTable::new(Some(MISTRAL_MODEL_B))
            .column(columns::LANGUAGE_PAIR, ["en-de"])
            .column("BLEU", [22.0])
            .column("ChrF", [53.65])
            .column("COMET", [84.6]),
        RawTable::new(Some(MISTRAL_MODEL_C))
            .column(columns::LANGUAGE_PAIR, ["en-de"])
            .column("BLEU", [25.0])
            .column("ChrF", [57.47])
            .column("COMET", [84.6]),
        RawTable::new(Some(MISTRAL_MULTILINGUAL_E))
            .column(columns::LANGUAGE_PAIR, ["en-it", "en-de", "en-fr"])
            .column("BLEU", [0.0, 0.0, 30.0])
            .column("ChrF", [0.0, 0.0, 59.0])
            .column("COMET", [0.0, 0.0, 84.0]),
    ]
}

/// Combined table with short model names.
pub fn visualization_tables() -> Vec<RawTable> {
    vec![RawTable::new(None)
        .column(
            columns::MODEL,
            [
                "Mistral Base",
                "Mistral Base",
                "Mistral Base",
                "Mistral B",
                "Mistral C",
                "Mistral Multilingual E",
                "Mistral Multilingual E",
                "Mistral Multilingual E",
            ],
        )
        .column(
            columns::LANGUAGE_PAIR,
            ["en-it", "en-de", "en-fr", "en-de", "en-de", "en-it", "en-de", "en-fr"],
        )
        .column("BLEU", [16.0, 11.0, 27.0, 22.0, 25.0, 0.0, 0.0, 30.0])
        .column("ChrF", [48.37, 48.62, 56.80, 53.65, 57.47, 0.0, 0.0, 59.0])
        .column("COMET", [79.0, 81.0, 81.0, 84.6, 84.6, 0.0, 0.0, 84.0])]
}

#[cfg(test)]
mod tests {
    use super::*;
    use wmt_scoreboard_core::load_dataset;

    #[test]
    fn test_every_source_loads() {
        for source in Source::ALL {
            let dataset = load_dataset(&source.tables()).unwrap();
            assert!(!dataset.is_empty(), "{} is empty", source);
        }
    }

    #[test]
    fn test_task_tables_shape() {
        let dataset = load_dataset(&task_tables()).unwrap();
        assert_eq!(dataset.len(), 8 * 3);
        assert_eq!(
            dataset.models(),
            vec![MISTRAL_BASE, MISTRAL_MODEL_B, MISTRAL_MODEL_C, MISTRAL_MULTILINGUAL_E]
        );
        assert_eq!(dataset.language_pairs(), vec!["en-it", "en-de", "en-fr"]);
    }

    #[test]
    fn test_source_parse() {
        assert_eq!("Tasks".parse::<Source>().unwrap(), Source::Tasks);
        assert!("hyperparameters".parse::<Source>().is_err());
    }
}
