//! Match results

use serde::Serialize;

use crate::config::MatchMode;
use crate::matcher::{ScanState, ScanStats};
use crate::value::{Document, Value};

/// What an accepted candidate emits.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Matched {
    /// The whole record (no output field requested)
    Record(Document),
    /// The extracted output field; `None` when its kind is not emitted
    Field(Option<Value>),
}

impl Matched {
    pub fn is_omitted(&self) -> bool {
        matches!(self, Matched::Field(None))
    }

    pub fn as_record(&self) -> Option<&Document> {
        match self {
            Matched::Record(doc) => Some(doc),
            Matched::Field(_) => None,
        }
    }

    pub fn as_field(&self) -> Option<&Value> {
        match self {
            Matched::Field(value) => value.as_ref(),
            Matched::Record(_) => None,
        }
    }
}

/// One accepted candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    #[serde(rename = "match", skip_serializing_if = "Matched::is_omitted")]
    pub matched: Matched,
    pub score: f64,
    pub distance: usize,
    /// Storage position reported by the source
    #[serde(skip)]
    pub position: usize,
}

/// Outcome of one scan. `results` keeps scan order; nothing is re-ranked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    pub results: Vec<MatchResult>,
    #[serde(rename = "hits")]
    pub hit_count: usize,
    #[serde(rename = "level")]
    pub mode: MatchMode,
    #[serde(skip)]
    pub state: ScanState,
    #[serde(skip)]
    pub stats: ScanStats,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchResult> {
        self.results.iter()
    }
}
