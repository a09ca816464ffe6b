//! Match scorer
//!
//! Turns one (source, candidate) pair into a normalized similarity in
//! [0, 1]. The length bound runs first; when it cannot beat the threshold
//! the edit distance is never computed and the pair scores `(0, 0)`.

use serde::Serialize;

use crate::bound::max_similarity;
use crate::config::{MatchConfig, MatchMode};
use crate::distance::levenshtein;
use crate::tokenize::tokenize;

/// Similarity of one candidate against the source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    /// `1 - distance / max(len)`, or 0 when pruned
    pub similarity: f64,
    /// Edit distance in units, or 0 when pruned
    pub distance: usize,
    /// The length bound did not exceed the threshold
    #[serde(skip)]
    pub pruned: bool,
}

impl Score {
    fn pruned() -> Self {
        Self {
            similarity: 0.0,
            distance: 0,
            pruned: true,
        }
    }

    /// Final acceptance is inclusive, unlike the strict pre-filter.
    #[inline]
    pub fn accepts(&self, threshold: f64) -> bool {
        self.similarity >= threshold
    }
}

#[derive(Debug, Clone)]
enum Units {
    Chars(Vec<char>),
    Tokens(Vec<String>),
}

/// Scorer with the source term split into units once.
#[derive(Debug, Clone)]
pub struct Scorer {
    source: Units,
    threshold: f64,
    separators: String,
}

impl Scorer {
    pub fn new(config: &MatchConfig) -> Self {
        Self::for_source(config.source_term(), config)
    }

    /// Scorer for an explicit source term, taking mode, threshold and
    /// separators from `config`.
    pub fn for_source(source: &str, config: &MatchConfig) -> Self {
        let units = match config.mode() {
            MatchMode::Word => Units::Chars(source.chars().collect()),
            MatchMode::Sentence => Units::Tokens(tokenize(source, config.separators())),
        };
        Self {
            source: units,
            threshold: config.threshold(),
            separators: config.separators().to_string(),
        }
    }

    /// Number of units in the source term.
    pub fn source_len(&self) -> usize {
        match &self.source {
            Units::Chars(chars) => chars.len(),
            Units::Tokens(tokens) => tokens.len(),
        }
    }

    pub fn score(&self, candidate: &str) -> Score {
        match &self.source {
            Units::Chars(source) => {
                let candidate: Vec<char> = candidate.chars().collect();
                score_units(source, &candidate, self.threshold)
            }
            Units::Tokens(source) => {
                let candidate = tokenize(candidate, &self.separators);
                score_units(source, &candidate, self.threshold)
            }
        }
    }
}

/// Score `candidate` against `source` under `config`'s mode, threshold and
/// separators.
pub fn score(source: &str, candidate: &str, config: &MatchConfig) -> Score {
    Scorer::for_source(source, config).score(candidate)
}

fn score_units<T: PartialEq>(source: &[T], candidate: &[T], threshold: f64) -> Score {
    if max_similarity(candidate, source) <= threshold {
        return Score::pruned();
    }

    let distance = if source.len() > candidate.len() {
        levenshtein(candidate, source)
    } else {
        levenshtein(source, candidate)
    };

    let longest = source.len().max(candidate.len());
    // Two empty sequences are identical.
    let similarity = if longest == 0 {
        1.0
    } else {
        1.0 - distance as f64 / longest as f64
    };

    Score {
        similarity,
        distance,
        pruned: false,
    }
}
