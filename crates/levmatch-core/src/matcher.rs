//! Streaming matcher
//!
//! Pulls candidates one at a time, scores them and accumulates the accepted
//! ones in scan order. The scan moves from `Scanning` to one of two terminal
//! states: `Limited` as soon as the result limit is reached (no further
//! candidate is pulled), or `Exhausted` when the source runs dry.

use std::time::Instant;

use tracing::{debug, info, trace, warn};

use crate::config::{FieldPolicy, MatchConfig};
use crate::error::{MatchError, Result};
use crate::result::{MatchResult, Matched, ResultSet};
use crate::score::Scorer;
use crate::source::{CandidateSource, Gate, Pulled};
use crate::value::{extract_output, Candidate};

/// Scan progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Scanning,
    /// Stopped early on the result limit
    Limited,
    /// Source reported end of stream
    Exhausted,
}

/// Per-scan counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub pulled: usize,
    pub skipped_duplicate: usize,
    pub skipped_filtered: usize,
    /// Candidates skipped under [`FieldPolicy::Skip`]
    pub skipped_invalid: usize,
    /// Candidates rejected by the length bound without a distance computation
    pub pruned: usize,
    /// Candidates whose edit distance was computed
    pub scored: usize,
    pub elapsed_us: u64,
}

/// Single-threaded scan over a candidate source.
///
/// The accumulator belongs to one [`run`](Self::run) call; a matcher can be
/// reused for several sources, each getting an independent result set.
#[derive(Debug, Clone)]
pub struct StreamingMatcher<'c> {
    config: &'c MatchConfig,
    scorer: Scorer,
}

impl<'c> StreamingMatcher<'c> {
    pub fn new(config: &'c MatchConfig) -> Self {
        Self {
            config,
            scorer: Scorer::new(config),
        }
    }

    pub fn config(&self) -> &MatchConfig {
        self.config
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn run<S: CandidateSource>(&self, mut source: S) -> Result<ResultSet> {
        let start = Instant::now();
        let threshold = self.config.threshold();
        let limit = self.config.limit();

        let mut stats = ScanStats::default();
        let mut results = Vec::new();
        let mut state = if limit == Some(0) {
            ScanState::Limited
        } else {
            ScanState::Scanning
        };

        debug!(
            mode = %self.config.mode(),
            threshold,
            limit = ?limit,
            field = self.config.field(),
            source_units = self.scorer.source_len(),
            "starting scan"
        );

        while state == ScanState::Scanning {
            let Some(pulled) = source.pull() else {
                state = ScanState::Exhausted;
                break;
            };
            let pulled = pulled?;
            stats.pulled += 1;

            match pulled.gate {
                Gate::Fresh => {}
                Gate::Duplicate => {
                    stats.skipped_duplicate += 1;
                    trace!(position = pulled.position, "skipping duplicate");
                    continue;
                }
                Gate::Filtered => {
                    stats.skipped_filtered += 1;
                    trace!(position = pulled.position, "skipping filtered");
                    continue;
                }
            }

            let text = match self.comparison_text(&pulled) {
                Ok(text) => text,
                Err(err) => match self.config.on_invalid_field() {
                    FieldPolicy::Abort => return Err(err),
                    FieldPolicy::Skip => {
                        stats.skipped_invalid += 1;
                        warn!(error = %err, "skipping candidate");
                        continue;
                    }
                },
            };

            let score = self.scorer.score(text);
            if score.pruned {
                stats.pruned += 1;
                debug!(position = pulled.position, "pruned by length bound");
            } else {
                stats.scored += 1;
                trace!(
                    position = pulled.position,
                    similarity = score.similarity,
                    distance = score.distance,
                    "scored"
                );
            }

            if score.accepts(threshold) {
                results.push(MatchResult {
                    matched: self.emit(&pulled.record),
                    score: score.similarity,
                    distance: score.distance,
                    position: pulled.position,
                });

                if limit == Some(results.len()) {
                    state = ScanState::Limited;
                }
            }
        }

        stats.elapsed_us = start.elapsed().as_micros() as u64;

        info!(
            pulled = stats.pulled,
            scored = stats.scored,
            pruned = stats.pruned,
            hits = results.len(),
            elapsed_us = stats.elapsed_us,
            state = ?state,
            "scan finished"
        );

        Ok(ResultSet {
            hit_count: results.len(),
            results,
            mode: self.config.mode(),
            state,
            stats,
        })
    }

    fn comparison_text<'r, R: Candidate>(&self, pulled: &'r Pulled<R>) -> Result<&'r str> {
        let field = self.config.field();
        let value = pulled
            .record
            .field(field)
            .ok_or_else(|| MatchError::MissingField {
                field: field.to_string(),
                position: pulled.position,
            })?;
        value.as_str().ok_or_else(|| MatchError::FieldType {
            field: field.to_string(),
            found: value.kind_name(),
            position: pulled.position,
        })
    }

    fn emit<R: Candidate>(&self, record: &R) -> Matched {
        match self.config.output_field() {
            Some(output) => Matched::Field(extract_output(record.field(output))),
            None => Matched::Record(record.to_document()),
        }
    }
}

/// Run one scan of `source` under `config`.
pub fn find_matches<S: CandidateSource>(config: &MatchConfig, source: S) -> Result<ResultSet> {
    StreamingMatcher::new(config).run(source)
}
