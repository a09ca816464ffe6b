//! levmatch Core Engine
//!
//! Streaming fuzzy matching over a sequence of candidate records: each
//! candidate's comparison field is scored against a source term by edit
//! distance, filtered by a similarity threshold and collected up to an
//! optional limit.
//!
//! - **Word mode** compares the characters of two strings
//! - **Sentence mode** compares delimiter-split token sequences
//!
//! A length-only similarity bound prunes candidates that cannot reach the
//! threshold before the O(m·n) distance is computed.
//!
//! # Example
//!
//! ```rust
//! use levmatch_core::{find_matches, Document, IterSource, MatchConfig};
//!
//! let config = MatchConfig::builder("kitten")
//!     .field("name")
//!     .threshold(0.5)
//!     .build()
//!     .unwrap();
//!
//! let records = vec![
//!     Document::new().with("name", "sitting"),
//!     Document::new().with("name", "mitten"),
//!     Document::new().with("name", "xyz"),
//! ];
//!
//! let set = find_matches(&config, IterSource::new(records)).unwrap();
//! assert_eq!(set.hit_count, 2);
//! assert_eq!(set.results[1].distance, 1);
//! ```

pub mod bound;
pub mod config;
pub mod distance;
pub mod error;
pub mod matcher;
pub mod result;
pub mod score;
pub mod source;
pub mod tokenize;
pub mod value;

// Re-export main types at crate root
pub use bound::{max_similarity, max_similarity_len};
pub use config::{FieldPolicy, MatchConfig, MatchConfigBuilder, MatchMode};
pub use distance::{levenshtein, levenshtein_str};
pub use error::{ConfigError, MatchError, SourceError};
pub use matcher::{find_matches, ScanState, ScanStats, StreamingMatcher};
pub use result::{MatchResult, Matched, ResultSet};
pub use score::{score, Score, Scorer};
pub use source::{CandidateSource, CollectionScan, Gate, IterSource, MemoryCollection, Pulled};
pub use tokenize::{tokenize, tokens, DEFAULT_SEPARATORS};
pub use value::{extract_output, Candidate, Document, ObjectId, Value};
