//! Result encoding
//!
//! Wire shape of a finished scan:
//!
//! ```json
//! { "results": [ { "match": ..., "score": 0.83, "distance": 1 } ], "hits": 1, "level": "word" }
//! ```
//!
//! A row has no `match` key when an output field was requested and its
//! value kind is not emitted.

use levmatch_core::{ResultSet, ScanStats};
use serde_json::json;

use crate::error::Result;

/// Encode a result set in the wire shape.
pub fn encode_result_set(set: &ResultSet) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(set)?)
}

/// Encode a result set with its scan statistics under `stats`.
pub fn encode_with_stats(set: &ResultSet) -> Result<serde_json::Value> {
    let mut encoded = encode_result_set(set)?;
    if let Some(object) = encoded.as_object_mut() {
        object.insert("stats".to_string(), encode_stats(&set.stats));
    }
    Ok(encoded)
}

pub fn encode_stats(stats: &ScanStats) -> serde_json::Value {
    json!({
        "pulled": stats.pulled,
        "skippedDuplicate": stats.skipped_duplicate,
        "skippedFiltered": stats.skipped_filtered,
        "skippedInvalid": stats.skipped_invalid,
        "pruned": stats.pruned,
        "scored": stats.scored,
        "elapsedMicros": stats.elapsed_us,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use levmatch_core::{find_matches, Document, IterSource, MatchConfig};
    use pretty_assertions::assert_eq;

    fn result_set() -> ResultSet {
        let config = MatchConfig::builder("kitten")
            .field("name")
            .threshold(0.5)
            .output_field("name")
            .build()
            .unwrap();
        let records = vec![
            Document::new().with("name", "mitten"),
            Document::new().with("name", "xyz"),
        ];
        find_matches(&config, IterSource::new(records)).unwrap()
    }

    #[test]
    fn test_wire_shape() {
        let encoded = encode_result_set(&result_set()).unwrap();
        assert_eq!(encoded["hits"], json!(1));
        assert_eq!(encoded["level"], json!("word"));
        assert_eq!(encoded["results"][0]["match"], json!("mitten"));
        assert_eq!(encoded["results"][0]["distance"], json!(1));
        assert!(encoded.get("stats").is_none());
    }

    #[test]
    fn test_with_stats() {
        let encoded = encode_with_stats(&result_set()).unwrap();
        assert_eq!(encoded["stats"]["pulled"], json!(2));
        assert_eq!(encoded["stats"]["pruned"], json!(1));
        assert_eq!(encoded["stats"]["scored"], json!(1));
    }
}
