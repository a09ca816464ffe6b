//! The `levenshtein` command
//!
//! Scans one collection of the catalog and returns the records whose
//! comparison field is within the requested similarity of the source term.

use levmatch_core::{Document, MatchConfig, StreamingMatcher, Value};
use tracing::info;

use super::Command;
use crate::catalog::Catalog;
use crate::encode::encode_result_set;
use crate::error::{Error, Result};

/// Edit-distance matching over a catalog collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinCommand;

impl LevenshteinCommand {
    pub const NAME: &'static str = "levenshtein";

    pub fn new() -> Self {
        Self
    }
}

impl Command for LevenshteinCommand {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn help(&self) -> &'static str {
        "Find matches in a collection using the Levenshtein distance and the provided threshold."
    }

    fn run(&self, catalog: &dyn Catalog, request: &Document) -> Result<serde_json::Value> {
        let collection_name = match request.first() {
            Some((_, Value::String(name))) => name.as_str(),
            Some((_, other)) => {
                return Err(Error::Config(format!(
                    "'{}' must name a collection, found {}",
                    Self::NAME,
                    other.kind_name()
                )))
            }
            None => return Err(Error::EmptyRequest),
        };

        let config = MatchConfig::from_request(request)?;
        let collection = catalog.collection(collection_name)?;

        info!(
            collection = collection_name,
            documents = collection.len(),
            mode = %config.mode(),
            threshold = config.threshold(),
            limit = ?config.limit(),
            "running levenshtein"
        );

        let set = StreamingMatcher::new(&config).run(collection.scan())?;
        encode_result_set(&set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use levmatch_core::{ConfigError, MatchError, MemoryCollection, SourceError};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn catalog() -> MemoryCatalog {
        let catalog = MemoryCatalog::new();
        catalog.insert(MemoryCollection::with_documents(
            "words",
            ["sitting", "mitten", "xyz"]
                .iter()
                .map(|n| Document::new().with("name", *n))
                .collect(),
        ));
        catalog
    }

    fn request(extra: serde_json::Value) -> Document {
        let mut base = json!({
            "levenshtein": "words",
            "sourceTerm": "kitten",
            "threshold": 0.5,
            "word": true,
            "sentence": false,
            "separators": " ",
            "field": "name"
        });
        if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                base.insert(k.clone(), v.clone());
            }
        }
        Document::from_json(base).unwrap()
    }

    #[test]
    fn test_runs_against_collection() {
        let reply = LevenshteinCommand
            .run(&catalog(), &request(json!({})))
            .unwrap();
        assert_eq!(reply["hits"], json!(2));
        assert_eq!(reply["level"], json!("word"));
        assert_eq!(reply["results"][0]["match"], json!({ "name": "sitting" }));
        assert_eq!(reply["results"][1]["distance"], json!(1));
    }

    #[test]
    fn test_limit_and_output_field() {
        let reply = LevenshteinCommand
            .run(&catalog(), &request(json!({ "limit": 1, "outputField": "name" })))
            .unwrap();
        assert_eq!(reply["hits"], json!(1));
        assert_eq!(reply["results"][0]["match"], json!("sitting"));
    }

    #[test]
    fn test_unknown_collection() {
        let err = LevenshteinCommand
            .run(&catalog(), &request(json!({ "levenshtein": "missing" })))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Match(MatchError::Source(SourceError::CollectionNotFound(name))) if name == "missing"
        ));
    }

    #[test]
    fn test_bad_config_surfaces_before_scan() {
        let err = LevenshteinCommand
            .run(&catalog(), &request(json!({ "threshold": "high" })))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Match(MatchError::Config(ConfigError::WrongType { .. }))
        ));
    }

    #[test]
    fn test_collection_name_must_be_string() {
        let err = LevenshteinCommand
            .run(&catalog(), &request(json!({ "levenshtein": 1 })))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
