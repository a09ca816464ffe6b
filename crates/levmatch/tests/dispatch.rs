//! Request dispatch through the command registry

use levmatch::catalog::{load_json_lines, MemoryCatalog};
use levmatch::command::{CommandRegistry, LevenshteinCommand};
use levmatch::Error;
use levmatch_core::{Document, MatchError};
use pretty_assertions::assert_eq;
use serde_json::json;

const PHRASES: &str = r#"{"id": 1, "text": "the quick brown fox"}
{"id": 2, "text": "a lazy dog"}
{"id": 3, "text": "the quick fox"}
{"id": 4, "body": "no text field here"}
{"id": 5, "text": "the slow fox"}
"#;

fn setup() -> (CommandRegistry, MemoryCatalog) {
    let catalog = MemoryCatalog::new();
    catalog.insert(load_json_lines("phrases", PHRASES.as_bytes()).unwrap());
    let registry = CommandRegistry::new().register(LevenshteinCommand::new());
    (registry, catalog)
}

fn request(extra: serde_json::Value) -> Document {
    let mut base = json!({
        "levenshtein": "phrases",
        "sourceTerm": "the quick fox",
        "threshold": 0.6,
        "word": false,
        "sentence": true,
        "separators": " ",
        "field": "text",
        "outputField": "id"
    });
    if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    Document::from_json(base).unwrap()
}

#[test]
fn test_missing_field_aborts_scan() {
    let (registry, catalog) = setup();
    let err = registry.dispatch(&catalog, &request(json!({}))).unwrap_err();
    assert!(matches!(
        err,
        Error::Match(MatchError::MissingField { position: 3, .. })
    ));
}

#[test]
fn test_skip_policy_reaches_later_records() {
    let (registry, catalog) = setup();
    let reply = registry
        .dispatch(&catalog, &request(json!({ "onInvalidField": "skip" })))
        .unwrap();

    assert_eq!(
        reply,
        json!({
            "results": [
                { "match": 1, "score": 0.75, "distance": 1 },
                { "match": 3, "score": 1.0, "distance": 0 },
                { "match": 5, "score": 1.0 - 1.0 / 3.0, "distance": 1 }
            ],
            "hits": 3,
            "level": "sentence"
        })
    );
}

#[test]
fn test_limit_stops_before_bad_record() {
    let (registry, catalog) = setup();
    let reply = registry
        .dispatch(&catalog, &request(json!({ "limit": 2 })))
        .unwrap();
    assert_eq!(reply["hits"], json!(2));
    assert_eq!(reply["results"][1]["match"], json!(3));
}

#[test]
fn test_word_level_reply() {
    let (registry, catalog) = setup();
    let reply = registry
        .dispatch(
            &catalog,
            &request(json!({
                "sourceTerm": "the slow fix",
                "word": true,
                "sentence": false,
                "threshold": 0.8,
                "onInvalidField": "skip",
                "limit": 1
            })),
        )
        .unwrap();
    assert_eq!(reply["level"], json!("word"));
    assert_eq!(reply["hits"], json!(1));
    assert_eq!(reply["results"][0]["match"], json!(5));
}
