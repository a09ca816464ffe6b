//! levmatch command-line host
//!
//! Loads a JSON-lines collection, runs the `levenshtein` command against it
//! and prints the encoded result on stdout.
//!
//! ## Usage
//!
//! ```bash
//! levmatch --collection words.jsonl --source-term kitten --threshold 0.5 --field name
//! ```
//!
//! ## Configuration
//!
//! Every flag can also be set through the environment:
//! - `LEVMATCH_COLLECTION`, `LEVMATCH_SOURCE_TERM`, `LEVMATCH_THRESHOLD`,
//!   `LEVMATCH_FIELD`, `LEVMATCH_SEPARATORS`, `LEVMATCH_LIMIT`,
//!   `LEVMATCH_OUTPUT_FIELD`
//! - `RUST_LOG`: Logging filter (overrides `--log-level`)

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::Parser;
use levmatch::catalog::{load_json_lines, MemoryCatalog};
use levmatch::command::{CommandRegistry, LevenshteinCommand};
use levmatch::encode::encode_with_stats;
use levmatch::Error;
use levmatch_core::{Document, MatchConfig, MemoryCollection, StreamingMatcher, DEFAULT_SEPARATORS};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "levmatch")]
#[command(about = "Find records whose field is within a Levenshtein similarity of a source term")]
#[command(version)]
struct Args {
    /// JSON-lines file, one document per line
    #[arg(short, long, env = "LEVMATCH_COLLECTION")]
    collection: PathBuf,

    /// Raw request document (JSON); replaces the individual match flags
    #[arg(long, conflicts_with_all = ["source_term", "threshold", "field"])]
    request: Option<String>,

    /// Text or sentence to match against
    #[arg(short, long, env = "LEVMATCH_SOURCE_TERM", required_unless_present = "request")]
    source_term: Option<String>,

    /// Minimum similarity in [0, 1]
    #[arg(short, long, env = "LEVMATCH_THRESHOLD", required_unless_present = "request")]
    threshold: Option<f64>,

    /// Field holding the text to compare
    #[arg(short, long, env = "LEVMATCH_FIELD", required_unless_present = "request")]
    field: Option<String>,

    /// Compare token sequences instead of characters
    #[arg(long)]
    sentence: bool,

    /// Token delimiter characters (sentence mode)
    #[arg(long, env = "LEVMATCH_SEPARATORS", default_value = DEFAULT_SEPARATORS)]
    separators: String,

    /// Maximum number of results
    #[arg(short, long, env = "LEVMATCH_LIMIT")]
    limit: Option<i64>,

    /// Emit only this field of each matched record
    #[arg(short, long, env = "LEVMATCH_OUTPUT_FIELD")]
    output_field: Option<String>,

    /// Skip records whose comparison field is missing or not text
    #[arg(long)]
    skip_invalid: bool,

    /// Include scan statistics in the output
    #[arg(long)]
    stats: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    levmatch::tracing::init_with_filter(&args.log_level)?;

    let collection = load_collection(&args.collection)?;
    let name = collection.name().to_string();
    info!(
        collection = %name,
        documents = collection.len(),
        path = %args.collection.display(),
        "collection loaded"
    );

    let request = build_request(&args, &name)?;

    let reply = if args.stats {
        // Statistics are not part of the command reply, so run the matcher directly.
        let config = MatchConfig::from_request(&request).map_err(Error::from)?;
        let set = StreamingMatcher::new(&config)
            .run(collection.scan())
            .map_err(Error::from)?;
        encode_with_stats(&set)?
    } else {
        let catalog = MemoryCatalog::new();
        catalog.insert(collection);
        let registry = CommandRegistry::new().register(LevenshteinCommand::new());
        registry.dispatch(&catalog, &request)?
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&reply)?
    } else {
        serde_json::to_string(&reply)?
    };
    println!("{}", output);

    Ok(())
}

fn load_collection(path: &Path) -> Result<MemoryCollection, Error> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("collection")
        .to_string();
    let file = File::open(path)?;
    load_json_lines(name, BufReader::new(file))
}

/// Request document for the `levenshtein` command, with the collection
/// name always taken from the loaded file.
fn build_request(args: &Args, collection: &str) -> Result<Document, Error> {
    if let Some(raw) = &args.request {
        let parsed = Document::from_json(serde_json::from_str(raw)?)
            .ok_or_else(|| Error::Config("--request must be a JSON object".to_string()))?;
        let mut request = Document::new().with(LevenshteinCommand::NAME, collection);
        for (key, value) in parsed.iter().filter(|(k, _)| *k != LevenshteinCommand::NAME) {
            request.insert(key, value.clone());
        }
        return Ok(request);
    }

    let missing = |flag: &str| Error::Config(format!("--{} is required", flag));

    let mut request = Document::new()
        .with(LevenshteinCommand::NAME, collection)
        .with(
            "sourceTerm",
            args.source_term.clone().ok_or_else(|| missing("source-term"))?,
        )
        .with("threshold", args.threshold.ok_or_else(|| missing("threshold"))?)
        .with("word", !args.sentence)
        .with("sentence", args.sentence)
        .with("separators", args.separators.clone())
        .with("field", args.field.clone().ok_or_else(|| missing("field"))?);

    if let Some(limit) = args.limit {
        request.insert("limit", limit);
    }
    if let Some(output_field) = &args.output_field {
        request.insert("outputField", output_field.clone());
    }
    if args.skip_invalid {
        request.insert("onInvalidField", "skip");
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use levmatch_core::{MatchMode, Value};
    use pretty_assertions::assert_eq;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["levmatch", "--collection", "words.jsonl"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_build_request() {
        let args = parse(&[
            "--source-term",
            "the quick fox",
            "--threshold",
            "0.6",
            "--field",
            "text",
            "--sentence",
            "--separators",
            " ",
            "--limit",
            "2",
            "--output-field",
            "id",
        ]);
        let request = build_request(&args, "words").unwrap();
        assert_eq!(request.first(), Some(("levenshtein", &Value::from("words"))));

        let config = MatchConfig::from_request(&request).unwrap();
        assert_eq!(config.mode(), MatchMode::Sentence);
        assert_eq!(config.source_term(), "the quick fox");
        assert_eq!(config.separators(), " ");
        assert_eq!(config.limit(), Some(2));
        assert_eq!(config.output_field(), Some("id"));
    }

    #[test]
    fn test_raw_request_keeps_loaded_collection() {
        let args = parse(&[
            "--request",
            r#"{"levenshtein": "other", "sourceTerm": "kitten", "threshold": 0.5,
                "word": true, "sentence": false, "field": "name"}"#,
        ]);
        let request = build_request(&args, "words").unwrap();
        assert_eq!(request.first(), Some(("levenshtein", &Value::from("words"))));
        assert_eq!(request.get("sourceTerm"), Some(&Value::from("kitten")));
    }

    #[test]
    fn test_match_flags_required_without_request() {
        let argv = ["levmatch", "--collection", "words.jsonl", "--source-term", "x"];
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_negative_limit_rejected_by_config() {
        let args = parse(&[
            "--source-term",
            "kitten",
            "--threshold",
            "0.5",
            "--field",
            "name",
            "--limit=-1",
        ]);
        let request = build_request(&args, "words").unwrap();
        assert!(MatchConfig::from_request(&request).is_err());
    }
}
