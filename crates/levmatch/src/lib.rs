//! # levmatch Shared Library
//!
//! Host-side infrastructure around the matching core:
//! - **command**: the `levenshtein` command and an explicit dispatch table
//! - **catalog**: named collections a command can scan
//! - **encode**: result encoding for the wire
//! - **error**: common error type
//! - **tracing**: logging setup
//!
//! ## Usage
//!
//! ```rust
//! use levmatch::catalog::MemoryCatalog;
//! use levmatch::command::{CommandRegistry, LevenshteinCommand};
//! use levmatch_core::{Document, MemoryCollection};
//! use serde_json::json;
//!
//! let catalog = MemoryCatalog::new();
//! catalog.insert(MemoryCollection::with_documents(
//!     "words",
//!     vec![Document::new().with("name", "mitten")],
//! ));
//!
//! let registry = CommandRegistry::new().register(LevenshteinCommand::new());
//! let request = Document::from_json(json!({
//!     "levenshtein": "words",
//!     "sourceTerm": "kitten",
//!     "threshold": 0.5,
//!     "word": true,
//!     "sentence": false,
//!     "separators": " ",
//!     "field": "name"
//! }))
//! .unwrap();
//!
//! let reply = registry.dispatch(&catalog, &request).unwrap();
//! assert_eq!(reply["hits"], 1);
//! ```

pub mod catalog;
pub mod command;
pub mod encode;
pub mod error;
pub mod tracing;

pub use error::{Error, Result};
