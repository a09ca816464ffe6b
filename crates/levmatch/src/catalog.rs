//! Named collections available to commands

use std::io::BufRead;
use std::sync::Arc;

use ahash::AHashMap;
use levmatch_core::{Document, MemoryCollection, SourceError};
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{Error, Result};

/// Resolves a collection name to something a command can scan.
pub trait Catalog: Send + Sync {
    fn collection(&self, name: &str) -> std::result::Result<Arc<MemoryCollection>, SourceError>;

    /// Names of all collections, sorted.
    fn names(&self) -> Vec<String>;
}

/// Thread-safe in-memory catalog.
///
/// Readers get a shared handle to the collection, so replacing a collection
/// never disturbs a scan that is already running.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    collections: RwLock<AHashMap<String, Arc<MemoryCollection>>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection under its own name, returning the one it replaced.
    pub fn insert(&self, collection: MemoryCollection) -> Option<Arc<MemoryCollection>> {
        let name = collection.name().to_string();
        self.collections.write().insert(name, Arc::new(collection))
    }

    pub fn remove(&self, name: &str) -> Option<Arc<MemoryCollection>> {
        self.collections.write().remove(name)
    }

    pub fn len(&self) -> usize {
        self.collections.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.read().is_empty()
    }
}

impl Catalog for MemoryCatalog {
    fn collection(
        &self,
        name: &str,
    ) -> std::result::Result<Arc<MemoryCollection>, SourceError> {
        self.collections
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::CollectionNotFound(name.to_string()))
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.collections.read().keys().cloned().collect();
        names.sort();
        names
    }
}

/// Read a JSON-lines stream into a collection, one document per line.
///
/// Blank lines are ignored; any other line must hold a JSON object.
pub fn load_json_lines(name: impl Into<String>, reader: impl BufRead) -> Result<MemoryCollection> {
    let mut collection = MemoryCollection::new(name);

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let json: serde_json::Value = serde_json::from_str(&line)?;
        let found = json_kind(&json);
        let document = Document::from_json(json).ok_or(Error::InvalidDocument {
            line: idx + 1,
            found,
        })?;
        collection.insert(document);
    }

    debug!(
        collection = collection.name(),
        documents = collection.len(),
        "loaded json lines"
    );
    Ok(collection)
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
