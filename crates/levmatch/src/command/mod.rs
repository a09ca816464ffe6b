//! Command dispatch
//!
//! Commands are registered explicitly into a [`CommandRegistry`] when the
//! host starts. A request document names its command in its first field,
//! Mongo style: `{ "levenshtein": "<collection>", ... }`.

mod levenshtein;

pub use levenshtein::LevenshteinCommand;

use ahash::AHashMap;
use levmatch_core::Document;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{Error, Result};

/// A named operation over a catalog.
pub trait Command: Send + Sync {
    /// Name that selects this command in a request
    fn name(&self) -> &'static str;

    /// One-line description
    fn help(&self) -> &'static str;

    /// Execute `request` and return the encoded reply.
    fn run(&self, catalog: &dyn Catalog, request: &Document) -> Result<serde_json::Value>;
}

/// Dispatch table from command name to command.
#[derive(Default)]
pub struct CommandRegistry {
    commands: AHashMap<&'static str, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration.
    pub fn register(mut self, command: impl Command + 'static) -> Self {
        self.insert(Box::new(command));
        self
    }

    /// Register a command, returning any command it displaced.
    pub fn insert(&mut self, command: Box<dyn Command>) -> Option<Box<dyn Command>> {
        self.commands.insert(command.name(), command)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn help(&self, name: &str) -> Result<&'static str> {
        self.get(name)
            .map(|c| c.help())
            .ok_or_else(|| Error::UnknownCommand(name.to_string()))
    }

    /// Route `request` to the command named by its first field.
    pub fn dispatch(&self, catalog: &dyn Catalog, request: &Document) -> Result<serde_json::Value> {
        let (name, _) = request.first().ok_or(Error::EmptyRequest)?;
        let command = self
            .get(name)
            .ok_or_else(|| Error::UnknownCommand(name.to_string()))?;

        debug!(command = name, "dispatching");
        command.run(catalog, request)
    }
}
