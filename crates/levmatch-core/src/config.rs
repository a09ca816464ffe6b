//! Matching configuration
//!
//! A [`MatchConfig`] is built once per request, either programmatically via
//! [`MatchConfig::builder`] or from a request document via
//! [`MatchConfig::from_request`], and is read-only afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::tokenize::DEFAULT_SEPARATORS;
use crate::value::{Document, Value};

/// Unit of comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Characters of the raw strings
    #[default]
    Word,
    /// Tokens of the delimiter-split strings
    Sentence,
}

impl MatchMode {
    /// Level name reported alongside results
    pub fn level(&self) -> &'static str {
        match self {
            MatchMode::Word => "word",
            MatchMode::Sentence => "sentence",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.level())
    }
}

/// What the matcher does with a candidate whose comparison field is absent
/// or not text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPolicy {
    /// Fail the whole scan
    #[default]
    Abort,
    /// Skip the candidate and keep scanning
    Skip,
}

impl FromStr for FieldPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(FieldPolicy::Abort),
            "skip" => Ok(FieldPolicy::Skip),
            other => Err(ConfigError::InvalidPolicy(other.to_string())),
        }
    }
}

/// One matching request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchConfig {
    source_term: String,
    threshold: f64,
    mode: MatchMode,
    separators: String,
    field: String,
    limit: Option<usize>,
    output_field: Option<String>,
    on_invalid_field: FieldPolicy,
}

impl MatchConfig {
    pub fn builder(source_term: impl Into<String>) -> MatchConfigBuilder {
        MatchConfigBuilder::new(source_term)
    }

    /// Map a request document onto a configuration.
    ///
    /// Required: `sourceTerm` (string), `threshold` (number), `word` and
    /// `sentence` (bool), `field` (string). Optional: `separators` (string),
    /// `limit` (integer), `outputField` (string), `onInvalidField`
    /// (`"abort"` or `"skip"`).
    pub fn from_request(request: &Document) -> Result<Self, ConfigError> {
        let source_term = required_str(request, "sourceTerm")?;
        let threshold = required_number(request, "threshold")?;
        let word = required_bool(request, "word")?;
        let sentence = required_bool(request, "sentence")?;
        let field = required_str(request, "field")?;

        if !word && !sentence {
            warn!("neither word nor sentence mode requested, defaulting to word");
        }
        let mode = if sentence {
            MatchMode::Sentence
        } else {
            MatchMode::Word
        };

        let mut builder = MatchConfigBuilder::new(source_term)
            .threshold(threshold)
            .mode(mode)
            .field(field);

        if let Some(separators) = optional_str(request, "separators")? {
            builder = builder.separators(separators);
        }
        if let Some(limit) = optional_limit(request, "limit")? {
            builder = builder.limit(limit);
        }
        if let Some(output_field) = optional_str(request, "outputField")? {
            builder = builder.output_field(output_field);
        }
        if let Some(policy) = optional_str(request, "onInvalidField")? {
            builder = builder.on_invalid_field(policy.parse()?);
        }

        builder.build()
    }

    pub fn source_term(&self) -> &str {
        &self.source_term
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn separators(&self) -> &str {
        &self.separators
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn output_field(&self) -> Option<&str> {
        self.output_field.as_deref()
    }

    pub fn on_invalid_field(&self) -> FieldPolicy {
        self.on_invalid_field
    }
}

/// Builder for [`MatchConfig`]
#[derive(Debug, Clone)]
pub struct MatchConfigBuilder {
    source_term: String,
    threshold: f64,
    mode: MatchMode,
    separators: String,
    field: String,
    limit: Option<usize>,
    output_field: Option<String>,
    on_invalid_field: FieldPolicy,
}

impl MatchConfigBuilder {
    pub fn new(source_term: impl Into<String>) -> Self {
        Self {
            source_term: source_term.into(),
            threshold: 0.0,
            mode: MatchMode::Word,
            separators: DEFAULT_SEPARATORS.to_string(),
            field: String::new(),
            limit: None,
            output_field: None,
            on_invalid_field: FieldPolicy::Abort,
        }
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn word(self) -> Self {
        self.mode(MatchMode::Word)
    }

    pub fn sentence(self) -> Self {
        self.mode(MatchMode::Sentence)
    }

    pub fn separators(mut self, separators: impl Into<String>) -> Self {
        self.separators = separators.into();
        self
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn output_field(mut self, output_field: impl Into<String>) -> Self {
        self.output_field = Some(output_field.into());
        self
    }

    pub fn on_invalid_field(mut self, policy: FieldPolicy) -> Self {
        self.on_invalid_field = policy;
        self
    }

    pub fn build(self) -> Result<MatchConfig, ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        if self.field.is_empty() {
            return Err(ConfigError::EmptyField);
        }

        Ok(MatchConfig {
            source_term: self.source_term,
            threshold: self.threshold,
            mode: self.mode,
            separators: self.separators,
            field: self.field,
            limit: self.limit,
            output_field: self.output_field,
            on_invalid_field: self.on_invalid_field,
        })
    }
}

fn wrong_type(field: &str, expected: &'static str, found: &Value) -> ConfigError {
    ConfigError::WrongType {
        field: field.to_string(),
        expected,
        found: found.kind_name(),
    }
}

fn required<'a>(request: &'a Document, field: &str) -> Result<&'a Value, ConfigError> {
    request
        .get(field)
        .ok_or_else(|| ConfigError::MissingField(field.to_string()))
}

fn required_str(request: &Document, field: &str) -> Result<String, ConfigError> {
    let value = required(request, field)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| wrong_type(field, "a string", value))
}

fn required_number(request: &Document, field: &str) -> Result<f64, ConfigError> {
    let value = required(request, field)?;
    value.as_f64().ok_or_else(|| wrong_type(field, "a number", value))
}

fn required_bool(request: &Document, field: &str) -> Result<bool, ConfigError> {
    let value = required(request, field)?;
    value.as_bool().ok_or_else(|| wrong_type(field, "a bool", value))
}

fn optional_str(request: &Document, field: &str) -> Result<Option<String>, ConfigError> {
    match request.get(field) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| wrong_type(field, "a string", value)),
    }
}

fn optional_limit(request: &Document, field: &str) -> Result<Option<usize>, ConfigError> {
    let Some(value) = request.get(field) else {
        return Ok(None);
    };
    let limit = match value {
        Value::Double(d) if d.fract() == 0.0 => *d as i64,
        other => other
            .as_i64()
            .ok_or_else(|| wrong_type(field, "an integer", other))?,
    };
    usize::try_from(limit)
        .map(Some)
        .map_err(|_| ConfigError::InvalidLimit(limit))
}
