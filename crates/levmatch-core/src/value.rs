//! Document value model
//!
//! Candidate records are [`Document`]s: insertion-ordered maps from field name
//! to a dynamically typed [`Value`]. The set of kinds is closed, so output
//! extraction is a single exhaustive match with "omit" as the fallback.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{json, Map, Number};

/// A 12-byte document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Parse a 24-character hex string.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        let bytes: [u8; 12] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn bytes(&self) -> &[u8; 12] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A dynamically typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    MinKey,
    MaxKey,
    Double(f64),
    Int32(i32),
    Int64(i64),
    String(String),
    Object(Document),
    Array(Vec<Value>),
    ObjectId(ObjectId),
    Bool(bool),
    /// Unix timestamp in milliseconds
    Date(i64),
    /// Internal replication timestamp (seconds in the high word, ordinal in the low word)
    Timestamp(u64),
    Binary(Vec<u8>),
    Undefined,
    Null,
    Regex { pattern: String, options: String },
    DbRef { ns: String, id: ObjectId },
    Code(String),
    Symbol(String),
    CodeWithScope { code: String, scope: Document },
}

impl Value {
    /// Human-readable kind name, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::MinKey => "minKey",
            Value::MaxKey => "maxKey",
            Value::Double(_) => "double",
            Value::Int32(_) => "int",
            Value::Int64(_) => "long",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::ObjectId(_) => "objectId",
            Value::Bool(_) => "bool",
            Value::Date(_) => "date",
            Value::Timestamp(_) => "timestamp",
            Value::Binary(_) => "binData",
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Regex { .. } => "regex",
            Value::DbRef { .. } => "dbPointer",
            Value::Code(_) => "javascript",
            Value::Symbol(_) => "symbol",
            Value::CodeWithScope { .. } => "javascriptWithScope",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view of any number kind.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            Value::Int32(i) => Some(f64::from(*i)),
            Value::Int64(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integer view of the integer kinds.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int32(i) => Some(i64::from(*i)),
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Object(doc) => Some(doc),
            _ => None,
        }
    }

    /// Convert from plain JSON, recognising extended-JSON wrappers such as
    /// `{"$oid": "..."}` and `{"$date": 0}`.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => number_from_json(&n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => match extended_from_json(&map) {
                Some(value) => value,
                None => Value::Object(Document::from_map(map)),
            },
        }
    }

    /// Convert to JSON, emitting extended-JSON wrappers for kinds plain JSON
    /// cannot represent.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::MinKey => json!({ "$minKey": 1 }),
            Value::MaxKey => json!({ "$maxKey": 1 }),
            Value::Double(d) => Number::from_f64(*d)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Int32(i) => json!(i),
            Value::Int64(i) => json!(i),
            Value::String(s) => json!(s),
            Value::Object(doc) => doc.to_json(),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::ObjectId(oid) => json!({ "$oid": oid.to_hex() }),
            Value::Bool(b) => json!(b),
            Value::Date(ms) => json!({ "$date": ms }),
            Value::Timestamp(ts) => json!({ "$timestamp": ts }),
            Value::Binary(bytes) => json!({ "$binary": hex::encode(bytes) }),
            Value::Undefined => json!({ "$undefined": true }),
            Value::Null => serde_json::Value::Null,
            Value::Regex { pattern, options } => {
                json!({ "$regex": pattern, "$options": options })
            }
            Value::DbRef { ns, id } => json!({ "$ref": ns, "$id": { "$oid": id.to_hex() } }),
            Value::Code(code) => json!({ "$code": code }),
            Value::Symbol(symbol) => json!({ "$symbol": symbol }),
            Value::CodeWithScope { code, scope } => {
                json!({ "$code": code, "$scope": scope.to_json() })
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int32(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int64(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Object(doc)
    }
}

fn number_from_json(n: &Number) -> Value {
    if let Some(i) = n.as_i64() {
        return match i32::try_from(i) {
            Ok(small) => Value::Int32(small),
            Err(_) => Value::Int64(i),
        };
    }
    Value::Double(n.as_f64().unwrap_or(f64::NAN))
}

fn extended_from_json(map: &Map<String, serde_json::Value>) -> Option<Value> {
    if !map.keys().all(|k| k.starts_with('$')) {
        return None;
    }
    let only = |key: &str| map.len() == 1 && map.contains_key(key);
    let pair = |a: &str, b: &str| map.len() == 2 && map.contains_key(a) && map.contains_key(b);

    if only("$oid") {
        return map["$oid"]
            .as_str()
            .and_then(ObjectId::parse_hex)
            .map(Value::ObjectId);
    }
    if only("$date") {
        return map["$date"].as_i64().map(Value::Date);
    }
    if only("$timestamp") {
        return map["$timestamp"].as_u64().map(Value::Timestamp);
    }
    if only("$binary") {
        return map["$binary"]
            .as_str()
            .and_then(|h| hex::decode(h).ok())
            .map(Value::Binary);
    }
    if only("$minKey") {
        return Some(Value::MinKey);
    }
    if only("$maxKey") {
        return Some(Value::MaxKey);
    }
    if only("$undefined") {
        return Some(Value::Undefined);
    }
    if only("$symbol") {
        return map["$symbol"].as_str().map(|s| Value::Symbol(s.to_string()));
    }
    if only("$code") {
        return map["$code"].as_str().map(|s| Value::Code(s.to_string()));
    }
    if only("$regex") || pair("$regex", "$options") {
        let pattern = map["$regex"].as_str()?.to_string();
        let options = match map.get("$options") {
            Some(o) => o.as_str()?.to_string(),
            None => String::new(),
        };
        return Some(Value::Regex { pattern, options });
    }
    if pair("$code", "$scope") {
        let code = map["$code"].as_str()?.to_string();
        let scope = match &map["$scope"] {
            serde_json::Value::Object(scope) => Document::from_map(scope.clone()),
            _ => return None,
        };
        return Some(Value::CodeWithScope { code, scope });
    }
    if pair("$ref", "$id") {
        let ns = map["$ref"].as_str()?.to_string();
        let id = map["$id"]
            .get("$oid")?
            .as_str()
            .and_then(ObjectId::parse_hex)?;
        return Some(Value::DbRef { ns, id });
    }
    None
}

/// An insertion-ordered document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    fields: Vec<(String, Value)>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a field, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a dotted path (`a.b.c`), descending through sub-documents.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.get(path) {
            return Some(value);
        }
        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = current.as_document()?.get(segment)?;
        }
        Some(current)
    }

    /// First field, which names the command in a request document.
    pub fn first(&self) -> Option<(&str, &Value)> {
        self.fields.first().map(|(k, v)| (k.as_str(), v))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build from a JSON object; `None` for any other JSON kind.
    pub fn from_json(json: serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Object(map) => Some(Self::from_map(map)),
            _ => None,
        }
    }

    fn from_map(map: Map<String, serde_json::Value>) -> Self {
        Self {
            fields: map
                .into_iter()
                .map(|(k, v)| (k, Value::from_json(v)))
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let map: Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (k, v) in iter {
            doc.insert(k, v);
        }
        doc
    }
}

/// A record that can be matched.
pub trait Candidate {
    /// Look up a field by name or dotted path.
    fn field(&self, path: &str) -> Option<&Value>;

    /// Owned copy of the whole record, emitted when no output field is set.
    fn to_document(&self) -> Document;
}

impl<T: Candidate + ?Sized> Candidate for &T {
    fn field(&self, path: &str) -> Option<&Value> {
        (**self).field(path)
    }

    fn to_document(&self) -> Document {
        (**self).to_document()
    }
}

impl Candidate for Document {
    fn field(&self, path: &str) -> Option<&Value> {
        self.get_path(path)
    }

    fn to_document(&self) -> Document {
        self.clone()
    }
}

/// Type-directed copy of an output field.
///
/// Numbers, text, sub-documents, arrays, ids, booleans, dates and timestamps
/// are copied through (timestamps as dates, min/max keys as their integer
/// view). Every other kind, and an absent field, is omitted.
pub fn extract_output(value: Option<&Value>) -> Option<Value> {
    let value = value?;
    match value {
        Value::MinKey => Some(Value::Int32(0)),
        Value::MaxKey => Some(Value::Int64(0)),
        Value::Double(_)
        | Value::Int32(_)
        | Value::Int64(_)
        | Value::String(_)
        | Value::Object(_)
        | Value::Array(_)
        | Value::ObjectId(_)
        | Value::Bool(_)
        | Value::Date(_) => Some(value.clone()),
        Value::Timestamp(ts) => Some(Value::Date(*ts as i64)),
        Value::Binary(_)
        | Value::Undefined
        | Value::Null
        | Value::Regex { .. }
        | Value::DbRef { .. }
        | Value::Code(_)
        | Value::Symbol(_)
        | Value::CodeWithScope { .. } => None,
    }
}
