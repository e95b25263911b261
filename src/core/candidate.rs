use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::ConfigError;

/// One selectable item: a plain string, or a keyed record whose display text
/// lives at the widget's lookup key.
///
/// The untagged representation lets a retrieval payload (a JSON array of
/// strings or of objects) deserialize straight into candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Candidate {
    Text(String),
    Record(IndexMap<String, Value>),
}

impl Candidate {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn record(fields: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self::Record(fields.into_iter().collect())
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Text used for matching and rendering. Records resolve through the
    /// lookup key; a record without a string at that key has no display text.
    pub fn display_text(&self, lookup_key: Option<&str>) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            Self::Record(fields) => fields.get(lookup_key?).and_then(Value::as_str),
        }
    }
}

impl From<&str> for Candidate {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Candidate {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Shape and configuration must agree before any filtering occurs: records
/// need a lookup key, plain strings must not have one, and one collection
/// never mixes the two shapes.
pub fn validate_shape(
    candidates: &[Candidate],
    lookup_key: Option<&str>,
) -> Result<(), ConfigError> {
    let mut saw_text = false;
    let mut saw_record = false;
    for candidate in candidates {
        match candidate {
            Candidate::Text(_) => saw_text = true,
            Candidate::Record(_) => saw_record = true,
        }
    }

    if saw_text && saw_record {
        return Err(ConfigError::MixedCandidateShapes);
    }
    if saw_record && lookup_key.is_none() {
        return Err(ConfigError::LookupKeyRequired);
    }
    if saw_text && lookup_key.is_some() {
        return Err(ConfigError::LookupKeyNotAllowed);
    }
    Ok(())
}
