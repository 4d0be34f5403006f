use canonical_json::to_string;
use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::identifiers::ProfileId;
use std::fmt;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// Provided value could not be represented as JSON.
    #[error("invalid JSON structure: {0}")]
    InvalidStructure(String),
    /// Non-finite number (NaN/Infinity) detected.
    #[error("non-finite number detected at {0}")]
    NonFiniteNumber(String),
    /// Generic failure from the canonical JSON writer.
    #[error("other error: {0}")]
    Other(String),
}

/// Result of canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalizationResult {
    /// Canonical UTF-8 bytes for the input value.
    pub bytes: Vec<u8>,
    /// Profile that produced the bytes.
    pub profile_id: ProfileId,
}

impl CanonicalizationResult {
    /// Returns the canonical bytes as a string slice.
    ///
    /// Canonical JSON is always UTF-8, so this only fails if `bytes` was
    /// modified after canonicalization.
    pub fn as_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.bytes)
    }

    /// Consumes the result, returning the canonical text.
    pub fn into_string(self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.bytes)
    }
}

/// Helper for building JSON paths during validation.
#[derive(Debug, Clone)]
struct Path {
    segments: Vec<String>,
}

impl Path {
    fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("[{}]", index));
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Canonicalizer that emits deterministic bytes.
///
/// Object members are ordered by key, no insignificant whitespace is emitted,
/// and strings use the RFC 8785 escaping rules. When number stringification
/// is enabled every JSON number is rendered as a JSON string first, which
/// takes float formatting out of the equation entirely.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    profile: ProfileId,
    stringify_numbers: bool,
}

impl Canonicalizer {
    /// Creates a new canonicalizer for the provided profile.
    pub fn new(profile: ProfileId) -> Self {
        Self {
            profile,
            stringify_numbers: false,
        }
    }

    /// Renders every JSON number as a string before canonicalization.
    pub fn with_stringified_numbers(mut self) -> Self {
        self.stringify_numbers = true;
        self
    }

    /// Profile identifier stamped on every result.
    pub fn profile(&self) -> &ProfileId {
        &self.profile
    }

    /// Produces canonical bytes for a JSON value.
    pub fn canonicalize(&self, value: &Value) -> Result<CanonicalizationResult, CanonicalizationError> {
        if self.stringify_numbers {
            let mut owned = value.clone();
            stringify_numbers(&mut owned);
            return self.emit(&owned);
        }
        self.emit(value)
    }

    /// Serializes `value` through serde and canonicalizes the resulting JSON.
    pub fn canonicalize_serializable<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<CanonicalizationResult, CanonicalizationError> {
        let mut json = serde_json::to_value(value)
            .map_err(|e| CanonicalizationError::InvalidStructure(e.to_string()))?;
        if self.stringify_numbers {
            stringify_numbers(&mut json);
        }
        self.emit(&json)
    }

    fn emit(&self, value: &Value) -> Result<CanonicalizationResult, CanonicalizationError> {
        validate(value, Path::root())?;

        // RFC 8785 canonicalization
        let canonical =
            to_string(value).map_err(|err| CanonicalizationError::Other(err.to_string()))?;
        trace!(profile = %self.profile, len = canonical.len(), "canonicalized value");

        Ok(CanonicalizationResult {
            bytes: canonical.into_bytes(),
            profile_id: self.profile.clone(),
        })
    }
}

/// Rejects numbers the canonical form cannot represent.
fn validate(value: &Value, path: Path) -> Result<(), CanonicalizationError> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                validate(child, path.push_field(key))?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                validate(item, path.push_index(idx))?;
            }
            Ok(())
        }
        Value::Number(num) => match num.as_f64() {
            Some(f) if !f.is_finite() => {
                Err(CanonicalizationError::NonFiniteNumber(path.to_string()))
            }
            _ => Ok(()),
        },
        Value::String(_) | Value::Bool(_) | Value::Null => Ok(()),
    }
}

/// Recursively converts all JSON numbers into strings.
pub fn stringify_numbers(value: &mut Value) {
    match value {
        Value::Number(n) => {
            let s = n.to_string();
            *value = Value::String(s);
        }
        Value::Array(arr) => {
            for v in arr {
                stringify_numbers(v);
            }
        }
        Value::Object(map) => {
            for v in map.values_mut() {
                stringify_numbers(v);
            }
        }
        _ => {}
    }
}
