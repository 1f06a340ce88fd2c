//! # Protected Header
//!
//! The JWZ header is a map from header key to a [`HeaderValue`]. Every header
//! is protected: the whole map is canonicalized into the first compact segment
//! and covered by the message hash.
//!
//! Header values are a closed set (string, list of strings, integer). Any other
//! JSON shape is rejected while decoding, so a wrong type on `alg`,
//! `circuitId` or `crit` surfaces as a [`HeaderError`] at the decode boundary
//! rather than deep inside dispatch.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canonical::CanonicalBytes;
use crate::error::{CanonicalizationError, FormatError, HeaderError};

/// `typ` header: token type tag.
pub const HEADER_TYPE: &str = "typ";
/// `alg` header: proving algorithm identifier.
pub const HEADER_ALG: &str = "alg";
/// `circuitId` header: circuit identifier.
pub const HEADER_CIRCUIT_ID: &str = "circuitId";
/// `crit` header: keys that must be present and understood.
pub const HEADER_CRITICAL: &str = "crit";

/// Default value of the `typ` header.
pub const TOKEN_TYPE: &str = "JWZ";

/// A single header value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, try_from = "Value")]
pub enum HeaderValue {
    /// A string value.
    Text(String),
    /// An array of strings.
    List(Vec<String>),
    /// An integer value.
    Number(i64),
}

impl HeaderValue {
    /// Returns the string if this is a [`HeaderValue::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the list if this is a [`HeaderValue::List`].
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the integer if this is a [`HeaderValue::Number`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn from_json(key: &str, value: Value) -> Result<Self, HeaderError> {
        let unsupported = |found: &str| HeaderError::UnsupportedValue {
            key: key.to_string(),
            found: found.to_string(),
        };
        match value {
            Value::String(s) => Ok(Self::Text(s)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Number)
                .ok_or_else(|| unsupported("non-integer number")),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(unsupported("array with non-string element")),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            Value::Bool(_) => Err(unsupported("boolean")),
            Value::Null => Err(unsupported("null")),
            Value::Object(_) => Err(unsupported("object")),
        }
    }
}

impl TryFrom<Value> for HeaderValue {
    type Error = HeaderError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json("<value>", value)
    }
}

impl From<&str> for HeaderValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<String>> for HeaderValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

impl From<i64> for HeaderValue {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::List(v) => write!(f, "[{}]", v.join(",")),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// The header map of a token.
///
/// Keys are kept in a `BTreeMap`, so iteration order matches the canonical
/// serialization order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Header(BTreeMap<String, HeaderValue>);

impl Header {
    /// An empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default header set for a freshly constructed token:
    /// `alg`, `circuitId`, `crit: [circuitId]` and `typ: "JWZ"`.
    pub fn defaults(alg: &str, circuit_id: &str) -> Self {
        let mut header = Self::new();
        header.insert(HEADER_ALG, alg);
        header.insert(HEADER_CRITICAL, vec![HEADER_CIRCUIT_ID.to_string()]);
        header.insert(HEADER_CIRCUIT_ID, circuit_id);
        header.insert(HEADER_TYPE, TOKEN_TYPE);
        header
    }

    /// Decode the protected segment into a header map.
    ///
    /// Malformed JSON or a non-object document is a [`FormatError`]; a value
    /// of an unsupported type is a [`HeaderError`]. Critical-header presence is
    /// checked separately by [`Header::validate_critical`].
    pub fn from_protected(bytes: &[u8]) -> Result<Self, HeaderDecodeError> {
        if bytes.is_empty() {
            return Err(FormatError::MissingProtected.into());
        }
        let value: Value = serde_json::from_slice(bytes).map_err(|e| FormatError::InvalidJson {
            segment: "protected header",
            reason: e.to_string(),
        })?;
        let Value::Object(map) = value else {
            return Err(FormatError::InvalidJson {
                segment: "protected header",
                reason: "expected a JSON object".to_string(),
            }
            .into());
        };
        let mut header = Self::new();
        for (key, value) in map {
            let value = HeaderValue::from_json(&key, value)?;
            header.0.insert(key, value);
        }
        Ok(header)
    }

    /// Set or replace a header. No validation happens here.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<HeaderValue>,
    ) -> Option<HeaderValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a header, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<HeaderValue> {
        self.0.remove(key)
    }

    /// Look up a header by key.
    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.0.get(key)
    }

    /// Whether a header with this key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterate over headers in canonical (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no headers are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `alg` header.
    pub fn alg(&self) -> Result<&str, HeaderError> {
        self.required_str(HEADER_ALG)
    }

    /// The `circuitId` header.
    pub fn circuit_id(&self) -> Result<&str, HeaderError> {
        self.required_str(HEADER_CIRCUIT_ID)
    }

    /// The `typ` header, if present and a string.
    pub fn token_type(&self) -> Option<&str> {
        self.get(HEADER_TYPE).and_then(HeaderValue::as_str)
    }

    /// Keys listed in `crit`. An absent `crit` means no critical keys.
    pub fn critical(&self) -> Result<Vec<&str>, HeaderError> {
        match self.get(HEADER_CRITICAL) {
            None => Ok(Vec::new()),
            Some(HeaderValue::List(keys)) => Ok(keys.iter().map(String::as_str).collect()),
            Some(_) => Err(HeaderError::InvalidType {
                key: HEADER_CRITICAL.to_string(),
                expected: "an array of strings",
            }),
        }
    }

    /// Check that every key listed in `crit` is present in the header.
    pub fn validate_critical(&self) -> Result<(), HeaderError> {
        for key in self.critical()? {
            if !self.contains(key) {
                return Err(HeaderError::MissingCritical(key.to_string()));
            }
        }
        Ok(())
    }

    /// Canonical (sorted, compact) JSON bytes of the header map, with the
    /// HTML-sensitive characters escaped as Go's `json.Marshal` does.
    pub fn canonical_bytes(&self) -> Result<CanonicalBytes, CanonicalizationError> {
        Ok(CanonicalBytes::new(self)?.escape_html())
    }

    fn required_str(&self, key: &'static str) -> Result<&str, HeaderError> {
        match self.get(key) {
            None => Err(HeaderError::Missing(key)),
            Some(HeaderValue::Text(s)) => Ok(s),
            Some(_) => Err(HeaderError::InvalidType {
                key: key.to_string(),
                expected: "a string",
            }),
        }
    }
}

impl FromIterator<(String, HeaderValue)> for Header {
    fn from_iter<I: IntoIterator<Item = (String, HeaderValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Failure decoding the protected segment: either the bytes are not a JSON
/// object, or a value has an unsupported type.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderDecodeError {
    /// The protected bytes are not a JSON object.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// A header value has an unsupported type.
    #[error(transparent)]
    Header(#[from] HeaderError),
}
