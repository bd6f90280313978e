use std::{
    collections::{btree_map, BTreeMap},
    fmt::{self, Display},
};

/// The value captured by a dynamic route segment.
///
/// Segments made only of ASCII digits are captured as [`ParamValue::Number`], everything else
/// as [`ParamValue::Str`]. A digit string too large for a `u64` stays a string.
///
/// ```rust
/// # use waypost_router::prelude::*;
/// assert_eq!(ParamValue::from_segment("42"), ParamValue::Number(42));
/// assert_eq!(ParamValue::from_segment("abc"), ParamValue::Str("abc".into()));
/// assert_eq!(ParamValue::from_segment("-1"), ParamValue::Str("-1".into()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum ParamValue {
    /// A segment consisting only of decimal digits.
    Number(u64),
    /// Any other segment.
    Str(String),
}

impl ParamValue {
    /// Convert a decoded path segment into a value, applying numeric coercion.
    pub fn from_segment(segment: &str) -> Self {
        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(number) = segment.parse() {
                return Self::Number(number);
            }
        }

        Self::Str(segment.to_string())
    }

    /// The numeric value, if the segment was numeric.
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Str(_) => None,
        }
    }

    /// The string value, if the segment was not numeric.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Str(s) => Some(s),
        }
    }
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        Self::from_segment(&value.to_string())
    }
}

// negative numbers never come out of a match as numbers, so they don't go in as numbers either
impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::from_segment(&value.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::from_segment(&value.to_string())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Path parameters, keyed by placeholder name.
///
/// ```rust
/// # use waypost_router::prelude::*;
/// let params = Params::from([("id", 42)]);
/// assert_eq!(params.get("id"), Some(&ParamValue::Number(42)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Create an empty set of params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value captured for `key`.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Set the value for `key`, returning the previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Whether a value exists for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// The number of params.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no params.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the params in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ParamValue> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<ParamValue>, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
