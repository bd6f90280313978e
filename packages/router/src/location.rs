//! The parsed, canonical representation of where the app is.

use std::slice;

use crate::route_definition::{Params, NOT_FOUND};

/// Query parameters.
///
/// Keys are unique: inserting an existing key replaces its value in place. Iteration and
/// serialization follow insertion order, but equality does not depend on it.
///
/// ```rust
/// # use waypost_router::prelude::*;
/// let mut query = Query::from([("a", "1"), ("b", "2")]);
/// query.insert("a", "3");
/// assert_eq!(query.get("a"), Some("3"));
/// assert_eq!(query, Query::from([("b", "2"), ("a", "3")]));
/// ```
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Query(Vec<(String, String)>);

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key` to `value`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(index).1)
    }

    /// Insert every pair of `other`, overriding existing keys.
    pub fn merge(&mut self, other: Query) {
        for (key, value) in other.0 {
            self.insert(key, value);
        }
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The number of pairs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for Query {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Query {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Query {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Query {
    type Item = &'a (String, String);
    type IntoIter = slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Where the app is: the resolved page plus the parts of the URL it was resolved from.
///
/// `scheme`, `host` and `port` are only present when the source URL was absolute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// The name of the matched page, or [`NOT_FOUND`].
    pub page: String,
    /// The params captured from the path.
    pub params: Params,
    /// The query parameters.
    pub query: Query,
    /// The path, as it appeared in the URL (prefix included).
    pub path: String,
    /// The URL scheme, e.g. `https`.
    pub scheme: Option<String>,
    /// The host name.
    pub host: Option<String>,
    /// The port, defaulted from the scheme when the URL names none.
    pub port: Option<u16>,
    /// The URL this location was resolved from.
    pub url: String,
}

impl Location {
    /// Whether no route matched this location's path.
    pub fn is_not_found(&self) -> bool {
        self.page == NOT_FOUND
    }

    /// `host[:port]`, with the port left out when it is the scheme's default.
    pub fn host_port(&self) -> Option<String> {
        let host = self.host.as_deref()?;
        Some(host_port(self.scheme.as_deref(), host, self.port))
    }
}

pub(crate) fn host_port(scheme: Option<&str>, host: &str, port: Option<u16>) -> String {
    match port {
        Some(port) if Some(port) != scheme.and_then(default_port) => format!("{host}:{port}"),
        _ => host.to_string(),
    }
}

/// The port a scheme uses when a URL doesn't name one.
pub(crate) fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" | "ws" => Some(80),
        "https" | "wss" => Some(443),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_insert_overrides_in_place() {
        let mut query = Query::from([("a", "1"), ("b", "2")]);
        assert_eq!(query.insert("a", "3"), Some("1".to_string()));
        assert_eq!(
            query.iter().collect::<Vec<_>>(),
            [("a", "3"), ("b", "2")]
        );
    }

    #[test]
    fn query_merge_keeps_untouched_keys() {
        let mut query = Query::from([("a", "1"), ("b", "2")]);
        query.merge(Query::from([("b", "20"), ("c", "30")]));
        assert_eq!(query, Query::from([("a", "1"), ("b", "20"), ("c", "30")]));
    }

    #[test]
    fn query_remove() {
        let mut query = Query::from([("a", "1")]);
        assert_eq!(query.remove("a"), Some("1".to_string()));
        assert_eq!(query.remove("a"), None);
        assert!(query.is_empty());
    }

    #[test]
    fn query_equality_ignores_order_but_not_values() {
        assert_eq!(Query::from([("a", "1"), ("b", "2")]), Query::from([("b", "2"), ("a", "1")]));
        assert_ne!(Query::from([("a", "1")]), Query::from([("a", "2")]));
        assert_ne!(Query::from([("a", "1")]), Query::from([("a", "1"), ("b", "")]));
    }

    #[test]
    fn host_port_omits_default_ports() {
        let location = |scheme: &str, port| Location {
            scheme: Some(scheme.to_string()),
            host: Some("example.com".to_string()),
            port: Some(port),
            ..Default::default()
        };

        assert_eq!(location("http", 80).host_port().unwrap(), "example.com");
        assert_eq!(location("https", 443).host_port().unwrap(), "example.com");
        assert_eq!(location("http", 8080).host_port().unwrap(), "example.com:8080");
        assert_eq!(location("https", 80).host_port().unwrap(), "example.com:80");
        assert_eq!(Location::default().host_port(), None);
    }
}
