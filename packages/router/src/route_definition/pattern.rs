use std::borrow::Cow;

use tracing::{trace, warn};
use urlencoding::{decode, encode};

use super::{normalize_prefix, split_path, strip_prefix, ParamValue, Params};
use crate::error::{RouterError, RouterResult};

/// Options applied when compiling a [`RoutePattern`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteOptions {
    /// A static path prepended to the template, e.g. `/myapp`.
    ///
    /// The prefix is optional when matching and always added when formatting.
    pub prefix: String,
}

impl RouteOptions {
    /// Options with the given `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

/// A single segment of a route template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteSegment {
    /// A segment that must match verbatim.
    Static(String),
    /// A `:name` placeholder that captures any non-empty segment.
    Dynamic(String),
}

impl RouteSegment {
    fn parse(segment: &str) -> Self {
        match segment.strip_prefix(':') {
            Some(name) if !name.is_empty() => Self::Dynamic(name.to_string()),
            _ => Self::Static(segment.to_string()),
        }
    }

    /// The placeholder name, if this segment is dynamic.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Static(_) => None,
            Self::Dynamic(name) => Some(name),
        }
    }
}

/// A compiled route template, mapping one path shape to one page name.
///
/// ```rust
/// # use waypost_router::prelude::*;
/// let route = RoutePattern::compile("viewUser", "/users/:id", &RouteOptions::default());
///
/// let params = route.matches("/users/42").unwrap();
/// assert_eq!(params.get("id"), Some(&ParamValue::Number(42)));
/// assert_eq!(route.matches("/users"), None);
///
/// assert_eq!(route.format(&Params::from([("id", "bob")])).unwrap(), "/users/bob");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutePattern {
    name: String,
    template: String,
    prefix: String,
    segments: Vec<RouteSegment>,
    trailing_slash: bool,
}

impl RoutePattern {
    /// Compile `template` into a pattern for the page called `name`.
    ///
    /// Templates consist of `/`-separated segments. A segment starting with `:` is a placeholder,
    /// every other segment is static. An empty template is the same as `/`.
    pub fn compile(name: impl Into<String>, template: &str, options: &RouteOptions) -> Self {
        let segments: Vec<_> = split_path(template).map(RouteSegment::parse).collect();
        let trailing_slash = !segments.is_empty() && template.ends_with('/');

        Self {
            name: name.into(),
            template: template.to_string(),
            prefix: normalize_prefix(&options.prefix),
            segments,
            trailing_slash,
        }
    }

    /// The name of the page this pattern routes to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The normalized prefix, empty if there is none.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The compiled segments, prefix excluded.
    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    /// The names of all placeholders, in template order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(RouteSegment::name)
    }

    /// Match `path` against this pattern, returning the captured params.
    ///
    /// The prefix is stripped from `path` once, if present. Segments are compared positionally:
    /// static segments must be equal once both sides are percent-decoded (case-sensitive),
    /// placeholders accept any non-empty segment and capture its percent-decoded value. A single
    /// trailing slash is ignored on both sides.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let path = strip_prefix(&self.prefix, path);
        let mut actual = split_path(path);
        let mut params = Params::new();

        for expected in &self.segments {
            let segment = actual.next()?;
            match expected {
                RouteSegment::Static(s) if unescape(s) == unescape(segment) => {}
                RouteSegment::Static(_) => return None,
                RouteSegment::Dynamic(_) if segment.is_empty() => return None,
                RouteSegment::Dynamic(key) => {
                    params.insert(key.clone(), ParamValue::from_segment(&unescape(segment)));
                }
            }
        }

        if actual.next().is_some() {
            return None;
        }

        trace!(route = %self.name, path, "route matched");
        Some(params)
    }

    /// Build the path for this pattern from `params`, prefix included.
    ///
    /// Values are percent-encoded. Params without a placeholder are ignored.
    pub fn format(&self, params: &Params) -> RouterResult<String> {
        let mut path = self.prefix.clone();

        for segment in &self.segments {
            path.push('/');
            match segment {
                RouteSegment::Static(s) => path.push_str(s),
                RouteSegment::Dynamic(key) => {
                    let value = params.get(key).ok_or_else(|| RouterError::MissingParam {
                        route: self.name.clone(),
                        param: key.clone(),
                    })?;
                    path.push_str(&encode(&value.to_string()));
                }
            }
        }

        if self.segments.is_empty() || self.trailing_slash {
            path.push('/');
        }

        Ok(path)
    }
}

/// Percent-decode a path segment, keeping it as is when it doesn't decode to utf-8.
fn unescape(segment: &str) -> Cow<'_, str> {
    decode(segment).unwrap_or_else(|err| {
        warn!(%err, r#"failed to decode path segment: "{segment}""#);
        Cow::Borrowed(segment)
    })
}
