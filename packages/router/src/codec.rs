//! Converting between URL strings and [`Location`]s.

use tracing::warn;
use url::{ParseError, Url};
use urlencoding::{decode, encode};

use crate::{
    error::RouterResult,
    location::{host_port, Location, Query},
    route_definition::{strip_prefix, Params, RouteTable},
};

/// The components of a URL, before routing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteParts {
    /// The scheme of an absolute URL.
    pub scheme: Option<String>,
    /// The host of an absolute URL.
    pub host: Option<String>,
    /// The port of an absolute URL, defaulted from the scheme.
    pub port: Option<u16>,
    /// The path. Never empty.
    pub path: String,
    /// The decoded query.
    pub query: Query,
}

/// Parse a raw query string into a [`Query`].
///
/// A leading `?` is ignored. Pairs are split on `&`, keys and values on the first `=`, and both
/// are percent-decoded. A key without `=` maps to an empty value.
///
/// ```rust
/// # use waypost_router::prelude::*;
/// let query = parse_query_string("?a=1&flag&b=x%3Dy");
/// assert_eq!(query, Query::from([("a", "1"), ("flag", ""), ("b", "x=y")]));
/// assert!(parse_query_string("").is_empty());
/// ```
pub fn parse_query_string(raw: &str) -> Query {
    let raw = raw.strip_prefix('?').unwrap_or(raw);

    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

/// Serialize a [`Query`], including the leading `?`.
///
/// Pairs keep their insertion order; keys and values are percent-encoded. An empty query
/// serializes to an empty string.
///
/// ```rust
/// # use waypost_router::prelude::*;
/// let query = Query::from([("filter", "everything"), ("q", "a b")]);
/// assert_eq!(format_query_string(&query), "?filter=everything&q=a%20b");
/// assert_eq!(format_query_string(&Query::new()), "");
/// ```
pub fn format_query_string(query: &Query) -> String {
    if query.is_empty() {
        return String::new();
    }

    let pairs: Vec<_> = query
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect();
    format!("?{}", pairs.join("&"))
}

/// Split an absolute or relative URL into its components.
///
/// Absolute URLs carry `scheme`, `host` and `port`. Relative URLs carry only `path` and `query`.
/// Fragments are dropped.
///
/// ```rust
/// # use waypost_router::prelude::*;
/// let parts = parse_route("https://example.com/users/42?tab=posts");
/// assert_eq!(parts.scheme.as_deref(), Some("https"));
/// assert_eq!(parts.port, Some(443));
/// assert_eq!(parts.path, "/users/42");
///
/// let parts = parse_route("/users/42");
/// assert_eq!(parts.host, None);
/// ```
pub fn parse_route(url: &str) -> RouteParts {
    match Url::parse(url) {
        Ok(parsed) => RouteParts {
            scheme: Some(parsed.scheme().to_string()),
            host: parsed.host_str().map(str::to_string),
            port: parsed.port_or_known_default(),
            path: non_empty_path(parsed.path()),
            query: parse_query_string(parsed.query().unwrap_or_default()),
        },
        Err(ParseError::RelativeUrlWithoutBase) => parse_relative(url),
        Err(err) => {
            warn!(%err, "treating unparseable url as relative: {url}");
            parse_relative(url)
        }
    }
}

impl RouteParts {
    /// `host[:port]` of an absolute URL, with the port left out when it is the scheme's default.
    pub fn host_port(&self) -> Option<String> {
        let host = self.host.as_deref()?;
        Some(host_port(self.scheme.as_deref(), host, self.port))
    }
}

fn parse_relative(url: &str) -> RouteParts {
    let url = url.split('#').next().unwrap_or_default();
    let (path, query) = url.split_once('?').unwrap_or((url, ""));

    RouteParts {
        path: non_empty_path(path),
        query: parse_query_string(query),
        ..Default::default()
    }
}

fn non_empty_path(path: &str) -> String {
    match path {
        "" => String::from("/"),
        path => path.to_string(),
    }
}

fn decode_component(raw: &str) -> String {
    match decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(err) => {
            warn!(%err, "keeping query component that is not valid utf-8: {raw}");
            raw.to_string()
        }
    }
}

/// Resolve `url` into a [`Location`] using `routes`.
///
/// Paths no route accepts resolve to the [`NOT_FOUND`](crate::route_definition::NOT_FOUND)
/// page.
pub fn get_location(routes: &RouteTable, url: &str) -> Location {
    let RouteParts {
        scheme,
        host,
        port,
        path,
        query,
    } = parse_route(url);
    let found = routes.match_path(&path);

    Location {
        page: found.page,
        params: found.params,
        query,
        path,
        scheme,
        host,
        port,
        url: url.to_string(),
    }
}

/// Serialize `location` back to a path and query.
///
/// Matched locations are formatted through their route. Unmatched locations, and locations
/// whose route can no longer be formatted, keep their stored path. Either way the result carries
/// the table's prefix exactly once. Scheme and host are never included, see [`format_url`] for
/// that.
pub fn to_url_string(routes: &RouteTable, location: &Location) -> String {
    let stored_path = || {
        let prefix = routes.prefix();
        format!("{prefix}{}", strip_prefix(prefix, &location.path))
    };

    let path = if location.is_not_found() {
        stored_path()
    } else {
        routes
            .format(&location.page, &location.params)
            .unwrap_or_else(|err| {
                warn!(%err, "falling back to the stored path of {}", location.path);
                stored_path()
            })
    };

    format!("{path}{}", format_query_string(&location.query))
}

/// Serialize `location` to a fully qualified URL, if it carries a scheme and host.
///
/// The port is left out when it is the scheme's default. Relative locations serialize like
/// [`to_url_string`].
pub fn format_url(routes: &RouteTable, location: &Location) -> String {
    let route = to_url_string(routes, location);

    match (&location.scheme, location.host_port()) {
        (Some(scheme), Some(host)) => format!("{scheme}://{host}{route}"),
        _ => route,
    }
}

/// Build the URL of the route called `name`, with an optional query.
///
/// ```rust
/// # use waypost_router::prelude::*;
/// let mut routes = RouteTable::new();
/// routes.add_route("viewUser", "/users/:id").unwrap();
///
/// let query = Query::from([("tab", "posts")]);
/// let url = get_url(&routes, "viewUser", &Params::from([("id", 12)]), Some(&query)).unwrap();
/// assert_eq!(url, "/users/12?tab=posts");
/// ```
pub fn get_url(
    routes: &RouteTable,
    name: &str,
    params: &Params,
    query: Option<&Query>,
) -> RouterResult<String> {
    let path = routes.format(name, params)?;
    Ok(match query {
        Some(query) => format!("{path}{}", format_query_string(query)),
        None => path,
    })
}
