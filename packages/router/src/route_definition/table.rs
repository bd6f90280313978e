use std::slice;

use tracing::trace;

use super::{normalize_prefix, Params, RouteOptions, RoutePattern};
use crate::error::{RouterError, RouterResult};

/// The page name a path resolves to when no route matches it.
pub const NOT_FOUND: &str = "404";

/// The result of matching a path against a [`RouteTable`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteMatch {
    /// The name of the matched route, or [`NOT_FOUND`].
    pub page: String,
    /// The params captured by the matched route.
    pub params: Params,
}

impl RouteMatch {
    /// The match for a path no route accepts.
    pub fn not_found() -> Self {
        Self {
            page: NOT_FOUND.to_string(),
            params: Params::new(),
        }
    }

    /// Whether this is the [`NOT_FOUND`] match.
    pub fn is_not_found(&self) -> bool {
        self.page == NOT_FOUND
    }
}

/// An ordered collection of [`RoutePattern`]s.
///
/// Registration order is match priority: the first pattern accepting a path wins. Names are
/// unique within a table.
///
/// ```rust
/// # use waypost_router::prelude::*;
/// let mut routes = RouteTable::with_prefix("/myapp");
/// routes.add_route("viewUser", "/users/:id").unwrap();
///
/// let found = routes.match_path("/myapp/users/42");
/// assert_eq!(found.page, "viewUser");
/// assert_eq!(found.params.get("id"), Some(&ParamValue::Number(42)));
///
/// assert!(routes.match_path("/zorg").is_not_found());
/// assert_eq!(routes.format("viewUser", &Params::from([("id", 7)])).unwrap(), "/myapp/users/7");
/// ```
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    prefix: String,
    routes: Vec<RoutePattern>,
}

impl RouteTable {
    /// Create an empty table without a prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table whose routes are mounted below `prefix`.
    pub fn with_prefix(prefix: impl AsRef<str>) -> Self {
        Self {
            prefix: normalize_prefix(prefix.as_ref()),
            routes: Vec::new(),
        }
    }

    /// The normalized prefix of this table, empty if there is none.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Compile `template` with the table's prefix and append it.
    pub fn add_route(&mut self, name: impl Into<String>, template: &str) -> RouterResult {
        let options = RouteOptions::with_prefix(self.prefix.clone());
        self.add_route_with_options(name, template, &options)
    }

    /// Compile `template` with explicit `options` and append it.
    ///
    /// # Error Handling
    /// Fails with [`RouterError::DuplicateRouteName`] if `name` is already registered. The table
    /// is left unchanged in that case.
    pub fn add_route_with_options(
        &mut self,
        name: impl Into<String>,
        template: &str,
        options: &RouteOptions,
    ) -> RouterResult {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(RouterError::DuplicateRouteName(name));
        }

        self.routes
            .push(RoutePattern::compile(name, template, options));
        Ok(())
    }

    /// Resolve `path` to the first matching route, or [`RouteMatch::not_found`].
    ///
    /// `path` must not contain a query or fragment.
    pub fn match_path(&self, path: &str) -> RouteMatch {
        self.routes
            .iter()
            .find_map(|route| {
                route.matches(path).map(|params| RouteMatch {
                    page: route.name().to_string(),
                    params,
                })
            })
            .unwrap_or_else(|| {
                trace!(path, "no route matched");
                RouteMatch::not_found()
            })
    }

    /// Build the path of the route called `name` from `params`.
    pub fn format(&self, name: &str, params: &Params) -> RouterResult<String> {
        self.get(name)
            .ok_or_else(|| RouterError::UnknownRoute(name.to_string()))?
            .format(params)
    }

    /// Get the route called `name`.
    pub fn get(&self, name: &str) -> Option<&RoutePattern> {
        self.routes.iter().find(|route| route.name() == name)
    }

    /// The route names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(RoutePattern::name)
    }

    /// Iterate over the routes in registration order.
    pub fn iter(&self) -> slice::Iter<'_, RoutePattern> {
        self.routes.iter()
    }

    /// The number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no route was added yet.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RoutePattern;
    type IntoIter = slice::Iter<'a, RoutePattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::route_definition::ParamValue;

    fn table() -> RouteTable {
        let mut routes = RouteTable::new();
        routes.add_route("viewUser", "/users/:id").unwrap();
        routes.add_route("viewSettings", "/settings/:id").unwrap();
        routes.add_route("index", "/").unwrap();
        routes
    }

    #[test]
    fn first_registered_match_wins() {
        let mut routes = RouteTable::new();
        routes.add_route("newUser", "/users/new").unwrap();
        routes.add_route("viewUser", "/users/:id").unwrap();
        assert_eq!(routes.match_path("/users/new").page, "newUser");
        assert_eq!(routes.match_path("/users/bob").page, "viewUser");

        let mut reversed = RouteTable::new();
        reversed.add_route("viewUser", "/users/:id").unwrap();
        reversed.add_route("newUser", "/users/new").unwrap();
        assert_eq!(reversed.match_path("/users/new").page, "viewUser");
    }

    #[test]
    fn match_merges_name_and_params() {
        assert_eq!(
            table().match_path("/settings/abc"),
            RouteMatch {
                page: "viewSettings".into(),
                params: Params::from([("id", ParamValue::from("abc"))]),
            }
        );
        assert_eq!(table().match_path("/").page, "index");
    }

    #[test]
    fn unmatched_path_is_not_found() {
        let found = table().match_path("/zorg");
        assert!(found.is_not_found());
        assert_eq!(found.page, NOT_FOUND);
        assert!(found.params.is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut routes = table();
        assert_eq!(
            routes.add_route("viewUser", "/people/:id"),
            Err(RouterError::DuplicateRouteName("viewUser".into()))
        );
        assert_eq!(routes.len(), 3);
        assert_eq!(routes.get("viewUser").unwrap().template(), "/users/:id");
    }

    #[test]
    fn format_known_and_unknown() {
        let routes = table();
        assert_eq!(
            routes.format("viewUser", &Params::from([("id", 12)])),
            Ok("/users/12".to_string())
        );
        assert_eq!(
            routes.format("nope", &Params::new()),
            Err(RouterError::UnknownRoute("nope".into()))
        );
    }

    #[test]
    fn names_keep_registration_order() {
        assert_eq!(
            table().names().collect::<Vec<_>>(),
            ["viewUser", "viewSettings", "index"]
        );
    }

    #[test]
    fn explicit_options_override_table_prefix() {
        let mut routes = RouteTable::with_prefix("/app");
        routes
            .add_route_with_options("health", "/health", &RouteOptions::default())
            .unwrap();
        assert_eq!(routes.format("health", &Params::new()).unwrap(), "/health");
    }
}
