/// A result whose error type is [`RouterError`].
pub type RouterResult<T = ()> = std::result::Result<T, RouterError>;

/// The errors the router surfaces to its callers.
///
/// Paths that match no route are not errors: they resolve to the
/// [`NOT_FOUND`](crate::route_definition::NOT_FOUND) page. A page refusing to unload is not an
/// error either, it turns the navigation into [`Navigation::Aborted`](crate::navigation::Navigation::Aborted).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A route was formatted without a value for one of its placeholders.
    #[error(r#"no value for parameter "{param}" of route "{route}""#)]
    MissingParam {
        /// The name of the route being formatted.
        route: String,
        /// The placeholder without a value.
        param: String,
    },

    /// A URL was requested for a route name that was never registered.
    #[error(r#"no route for name "{0}""#)]
    UnknownRoute(String),

    /// The query params were changed before any page was loaded.
    #[error("cannot update query params before a page is loaded")]
    NoActivePage,

    /// A route was registered under a name that is already taken.
    #[error(r#"route names must be unique; duplicate name: "{0}""#)]
    DuplicateRouteName(String),
}
