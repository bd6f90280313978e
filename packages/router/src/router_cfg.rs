use crate::route_definition::normalize_prefix;

/// Global configuration options for the [`Navigator`](crate::navigator::Navigator).
///
/// This implements [`Default`] and follows the builder pattern, so you can use it like this:
/// ```rust
/// # use waypost_router::prelude::*;
/// let cfg = NavigatorConfig::default().prefix("/myapp/");
/// assert_eq!(cfg.current_prefix(), "/myapp");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigatorConfig {
    pub(crate) prefix: String,
}

impl NavigatorConfig {
    /// The path the app is mounted at.
    ///
    /// Every route is registered below it, every URL handed to the host carries it exactly once,
    /// and incoming URLs are accepted with or without it. The prefix is normalized to start with
    /// a `/` and to not end with one.
    ///
    /// Defaults to no prefix.
    pub fn prefix(self, prefix: impl AsRef<str>) -> Self {
        Self {
            prefix: normalize_prefix(prefix.as_ref()),
        }
    }

    /// The normalized prefix, empty if there is none.
    pub fn current_prefix(&self) -> &str {
        &self.prefix
    }
}
