//! History Integration
//!
//! The waypost router relies on [`History`] providers to read the current address, and to store a
//! history (i.e. a browsers back button) and future (i.e. a browsers forward button).
//!
//! To integrate the router with any kind of host, implement the [`History`] trait. This crate
//! ships an in-memory implementation ([`MemoryHistory`]) and, behind the `web` feature, one that
//! talks to the browser ([`WebHistory`]).
#![warn(missing_docs)]

use std::rc::Rc;

mod memory;
pub use memory::*;

#[cfg(feature = "web")]
mod web;
#[cfg(feature = "web")]
pub use web::*;

/// An integration with some kind of navigation history.
///
/// All methods take `&self`: providers are shared between the router and the host, and keep
/// their mutable state behind interior mutability.
///
/// Depending on your use case, your implementation may deviate from the described procedure.
/// The described behaviors are designed to mimic a web browser, which most users should already
/// know.
pub trait History {
    /// Get the full, absolute URL of the current entry.
    ///
    /// ```rust
    /// # use waypost_history::{History, MemoryHistory};
    /// let history = MemoryHistory::with_initial_path("/users/42");
    /// assert_eq!(history.current_url(), "http://localhost/users/42");
    /// ```
    #[must_use]
    fn current_url(&self) -> String;

    /// Get the path and query of the current entry.
    ///
    /// ```rust
    /// # use waypost_history::{History, MemoryHistory};
    /// let history = MemoryHistory::with_initial_path("/users/42?tab=posts");
    /// assert_eq!(history.current_route(), "/users/42?tab=posts");
    /// ```
    #[must_use]
    fn current_route(&self) -> String {
        route_of(&self.current_url())
    }

    /// Go to another page.
    ///
    /// This should do three things:
    /// 1. Resolve `url` (which may also include a query part) against the current URL.
    /// 2. Move the previous URL to the navigation history.
    /// 3. Clear the navigation future.
    ///
    /// ```rust
    /// # use waypost_history::{History, MemoryHistory};
    /// let history = MemoryHistory::default();
    /// history.push(String::from("/some-other-page"));
    /// assert_eq!(history.current_route(), "/some-other-page");
    /// assert!(history.can_go_back());
    /// ```
    fn push(&self, url: String);

    /// Replace the current page with another one.
    ///
    /// In contrast to [`History::push`], the navigation history and future stay untouched.
    ///
    /// ```rust
    /// # use waypost_history::{History, MemoryHistory};
    /// let history = MemoryHistory::default();
    /// history.replace(String::from("/some-other-page"));
    /// assert_eq!(history.current_route(), "/some-other-page");
    /// assert!(!history.can_go_back());
    /// ```
    fn replace(&self, url: String);

    /// Check whether there is a previous page to navigate back to.
    ///
    /// If a [`History`] cannot know this, it should return [`true`].
    #[must_use]
    fn can_go_back(&self) -> bool {
        true
    }

    /// Go back to a previous page.
    ///
    /// If a [`History`] cannot go to a previous page, it should do nothing. This method might be
    /// called, even if `can_go_back` returns [`false`].
    fn go_back(&self) {}

    /// Check whether there is a future page to navigate forward to.
    ///
    /// If a [`History`] cannot know this, it should return [`true`].
    #[must_use]
    fn can_go_forward(&self) -> bool {
        true
    }

    /// Go forward to a future page.
    ///
    /// If a [`History`] cannot go to a future page, it should do nothing.
    fn go_forward(&self) {}

    /// Provide the [`History`] with an update callback.
    ///
    /// Some providers receive URL updates from outside the router (the back button, for
    /// example). When such updates are received, they should call `callback`, which will cause
    /// the router to reload the current address. Registering a new callback replaces the old one.
    #[allow(unused_variables)]
    fn updater(&self, callback: Rc<dyn Fn()>) {}
}

impl<H: History + ?Sized> History for Rc<H> {
    fn current_url(&self) -> String {
        (**self).current_url()
    }

    fn current_route(&self) -> String {
        (**self).current_route()
    }

    fn push(&self, url: String) {
        (**self).push(url)
    }

    fn replace(&self, url: String) {
        (**self).replace(url)
    }

    fn can_go_back(&self) -> bool {
        (**self).can_go_back()
    }

    fn go_back(&self) {
        (**self).go_back()
    }

    fn can_go_forward(&self) -> bool {
        (**self).can_go_forward()
    }

    fn go_forward(&self) {
        (**self).go_forward()
    }

    fn updater(&self, callback: Rc<dyn Fn()>) {
        (**self).updater(callback)
    }
}

/// Strip the scheme, host and fragment from an absolute URL.
///
/// Relative input is returned unchanged, minus any fragment.
fn route_of(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => match parsed.query() {
            Some(query) => format!("{}?{query}", parsed.path()),
            None => parsed.path().to_string(),
        },
        Err(_) => url.split('#').next().unwrap_or_default().to_string(),
    }
}
