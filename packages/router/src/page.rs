use std::rc::Rc;

use crate::location::Location;

/// A page the router can navigate to.
///
/// Every hook is optional: a page that doesn't override one behaves as if it always succeeded.
/// Hooks take `&self`, pages that need to change their own state keep it behind interior
/// mutability.
///
/// ```rust
/// # use std::cell::Cell;
/// # use waypost_router::prelude::*;
/// struct Editor {
///     dirty: Cell<bool>,
/// }
///
/// impl Page for Editor {
///     type Output = String;
///
///     fn on_load(&self, location: &Location) -> Option<String> {
///         Some(format!("editing {}", location.path))
///     }
///
///     fn can_unload(&self, _: &Location) -> bool {
///         !self.dirty.get()
///     }
/// }
/// ```
pub trait Page {
    /// The value produced by [`Page::on_load`], handed back to whoever triggered the navigation.
    type Output;

    /// Called after the page became the current page.
    ///
    /// The router's state is already updated when this runs. Whatever is returned is passed
    /// through to the caller uninterpreted.
    #[allow(unused_variables)]
    fn on_load(&self, location: &Location) -> Option<Self::Output> {
        None
    }

    /// Called before the router navigates away from the page.
    #[allow(unused_variables)]
    fn on_unload(&self, location: &Location) {}

    /// Whether the router may navigate away from the page.
    ///
    /// Returning [`false`] aborts the navigation before anything happens.
    #[allow(unused_variables)]
    fn can_unload(&self, location: &Location) -> bool {
        true
    }
}

impl<P: Page + ?Sized> Page for Rc<P> {
    type Output = P::Output;

    fn on_load(&self, location: &Location) -> Option<Self::Output> {
        (**self).on_load(location)
    }

    fn on_unload(&self, location: &Location) {
        (**self).on_unload(location)
    }

    fn can_unload(&self, location: &Location) -> bool {
        (**self).can_unload(location)
    }
}
