use std::{cell::RefCell, rc::Rc};

use gloo::events::EventListener;
use tracing::error;
use wasm_bindgen::JsValue;
use web_sys::{window, Window};

use crate::History;

/// A [`History`] that integrates with a browser via the [History API] and [Location API].
///
/// [History API]: https://developer.mozilla.org/en-US/docs/Web/API/History_API
/// [Location API]: https://developer.mozilla.org/en-US/docs/Web/API/Location
///
/// The provider stores no state of its own: the browser owns the address bar. Prefix handling is
/// left to the router, which hands this provider complete paths.
pub struct WebHistory {
    history: web_sys::History,
    listener_navigation: RefCell<Option<EventListener>>,
    window: Window,
}

impl Default for WebHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl WebHistory {
    /// Create a new [`WebHistory`].
    ///
    /// # Panic
    /// If there is no `window`, or the `window` has no `history`.
    pub fn new() -> Self {
        let window = window().expect("access to `window`");
        let history = window.history().expect("`window` has access to `history`");

        Self {
            history,
            listener_navigation: RefCell::new(None),
            window,
        }
    }

    /// The browser window this provider talks to.
    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl History for WebHistory {
    fn current_url(&self) -> String {
        self.window.location().href().unwrap_or_else(|err| {
            error!("failed to read the current url: {err:?}");
            String::from("/")
        })
    }

    fn push(&self, url: String) {
        if let Err(err) = self
            .history
            .push_state_with_url(&JsValue::NULL, "", Some(&url))
        {
            error!("failed to push state for {url}: {err:?}");
        }
    }

    fn replace(&self, url: String) {
        if let Err(err) = self
            .history
            .replace_state_with_url(&JsValue::NULL, "", Some(&url))
        {
            error!("failed to replace state with {url}: {err:?}");
        }
    }

    fn go_back(&self) {
        if let Err(err) = self.history.back() {
            error!("failed to go back: {err:?}");
        }
    }

    fn go_forward(&self) {
        if let Err(err) = self.history.forward() {
            error!("failed to go forward: {err:?}");
        }
    }

    fn updater(&self, callback: Rc<dyn Fn()>) {
        let listener = EventListener::new(&self.window, "popstate", move |_| callback());
        *self.listener_navigation.borrow_mut() = Some(listener);
    }
}
