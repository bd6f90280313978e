use std::{cell::RefCell, rc::Rc};

use tracing::{error, warn};
use url::Url;

use crate::History;

/// The origin every [`MemoryHistory`] starts from unless told otherwise.
pub const DEFAULT_ORIGIN: &str = "http://localhost";

struct MemoryHistoryState {
    current: Url,
    history: Vec<Url>,
    future: Vec<Url>,
}

/// A [`History`] provider that stores all navigation information in memory.
///
/// Going back and forward notifies the callback registered through [`History::updater`], the
/// same way a browser fires `popstate`. Pushing and replacing does not.
pub struct MemoryHistory {
    state: RefCell<MemoryHistoryState>,
    callback: RefCell<Option<Rc<dyn Fn()>>>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::with_initial_path("/")
    }
}

impl MemoryHistory {
    /// Create a [`MemoryHistory`] starting at `path`, on the [`DEFAULT_ORIGIN`].
    ///
    /// ```rust
    /// # use waypost_history::{History, MemoryHistory};
    /// let history = MemoryHistory::with_initial_path("/users/42");
    /// assert_eq!(history.current_route(), "/users/42");
    /// assert_eq!(history.can_go_back(), false);
    /// ```
    ///
    /// # Panic
    /// If `path` cannot be resolved against the default origin.
    pub fn with_initial_path(path: impl ToString) -> Self {
        let origin = Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid url");
        let path = path.to_string();
        let current = origin
            .join(&path)
            .unwrap_or_else(|err| panic!("initial path {path:?} is not a valid url path: {err}"));

        Self::starting_at(current)
    }

    /// Create a [`MemoryHistory`] starting at an absolute `url`.
    ///
    /// ```rust
    /// # use waypost_history::{History, MemoryHistory};
    /// let history = MemoryHistory::with_initial_url("https://example.com:8443/app").unwrap();
    /// assert_eq!(history.current_url(), "https://example.com:8443/app");
    /// ```
    pub fn with_initial_url(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::starting_at(Url::parse(url)?))
    }

    fn starting_at(current: Url) -> Self {
        Self {
            state: MemoryHistoryState {
                current,
                history: Vec::new(),
                future: Vec::new(),
            }
            .into(),
            callback: RefCell::new(None),
        }
    }

    /// The number of entries behind the current one.
    pub fn back_len(&self) -> usize {
        self.state.borrow().history.len()
    }

    /// The number of entries ahead of the current one.
    pub fn forward_len(&self) -> usize {
        self.state.borrow().future.len()
    }

    fn resolve(&self, url: &str) -> Option<Url> {
        if url.starts_with("//") {
            error!(r#"cannot navigate to urls starting with "//", url: {url}"#);
            return None;
        }

        match self.state.borrow().current.join(url) {
            Ok(resolved) => Some(resolved),
            Err(err) => {
                warn!(%err, "ignoring history entry that is not a valid url: {url}");
                None
            }
        }
    }

    fn notify(&self) {
        // clone out of the cell so the callback may register a new one
        let callback = self.callback.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl History for MemoryHistory {
    fn current_url(&self) -> String {
        self.state.borrow().current.to_string()
    }

    fn push(&self, url: String) {
        let Some(new) = self.resolve(&url) else {
            return;
        };

        let mut write = self.state.borrow_mut();
        // don't push the same url twice
        if write.current == new {
            return;
        }
        let old = std::mem::replace(&mut write.current, new);
        write.history.push(old);
        write.future.clear();
    }

    fn replace(&self, url: String) {
        if let Some(new) = self.resolve(&url) {
            self.state.borrow_mut().current = new;
        }
    }

    fn can_go_back(&self) -> bool {
        !self.state.borrow().history.is_empty()
    }

    fn go_back(&self) {
        let moved = {
            let mut write = self.state.borrow_mut();
            match write.history.pop() {
                Some(last) => {
                    let old = std::mem::replace(&mut write.current, last);
                    write.future.push(old);
                    true
                }
                None => false,
            }
        };

        if moved {
            self.notify();
        }
    }

    fn can_go_forward(&self) -> bool {
        !self.state.borrow().future.is_empty()
    }

    fn go_forward(&self) {
        let moved = {
            let mut write = self.state.borrow_mut();
            match write.future.pop() {
                Some(next) => {
                    let old = std::mem::replace(&mut write.current, next);
                    write.history.push(old);
                    true
                }
                None => false,
            }
        };

        if moved {
            self.notify();
        }
    }

    fn updater(&self, callback: Rc<dyn Fn()>) {
        *self.callback.borrow_mut() = Some(callback);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn push_resolves_against_current() {
        let history = MemoryHistory::with_initial_path("/users/42");
        history.push("settings".to_string());
        assert_eq!(history.current_route(), "/users/settings");
    }

    #[test]
    fn push_ignores_protocol_relative() {
        let history = MemoryHistory::default();
        history.push("//evil.example/".to_string());
        assert_eq!(history.current_url(), "http://localhost/");
        assert!(!history.can_go_back());
    }

    #[test]
    fn push_same_url_twice_is_a_single_entry() {
        let history = MemoryHistory::default();
        history.push("/a".to_string());
        history.push("/a".to_string());
        assert_eq!(history.back_len(), 1);
    }

    #[test]
    fn push_clears_future() {
        let history = MemoryHistory::default();
        history.push("/a".to_string());
        history.go_back();
        assert!(history.can_go_forward());

        history.push("/b".to_string());
        assert!(!history.can_go_forward());
        assert_eq!(history.current_route(), "/b");
    }

    #[test]
    fn back_and_forward_notify() {
        let history = MemoryHistory::default();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        history.updater(Rc::new(move || counter.set(counter.get() + 1)));

        history.push("/a".to_string());
        assert_eq!(calls.get(), 0);

        history.go_back();
        assert_eq!(history.current_route(), "/");
        history.go_forward();
        assert_eq!(history.current_route(), "/a");
        assert_eq!(calls.get(), 2);

        // nothing ahead, nothing to notify
        history.go_forward();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn replace_keeps_history_and_future() {
        let history = MemoryHistory::default();
        history.push("/a".to_string());
        history.push("/b".to_string());
        history.go_back();

        history.replace("/c?x=1".to_string());
        assert_eq!(history.current_route(), "/c?x=1");
        assert_eq!(history.back_len(), 1);
        assert_eq!(history.forward_len(), 1);
    }

    #[test]
    fn initial_url_must_be_absolute() {
        assert!(MemoryHistory::with_initial_url("/relative").is_err());
    }
}
