use std::{
    cell::{Ref, RefCell},
    collections::HashMap,
    rc::Rc,
};

use tracing::{debug, warn};
use url::{Position, Url};
use waypost_history::History;

use crate::{
    codec::{get_location, get_url, to_url_string},
    error::{RouterError, RouterResult},
    location::{Location, Query},
    navigation::Navigation,
    page::Page,
    route_definition::{strip_prefix, Params, RouteTable, NOT_FOUND},
    router_cfg::NavigatorConfig,
};

type PageHandle<O> = Rc<dyn Page<Output = O>>;

#[derive(Clone, Copy, Debug)]
enum HistoryMethod {
    Push,
    Replace,
}

struct NavigatorState<O> {
    current_page: Option<PageHandle<O>>,
    current_location: Option<Location>,
}

/// The core of the router.
///
/// Combines a [`RouteTable`], the registered [`Page`]s and a [`History`] provider. The navigator
/// owns the current [`Location`] and page, runs the page lifecycle hooks, and mediates every
/// change to the host's history.
///
/// A navigator starts out with nothing loaded. [`Navigator::start`] (or [`Navigator::load_url`])
/// loads the first page; after that every navigation replaces the current page and location.
///
/// ```rust
/// # use std::rc::Rc;
/// # use waypost_history::{History, MemoryHistory};
/// # use waypost_router::prelude::*;
/// struct UserPage;
///
/// impl Page for UserPage {
///     type Output = String;
///
///     fn on_load(&self, location: &Location) -> Option<String> {
///         Some(format!("user {}", location.params.get("id")?))
///     }
/// }
///
/// let history = Rc::new(MemoryHistory::default());
/// let navigator = Navigator::new(history.clone(), NavigatorConfig::default().prefix("/myapp"));
/// navigator.add_page("viewUser", "/users/:id", UserPage).unwrap();
///
/// let loaded = navigator.goto_url("/users/42");
/// assert_eq!(loaded, Navigation::Loaded(Some("user 42".to_string())));
/// assert_eq!(history.current_route(), "/myapp/users/42");
/// ```
///
/// # Partial failures
/// Lifecycle hooks are not guarded. If a hook panics, the panic reaches the caller of the
/// navigation method, and the navigator stays wherever the transition was interrupted: history
/// may already point at the new URL, and the current page may already be the new one, even
/// though its `on_load` never completed.
pub struct Navigator<O: 'static = ()> {
    pub(crate) history: Rc<dyn History>,
    prefix: String,
    routes: RefCell<RouteTable>,
    pages: RefCell<HashMap<String, PageHandle<O>>>,
    state: RefCell<NavigatorState<O>>,
}

impl<O: 'static> Navigator<O> {
    /// Create a navigator on top of `history`.
    pub fn new(history: impl History + 'static, config: NavigatorConfig) -> Self {
        Self {
            history: Rc::new(history),
            routes: RefCell::new(RouteTable::with_prefix(&config.prefix)),
            prefix: config.prefix,
            pages: RefCell::new(HashMap::new()),
            state: RefCell::new(NavigatorState {
                current_page: None,
                current_location: None,
            }),
        }
    }

    /// Register `page` under `name`, reachable through `template`.
    ///
    /// Routes are matched in registration order. Register a page under
    /// [`NOT_FOUND`] to render something for URLs no route accepts.
    ///
    /// # Error Handling
    /// Fails with [`RouterError::DuplicateRouteName`] if `name` is already taken.
    pub fn add_page(
        &self,
        name: &str,
        template: &str,
        page: impl Page<Output = O> + 'static,
    ) -> RouterResult {
        if self.pages.borrow().contains_key(name) {
            return Err(RouterError::DuplicateRouteName(name.to_string()));
        }

        self.routes.borrow_mut().add_route(name, template)?;
        self.pages
            .borrow_mut()
            .insert(name.to_string(), Rc::new(page));
        Ok(())
    }

    /// Register the page shown for URLs no route accepts, without giving it a route of its own.
    ///
    /// # Error Handling
    /// Fails with [`RouterError::DuplicateRouteName`] if a [`NOT_FOUND`] page already exists.
    pub fn set_not_found_page(&self, page: impl Page<Output = O> + 'static) -> RouterResult {
        let mut pages = self.pages.borrow_mut();
        if pages.contains_key(NOT_FOUND) {
            return Err(RouterError::DuplicateRouteName(NOT_FOUND.to_string()));
        }

        pages.insert(NOT_FOUND.to_string(), Rc::new(page));
        Ok(())
    }

    /// Hook into the host's navigation notifications and load the host's current address.
    ///
    /// Whenever the host navigates on its own (back and forward buttons), the navigator reloads
    /// the new address with [`Navigator::load_url`].
    pub fn start(self: &Rc<Self>) -> Option<O> {
        let navigator = Rc::downgrade(self);
        self.history.updater(Rc::new(move || {
            if let Some(navigator) = navigator.upgrade() {
                let url = navigator.history.current_url();
                debug!(%url, "host navigated");
                navigator.load_url(&url);
            }
        }));

        self.load_url(&self.history.current_url())
    }

    /// Make the page behind `url` the current page, without touching history or unloading the
    /// current page.
    ///
    /// Falls back to the [`NOT_FOUND`] page if no route accepts `url`. Returns whatever the new
    /// page's [`Page::on_load`] returns.
    pub fn load_url(&self, url: &str) -> Option<O> {
        let url = self.qualify(url);
        let location = get_location(&self.routes.borrow(), &url);

        let page = {
            let pages = self.pages.borrow();
            pages
                .get(&location.page)
                .or_else(|| pages.get(NOT_FOUND))
                .cloned()
        };
        if page.is_none() {
            warn!(%url, "no page for {}, and no {NOT_FOUND} page to fall back to", location.page);
        }
        debug!(%url, page = %location.page, "loading page");

        {
            let mut state = self.state.borrow_mut();
            state.current_page = page.clone();
            state.current_location = Some(location.clone());
        }

        page?.on_load(&location)
    }

    /// Navigate to `url`, adding a history entry.
    pub fn goto_url(&self, url: &str) -> Navigation<O> {
        self.navigate(url, HistoryMethod::Push)
    }

    /// Navigate to `url`, replacing the current history entry.
    pub fn replace_url(&self, url: &str) -> Navigation<O> {
        self.navigate(url, HistoryMethod::Replace)
    }

    fn navigate(&self, url: &str, method: HistoryMethod) -> Navigation<O> {
        let url = self.qualify(url);

        if let Some((page, location)) = self.current() {
            if !page.can_unload(&location) {
                debug!(%url, "navigation aborted by {}", location.page);
                return Navigation::Aborted;
            }
            page.on_unload(&location);
        }

        let entry = self.history_entry(&url);
        debug!(?method, %entry, "updating history");
        match method {
            HistoryMethod::Push => self.history.push(entry),
            HistoryMethod::Replace => self.history.replace(entry),
        }

        Navigation::Loaded(self.load_url(&url))
    }

    /// Merge `params` into the current query, push the new URL and reload the current page.
    ///
    /// Keys in `params` override existing ones, all others are kept.
    ///
    /// # Error Handling
    /// Fails with [`RouterError::NoActivePage`] if nothing was loaded yet.
    pub fn update_query_params(&self, params: impl Into<Query>) -> RouterResult<Option<O>> {
        let params = params.into();
        self.set_query(|query| query.merge(params))
    }

    /// Remove every query param, push the new URL and reload the current page.
    ///
    /// # Error Handling
    /// Fails with [`RouterError::NoActivePage`] if nothing was loaded yet.
    pub fn clear_query_params(&self) -> RouterResult<Option<O>> {
        self.set_query(|query| *query = Query::new())
    }

    fn set_query(&self, update: impl FnOnce(&mut Query)) -> RouterResult<Option<O>> {
        let url = {
            let mut state = self.state.borrow_mut();
            let location = state
                .current_location
                .as_mut()
                .ok_or(RouterError::NoActivePage)?;
            update(&mut location.query);
            to_url_string(&self.routes.borrow(), location)
        };

        let url = self.qualify(&url);
        let entry = self.history_entry(&url);
        debug!(%entry, "updating query params");
        self.history.push(entry);
        Ok(self.load_url(&url))
    }

    /// Ask the host to go back one entry. The navigator follows once the host reports the change.
    pub fn go_back(&self) {
        self.history.go_back();
    }

    /// Ask the host to go forward one entry. The navigator follows once the host reports the
    /// change.
    pub fn go_forward(&self) {
        self.history.go_forward();
    }

    /// The path and query of the current location, if a page was loaded.
    pub fn current_url(&self) -> Option<String> {
        let state = self.state.borrow();
        let location = state.current_location.as_ref()?;
        Some(to_url_string(&self.routes.borrow(), location))
    }

    /// The current location, if a page was loaded.
    pub fn current_location(&self) -> Option<Location> {
        self.state.borrow().current_location.clone()
    }

    /// The page name of the current location, if a page was loaded.
    pub fn current_page_name(&self) -> Option<String> {
        let state = self.state.borrow();
        state.current_location.as_ref().map(|l| l.page.clone())
    }

    /// Resolve `url` without navigating to it.
    pub fn location(&self, url: &str) -> Location {
        get_location(&self.routes.borrow(), &self.qualify(url))
    }

    /// Build the URL of the route called `name`.
    pub fn get_url(&self, name: &str, params: &Params) -> RouterResult<String> {
        get_url(&self.routes.borrow(), name, params, None)
    }

    /// The registered routes.
    pub fn routes(&self) -> Ref<'_, RouteTable> {
        self.routes.borrow()
    }

    /// The normalized prefix, empty if there is none.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn current(&self) -> Option<(PageHandle<O>, Location)> {
        let state = self.state.borrow();
        Some((state.current_page.clone()?, state.current_location.clone()?))
    }

    /// Turn `url` into an absolute URL on the host's current origin, unless it already is one.
    fn qualify(&self, url: &str) -> String {
        if Url::parse(url).is_ok() {
            return url.to_string();
        }

        let current = self.history.current_url();
        let base = match Url::parse(&current) {
            Ok(base) => base,
            Err(err) => {
                warn!(%err, "host url {current} is not absolute, leaving {url} relative");
                return url.to_string();
            }
        };

        let origin = &base[..Position::BeforePath];
        if url.starts_with('/') {
            format!("{origin}{url}")
        } else {
            format!("{origin}/{url}")
        }
    }

    /// The history entry for a qualified `url`: its path, query and fragment, carrying the prefix
    /// exactly once.
    fn history_entry(&self, url: &str) -> String {
        let route = match Url::parse(url) {
            Ok(parsed) => parsed[Position::BeforePath..].to_string(),
            Err(_) => url.to_string(),
        };

        format!("{}{}", self.prefix, strip_prefix(&self.prefix, &route))
    }
}

#[cfg(test)]
mod tests {
    use waypost_history::MemoryHistory;

    use super::*;

    struct Blank;

    impl Page for Blank {
        type Output = ();
    }

    fn navigator(prefix: &str) -> Navigator {
        let history = MemoryHistory::with_initial_url("http://example.com:8080/start").unwrap();
        Navigator::new(history, NavigatorConfig::default().prefix(prefix))
    }

    #[test]
    fn qualify_uses_the_host_origin() {
        let nav = navigator("");
        assert_eq!(nav.qualify("/users/1"), "http://example.com:8080/users/1");
        assert_eq!(nav.qualify("users/1?a=b"), "http://example.com:8080/users/1?a=b");
        assert_eq!(nav.qualify(""), "http://example.com:8080/");
        assert_eq!(nav.qualify("https://other.org/x"), "https://other.org/x");
    }

    #[test]
    fn history_entries_carry_the_prefix_once() {
        let nav = navigator("/myapp");
        assert_eq!(nav.history_entry("http://h/lists/42"), "/myapp/lists/42");
        assert_eq!(nav.history_entry("http://h/myapp/lists/42"), "/myapp/lists/42");
        assert_eq!(nav.history_entry("http://h/myapp"), "/myapp");
        assert_eq!(nav.history_entry("http://h/myapp?x=1#top"), "/myapp?x=1#top");
        assert_eq!(nav.history_entry("http://h/myapps"), "/myapp/myapps");
    }

    #[test]
    fn history_entries_without_prefix() {
        let nav = navigator("");
        assert_eq!(nav.history_entry("http://h/a/b?c=d"), "/a/b?c=d");
    }

    #[test]
    fn duplicate_pages_are_rejected() {
        let nav = navigator("");
        nav.add_page("home", "/", Blank).unwrap();
        assert_eq!(
            nav.add_page("home", "/home", Blank),
            Err(RouterError::DuplicateRouteName("home".into()))
        );
        assert_eq!(nav.routes().len(), 1);

        nav.set_not_found_page(Blank).unwrap();
        assert_eq!(
            nav.set_not_found_page(Blank),
            Err(RouterError::DuplicateRouteName(NOT_FOUND.into()))
        );
    }
}
