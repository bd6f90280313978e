//! Turning clicks on links into router navigations.
//!
//! The router doesn't know about any DOM. Hosts describe their element tree through [`LinkNode`]
//! and their click events through [`LinkClick`], and [`Navigator::handle_click`] decides what to
//! do with them.

use tracing::trace;

use crate::{codec::parse_route, navigation::Navigation, navigator::Navigator};

/// How many ancestors [`find_link`] visits before giving up.
pub const MAX_LINK_DEPTH: usize = 256;

/// The [`LinkClick::button`] value of the primary (usually left) mouse button.
pub const PRIMARY_BUTTON: i16 = 0;

/// A node in the host's element tree.
pub trait LinkNode: Sized {
    /// The element's tag name, e.g. `A`. Compared case-insensitively.
    fn tag_name(&self) -> String;

    /// The link target of the element, if it has one.
    fn href(&self) -> Option<String>;

    /// The element's parent, [`None`] at the root.
    fn parent(&self) -> Option<Self>;
}

/// A click somewhere in the host's element tree.
#[derive(Clone, Debug)]
pub struct LinkClick<N> {
    /// The element that was clicked.
    pub target: Option<N>,
    /// The pressed mouse button, see [`PRIMARY_BUTTON`].
    pub button: i16,
    /// Whether the control key was held.
    pub ctrl_key: bool,
    /// Whether the meta (command) key was held.
    pub meta_key: bool,
}

/// What [`Navigator::handle_click`] did with a click.
#[derive(Debug, PartialEq, Eq)]
pub enum LinkAction<T> {
    /// The click is none of the router's business. The host should let it through.
    Ignored,
    /// The router navigated. The host should suppress the default action.
    Navigated(Navigation<T>),
    /// The link points at another host. What happens next is up to the host.
    External(String),
}

/// Find the nearest anchor at or above `node`.
///
/// Walks up at most [`MAX_LINK_DEPTH`] ancestors.
pub fn find_link<N: LinkNode>(node: N) -> Option<N> {
    let mut current = Some(node);

    for _ in 0..MAX_LINK_DEPTH {
        let node = current?;
        if node.tag_name().eq_ignore_ascii_case("a") {
            return Some(node);
        }
        current = node.parent();
    }

    None
}

impl<O: 'static> Navigator<O> {
    /// Handle a click on the host's element tree.
    ///
    /// Clicks with anything but the primary button, clicks with ctrl or meta held, and clicks
    /// outside of a link with an `href` are [`LinkAction::Ignored`]. Links to the host the app is
    /// running on (or without a host) are followed with [`Navigator::goto_url`]. All other links
    /// are reported as [`LinkAction::External`].
    pub fn handle_click<N: LinkNode>(&self, click: LinkClick<N>) -> LinkAction<O> {
        if click.button != PRIMARY_BUTTON || click.ctrl_key || click.meta_key {
            return LinkAction::Ignored;
        }

        let Some(href) = click
            .target
            .and_then(find_link)
            .and_then(|link| link.href())
            .filter(|href| !href.is_empty())
        else {
            return LinkAction::Ignored;
        };

        let target = parse_route(&href);
        let same_host = match &target.host {
            None => true,
            Some(_) => target.host_port() == parse_route(&self.history.current_url()).host_port(),
        };

        if same_host {
            trace!(%href, "following link");
            LinkAction::Navigated(self.goto_url(&href))
        } else {
            trace!(%href, "external link");
            LinkAction::External(href)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Chain(u32);

    impl LinkNode for Chain {
        fn tag_name(&self) -> String {
            "span".to_string()
        }

        fn href(&self) -> Option<String> {
            None
        }

        fn parent(&self) -> Option<Self> {
            Some(Chain(self.0 + 1))
        }
    }

    #[test]
    fn find_link_gives_up_on_endless_trees() {
        assert!(find_link(Chain(0)).is_none());
    }
}
