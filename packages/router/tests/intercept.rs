use std::rc::Rc;

use pretty_assertions::assert_eq;
use waypost_router::prelude::*;

/// A minimal element tree: every node knows its parent.
#[derive(Clone, Debug)]
struct Node(Rc<NodeData>);

#[derive(Debug)]
struct NodeData {
    tag: &'static str,
    href: Option<&'static str>,
    parent: Option<Node>,
}

impl Node {
    fn root() -> Self {
        Self::new("BODY", None, None)
    }

    fn new(tag: &'static str, href: Option<&'static str>, parent: Option<&Node>) -> Self {
        Self(Rc::new(NodeData {
            tag,
            href,
            parent: parent.cloned(),
        }))
    }

    fn child(&self, tag: &'static str) -> Self {
        Self::new(tag, None, Some(self))
    }

    fn link(&self, href: &'static str) -> Self {
        Self::new("A", Some(href), Some(self))
    }
}

impl LinkNode for Node {
    fn tag_name(&self) -> String {
        self.0.tag.to_string()
    }

    fn href(&self) -> Option<String> {
        self.0.href.map(str::to_string)
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent.clone()
    }
}

struct Named(&'static str);

impl Page for Named {
    type Output = &'static str;

    fn on_load(&self, _: &Location) -> Option<&'static str> {
        Some(self.0)
    }
}

fn navigator() -> (Rc<MemoryHistory>, Navigator<&'static str>) {
    let history = Rc::new(MemoryHistory::with_initial_url("http://localhost:3000/").unwrap());
    let navigator = Navigator::new(history.clone(), NavigatorConfig::default());
    navigator.add_page("home", "/", Named("home")).unwrap();
    navigator
        .add_page("viewUser", "/users/:id", Named("user"))
        .unwrap();
    (history, navigator)
}

fn click(target: &Node) -> LinkClick<Node> {
    LinkClick {
        target: Some(target.clone()),
        button: PRIMARY_BUTTON,
        ctrl_key: false,
        meta_key: false,
    }
}

#[test]
fn find_link_walks_up_to_the_anchor() {
    let link = Node::root().link("/users/1");
    let icon = link.child("span").child("svg");

    assert_eq!(find_link(icon).unwrap().href().as_deref(), Some("/users/1"));
    assert!(find_link(Node::root().child("div")).is_none());
}

#[test]
fn find_link_ignores_tag_case() {
    let link = Node::new("a", Some("/"), None);
    assert!(find_link(link).is_some());
}

#[test]
fn clicks_on_local_links_navigate() {
    let (history, nav) = navigator();
    let text = Node::root().link("/users/7").child("span");

    let action = nav.handle_click(click(&text));

    assert_eq!(action, LinkAction::Navigated(Navigation::Loaded(Some("user"))));
    assert_eq!(history.current_url(), "http://localhost:3000/users/7");
}

#[test]
fn absolute_links_to_the_same_host_navigate() {
    let (history, nav) = navigator();
    let link = Node::root().link("http://localhost:3000/users/8?tab=posts");

    let action = nav.handle_click(click(&link));

    assert_eq!(action, LinkAction::Navigated(Navigation::Loaded(Some("user"))));
    assert_eq!(history.current_route(), "/users/8?tab=posts");
}

#[test]
fn links_to_other_hosts_are_external() {
    let (history, nav) = navigator();

    for href in [
        "https://example.com/users/1",
        "http://localhost:4000/users/1",
        "http://localhost/users/1",
    ] {
        let link = Node::root().link(href);
        assert_eq!(
            nav.handle_click(click(&link)),
            LinkAction::External(href.to_string())
        );
    }
    assert_eq!(history.back_len(), 0);
}

#[test]
fn modified_and_secondary_clicks_are_ignored() {
    let (history, nav) = navigator();
    let link = Node::root().link("/users/7");

    let ctrl = LinkClick {
        ctrl_key: true,
        ..click(&link)
    };
    let meta = LinkClick {
        meta_key: true,
        ..click(&link)
    };
    let middle = LinkClick {
        button: 1,
        ..click(&link)
    };

    assert_eq!(nav.handle_click(ctrl), LinkAction::Ignored);
    assert_eq!(nav.handle_click(meta), LinkAction::Ignored);
    assert_eq!(nav.handle_click(middle), LinkAction::Ignored);
    assert_eq!(history.back_len(), 0);
}

#[test]
fn clicks_outside_links_are_ignored() {
    let (_, nav) = navigator();

    let plain = Node::root().child("p");
    assert_eq!(nav.handle_click(click(&plain)), LinkAction::Ignored);

    let anchor_without_href = Node::root().child("a");
    assert_eq!(nav.handle_click(click(&anchor_without_href)), LinkAction::Ignored);

    let empty_href = Node::root().link("");
    assert_eq!(nav.handle_click(click(&empty_href)), LinkAction::Ignored);

    let no_target = LinkClick::<Node> {
        target: None,
        button: PRIMARY_BUTTON,
        ctrl_key: false,
        meta_key: false,
    };
    assert_eq!(nav.handle_click(no_target), LinkAction::Ignored);
}

#[test]
fn refused_unload_is_reported() {
    struct Sticky;

    impl Page for Sticky {
        type Output = &'static str;

        fn can_unload(&self, _: &Location) -> bool {
            false
        }
    }

    let (_, nav) = navigator();
    nav.add_page("sticky", "/sticky", Sticky).unwrap();
    let _ = nav.goto_url("/sticky");

    let link = Node::root().link("/users/1");
    assert_eq!(
        nav.handle_click(click(&link)),
        LinkAction::Navigated(Navigation::Aborted)
    );
}
