//! Browser integration: intercepting clicks on links.

use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use tracing::{error, trace};
use wasm_bindgen::JsCast;
use web_sys::{window, Element, HtmlAnchorElement, MouseEvent};

use crate::{
    intercept::{LinkAction, LinkClick, LinkNode},
    navigator::Navigator,
};

impl LinkNode for Element {
    fn tag_name(&self) -> String {
        Element::tag_name(self)
    }

    fn href(&self) -> Option<String> {
        match self.dyn_ref::<HtmlAnchorElement>() {
            Some(anchor) => Some(anchor.href()),
            None => self.get_attribute("href"),
        }
    }

    fn parent(&self) -> Option<Self> {
        self.parent_element()
    }
}

/// Route clicks on same-host links anywhere in the document through `navigator`.
///
/// Followed links have their default action prevented. Links to other hosts are handed to
/// `handle_external` together with the original event, which is left untouched.
///
/// The returned listener stops monitoring when dropped. Returns [`None`] if there is no
/// document to listen on.
pub fn monitor_links<O: 'static>(
    navigator: &Rc<Navigator<O>>,
    handle_external: impl Fn(&MouseEvent, &str) + 'static,
) -> Option<EventListener> {
    let Some(document) = window().and_then(|window| window.document()) else {
        error!("cannot monitor links without a document");
        return None;
    };

    let navigator = Rc::downgrade(navigator);
    let listener = EventListener::new_with_options(
        &document,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let Some(navigator) = navigator.upgrade() else {
                trace!("navigator dropped, ignoring click");
                return;
            };

            let click = LinkClick {
                target: event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok()),
                button: event.button(),
                ctrl_key: event.ctrl_key(),
                meta_key: event.meta_key(),
            };

            match navigator.handle_click(click) {
                LinkAction::Ignored => {}
                LinkAction::Navigated(_) => event.prevent_default(),
                LinkAction::External(href) => handle_external(event, &href),
            }
        },
    );

    Some(listener)
}
