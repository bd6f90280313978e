//! A tiny todo app driven by an in-memory history.
//!
//! Run with `RUST_LOG=waypost_router=debug` to watch the router work.

use std::{cell::Cell, rc::Rc};

use tracing_subscriber::EnvFilter;
use waypost_router::prelude::*;

struct Lists;

impl Page for Lists {
    type Output = String;

    fn on_load(&self, location: &Location) -> Option<String> {
        let filter = location.query.get("filter").unwrap_or("all");
        Some(format!("all lists ({filter})"))
    }
}

struct ListEditor {
    unsaved: Cell<bool>,
}

impl Page for ListEditor {
    type Output = String;

    fn on_load(&self, location: &Location) -> Option<String> {
        Some(format!("editing list {}", location.params.get("id")?))
    }

    fn can_unload(&self, _: &Location) -> bool {
        !self.unsaved.get()
    }

    fn on_unload(&self, location: &Location) {
        println!("leaving {}", location.path);
    }
}

struct NotFound;

impl Page for NotFound {
    type Output = String;

    fn on_load(&self, location: &Location) -> Option<String> {
        Some(format!("no page at {}", location.path))
    }
}

fn show(navigation: Navigation<String>) {
    match navigation {
        Navigation::Loaded(Some(page)) => println!("> {page}"),
        Navigation::Loaded(None) => println!("> (nothing rendered)"),
        Navigation::Aborted => println!("> navigation aborted"),
    }
}

fn main() -> RouterResult {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let history = Rc::new(MemoryHistory::with_initial_path("/todo/"));
    let navigator = Rc::new(Navigator::new(
        history.clone(),
        NavigatorConfig::default().prefix("/todo"),
    ));

    let editor = Rc::new(ListEditor {
        unsaved: Cell::new(false),
    });
    navigator.add_page("lists", "/", Lists)?;
    navigator.add_page("editList", "/lists/:id", editor.clone())?;
    navigator.set_not_found_page(NotFound)?;

    if let Some(page) = navigator.start() {
        println!("> {page}");
    }

    show(navigator.goto_url(&navigator.get_url("editList", &Params::from([("id", 7)]))?));

    editor.unsaved.set(true);
    show(navigator.goto_url("/"));

    editor.unsaved.set(false);
    show(navigator.goto_url("/"));

    if let Some(page) = navigator.update_query_params([("filter", "done")])? {
        println!("> {page}");
    }

    show(navigator.goto_url("/nowhere"));

    navigator.go_back();
    println!("back at {}", history.current_route());
    println!("router at {:?}", navigator.current_url());

    Ok(())
}

