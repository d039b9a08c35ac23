//! Reference controller wiring: a search form and modal links.
//!
//! Run with `RUST_LOG=debug cargo run --example controller` to see the
//! dispatch logging.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use domctl::{Controller, Document, Event, EventType, SelectorNode};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Build a page: a search form and a modal link under <body>.
    let mut doc = Document::new();
    let body = doc.body();
    let tree = doc.tree_mut();

    let form = tree.create_element("form");
    tree.set_attr(form, "class", "search")?;
    tree.append_child(body, form)?;

    let link = tree.create_element("a");
    tree.set_attr(link, "class", "modal")?;
    tree.set_attr(link, "href", "#signup")?;
    tree.append_child(body, link)?;

    let selectors = SelectorNode::group([
        ("search", SelectorNode::query("form.search")),
        (
            "modal",
            SelectorNode::group([("links", SelectorNode::query("a.modal"))]),
        ),
    ]);

    let submitted = Rc::new(RefCell::new(0u32));
    let search_submit = {
        let submitted = Rc::clone(&submitted);
        move |event: &mut Event, _element| {
            event.prevent_default();
            *submitted.borrow_mut() += 1;
        }
    };
    let show_modal = |_event: &mut Event, element| {
        println!("opening modal for {element:?}");
    };

    let mut controller = Controller::new(selectors);
    controller
        .on(EventType::Submit, "form.search", search_submit)
        .on(EventType::Click, "a.modal", show_modal)
        .vendor(|elements| {
            println!("vendor setup saw {} top-level groups", elements.len());
            Ok(())
        });
    controller.initialize(doc.tree(), None)?;

    // Simulate the host event loop feeding events in.
    let mut submit = Event::submit(form);
    controller.dispatch(doc.tree(), &mut submit);
    assert!(submit.is_default_prevented());

    let mut click = Event::click(link);
    controller.dispatch(doc.tree(), &mut click);

    println!("search submitted {} time(s)", submitted.borrow());
    Ok(())
}
