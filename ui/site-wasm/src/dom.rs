//! DOM helpers and markup mounting.
//!
//! Lookups return `Option`: every page carries a different subset of the
//! site's elements, and a missing one just disables the feature using it.

use pw_site_core::{Element as Markup, MountPoint, Node as MarkupNode};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

// ── Helpers ──

pub fn window() -> Option<web_sys::Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn body() -> Option<HtmlElement> {
    document()?.body()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    match document().and_then(|d| d.query_selector_all(selector).ok()) {
        Some(nl) => collect_nodes(&nl),
        None => Vec::new(),
    }
}

/// Query all matching elements within a parent element.
pub fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    match parent.query_selector_all(selector) {
        Ok(nl) => collect_nodes(&nl),
        Err(_) => Vec::new(),
    }
}

fn collect_nodes(nl: &web_sys::NodeList) -> Vec<Element> {
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn text_of(parent: &Element, selector: &str) -> Option<String> {
    parent
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.text_content())
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str) -> bool {
    el.class_list().toggle(cls).unwrap_or(false)
}

pub fn has_class(el: &Element, cls: &str) -> bool {
    el.class_list().contains(cls)
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub fn set_display(el: &Element, visible: bool) {
    set_style(el, "display", if visible { "block" } else { "none" });
}

// ── Markup → DOM ──

/// Build detached DOM nodes for a rendered element tree.
pub fn build(markup: &Markup) -> Result<Element, JsValue> {
    let doc = document().ok_or_else(|| JsValue::from_str("no document"))?;
    build_in(&doc, markup)
}

fn build_in(doc: &Document, markup: &Markup) -> Result<Element, JsValue> {
    let el = doc.create_element(&markup.tag)?;
    for (name, value) in &markup.attrs {
        el.set_attribute(name, value)?;
    }
    if !markup.styles.is_empty() {
        el.set_attribute("style", &markup.style_attr())?;
    }
    for child in &markup.children {
        match child {
            MarkupNode::Text(text) => {
                el.append_child(&doc.create_text_node(text))?;
            }
            MarkupNode::Element(child) => {
                let node = build_in(doc, child)?;
                el.append_child(&node)?;
            }
        }
    }
    Ok(el)
}

/// Replace all children of `container` with freshly built nodes.
pub fn replace_children(container: &Element, content: &[Markup]) -> Result<(), JsValue> {
    container.set_inner_html("");
    for markup in content {
        let node = build(markup)?;
        container.append_child(&node)?;
    }
    Ok(())
}

/// A live container element used as a render target.
pub struct ElementMount(pub Element);

impl MountPoint for ElementMount {
    fn replace_children(&self, content: &[Markup]) {
        if let Err(err) = replace_children(&self.0, content) {
            gloo_console::warn!(format!("render into #{} failed:", self.0.id()), err);
        }
    }
}

pub fn mount_by_id(id: &str) -> Option<Box<dyn MountPoint>> {
    by_id(id).map(|el| Box::new(ElementMount(el)) as Box<dyn MountPoint>)
}
