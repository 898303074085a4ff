//! Mobile navigation toggle and in-page smooth scrolling.

use crate::dom;
use crate::events;
use std::rc::Rc;
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

const OPEN_GLYPH: &str = "\u{2715}";
const CLOSED_GLYPH: &str = "\u{2630}";

pub struct MobileMenu {
    toggle: Option<Element>,
    menu: Option<Element>,
}

impl MobileMenu {
    pub fn new(toggle: Option<Element>, menu: Option<Element>) -> Self {
        Self { toggle, menu }
    }

    /// Bind to `.mobile-menu-toggle` and `nav ul`.
    pub fn from_document() -> Self {
        Self::new(dom::query(".mobile-menu-toggle"), dom::query("nav ul"))
    }

    pub fn toggle(&self) {
        let (Some(toggle), Some(menu)) = (&self.toggle, &self.menu) else {
            return;
        };
        let open = dom::toggle_class(menu, "active");
        toggle.set_text_content(Some(if open { OPEN_GLYPH } else { CLOSED_GLYPH }));
    }

    pub fn close(&self) {
        if let Some(menu) = &self.menu {
            dom::remove_class(menu, "active");
        }
        if let Some(toggle) = &self.toggle {
            toggle.set_text_content(Some(CLOSED_GLYPH));
        }
    }

    /// Toggle on button click; any `nav a` click closes the menu.
    pub fn bind(self: Rc<Self>) {
        if let Some(toggle) = &self.toggle {
            let menu = self.clone();
            events::on_click(toggle, move |_| menu.toggle());
        }
        for link in dom::query_all("nav a") {
            let menu = self.clone();
            events::on_click(&link, move |_| menu.close());
        }
    }
}

/// Smooth-scroll same-page anchors (`href="#id"`) whose target exists.
pub fn bind_smooth_scroll() {
    for anchor in dom::query_all(r##"a[href^="#"]"##) {
        events::on_click(&anchor, |event| {
            let Some(anchor) = events::current_element(&event) else {
                return;
            };
            let href = anchor.get_attribute("href").unwrap_or_default();
            if href == "#" {
                return;
            }
            let Some(target) = dom::query(&href) else {
                return;
            };
            event.prevent_default();
            let opts = ScrollIntoViewOptions::new();
            opts.set_behavior(ScrollBehavior::Smooth);
            opts.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&opts);
        });
    }
}
