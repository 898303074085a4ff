//! Modal overlays.

use crate::dom;
use crate::events;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

pub struct ModalController {
    body: Option<HtmlElement>,
}

impl ModalController {
    pub fn new(body: Option<HtmlElement>) -> Self {
        Self { body }
    }

    fn set_scroll_locked(&self, locked: bool) {
        if let Some(body) = &self.body {
            let _ = body
                .style()
                .set_property("overflow", if locked { "hidden" } else { "auto" });
        }
    }

    pub fn open(&self, modal_id: &str) {
        if let Some(overlay) = dom::by_id(modal_id) {
            dom::add_class(&overlay, "active");
            self.set_scroll_locked(true);
        }
    }

    pub fn close(&self, modal_id: &str) {
        if let Some(overlay) = dom::by_id(modal_id) {
            self.dismiss(&overlay);
        }
    }

    fn dismiss(&self, overlay: &web_sys::Element) {
        dom::remove_class(overlay, "active");
        self.set_scroll_locked(false);
    }

    /// `.modal-close` buttons and clicks on the bare overlay close the modal.
    pub fn bind(self: Rc<Self>) {
        for button in dom::query_all(".modal-close") {
            let modals = self.clone();
            events::on_click(&button, move |event| {
                let overlay = event
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                    .and_then(|el| el.closest(".modal-overlay").ok().flatten());
                if let Some(overlay) = overlay {
                    modals.dismiss(&overlay);
                }
            });
        }

        for overlay in dom::query_all(".modal-overlay") {
            let modals = self.clone();
            events::on_click(&overlay, move |event| {
                let Some(overlay) = events::current_element(&event) else {
                    return;
                };
                let on_backdrop = event
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                    .is_some_and(|target| target == overlay);
                if on_backdrop {
                    modals.dismiss(&overlay);
                }
            });
        }
    }
}

/// Open the modal overlay with the given id (for inline page handlers).
#[wasm_bindgen(js_name = openModal)]
pub fn open_modal(modal_id: &str) {
    if let Some(modals) = crate::state::modals() {
        modals.open(modal_id);
    }
}

/// Close the modal overlay with the given id.
#[wasm_bindgen(js_name = closeModal)]
pub fn close_modal(modal_id: &str) {
    if let Some(modals) = crate::state::modals() {
        modals.close(modal_id);
    }
}
