//! Pathers Church site WASM glue
//!
//! Progressive enhancement for the static pages: navigation, modals, demo
//! forms, list filters, the admin dashboard and config-driven media sections.
//! Every component is optional; pages lacking its markup are left untouched.

pub mod admin;
pub mod analytics;
pub mod api;
pub mod dom;
pub mod events;
pub mod filters;
pub mod forms;
pub mod media;
pub mod modal;
pub mod nav;
pub mod observers;
pub mod state;

use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    events::on_dom_ready(init);
    Ok(())
}

/// Main initialisation sequence, run once the document is parsed.
fn init() {
    let store = state::browser_store();

    Rc::new(nav::MobileMenu::from_document()).bind();

    let modals = Rc::new(modal::ModalController::new(dom::body()));
    state::set_modals(modals.clone());
    modals.bind();

    Rc::new(forms::FormHandlers::new(store.clone())).bind();

    filters::bind_category_filters();
    filters::bind_sermon_search();
    nav::bind_smooth_scroll();
    observers::bind_lazy_images();
    observers::bind_fade_in();

    if dom::body().is_some_and(|body| dom::has_class(&body, "admin-page")) {
        let dashboard = Rc::new(admin::AdminDashboard::from_document(store));
        state::set_admin(dashboard.clone());
        dashboard.init();
    }

    analytics::Analytics::from_location().track_page_view();

    // Media sections render after everything else is interactive.
    wasm_bindgen_futures::spawn_local(media::load_media_from_config());
}
