//! Admin dashboard: sermon, event and prayer lists backed by `localStorage`.

use crate::dom;
use crate::events;
use pw_site_core::admin::{self as items, DELETE_BUTTON_CLASS};
use pw_site_types::{EVENTS_KEY, SERMONS_KEY};
use pw_storage::{AdminRepository, KeyValueStore};
use serde_json::{Map, Value};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;

pub struct AdminDashboard {
    store: Rc<dyn KeyValueStore>,
    sermon_list: Option<Element>,
    event_list: Option<Element>,
    prayer_list: Option<Element>,
}

impl AdminDashboard {
    pub fn new(
        store: Rc<dyn KeyValueStore>,
        sermon_list: Option<Element>,
        event_list: Option<Element>,
        prayer_list: Option<Element>,
    ) -> Self {
        Self {
            store,
            sermon_list,
            event_list,
            prayer_list,
        }
    }

    /// Bind to `#sermon-list`, `#event-list` and `#prayer-list`.
    pub fn from_document(store: Rc<dyn KeyValueStore>) -> Self {
        Self::new(
            store,
            dom::by_id("sermon-list"),
            dom::by_id("event-list"),
            dom::by_id("prayer-list"),
        )
    }

    fn repo(&self) -> AdminRepository<'_> {
        AdminRepository::new(self.store.as_ref())
    }

    pub fn init(self: &Rc<Self>) {
        self.load_sermons();
        self.load_events();
        self.load_prayer_requests();
    }

    pub fn load_sermons(self: &Rc<Self>) {
        let Some(list) = &self.sermon_list else {
            return;
        };
        render_into(list, &items::sermon_items(&self.repo().sermons()));
        self.wire_delete_buttons(list);
    }

    pub fn load_events(self: &Rc<Self>) {
        let Some(list) = &self.event_list else {
            return;
        };
        render_into(list, &items::event_items(&self.repo().events()));
        self.wire_delete_buttons(list);
    }

    pub fn load_prayer_requests(&self) {
        let Some(list) = &self.prayer_list else {
            return;
        };
        render_into(list, &items::prayer_items(&self.repo().prayer_requests()));
    }

    pub fn add_sermon(self: &Rc<Self>, fields: Map<String, Value>) {
        if let Err(err) = self.repo().add_sermon(fields, now_ms()) {
            gloo_console::error!(format!("could not save sermon: {err:#}"));
        }
        self.load_sermons();
    }

    pub fn add_event(self: &Rc<Self>, fields: Map<String, Value>) {
        if let Err(err) = self.repo().add_event(fields, now_ms()) {
            gloo_console::error!(format!("could not save event: {err:#}"));
        }
        self.load_events();
    }

    pub fn delete_sermon(self: &Rc<Self>, id: &str) {
        if let Err(err) = self.repo().delete_sermon(id) {
            gloo_console::error!(format!("could not delete sermon {id}: {err:#}"));
        }
        self.load_sermons();
    }

    pub fn delete_event(self: &Rc<Self>, id: &str) {
        if let Err(err) = self.repo().delete_event(id) {
            gloo_console::error!(format!("could not delete event {id}: {err:#}"));
        }
        self.load_events();
    }

    /// Wire click events on freshly rendered delete buttons.
    fn wire_delete_buttons(self: &Rc<Self>, list: &Element) {
        for button in dom::query_all_within(list, &format!(".{DELETE_BUTTON_CLASS}")) {
            let id = button.get_attribute("data-id").unwrap_or_default();
            let kind = button.get_attribute("data-list").unwrap_or_default();
            let dashboard = self.clone();
            events::on_click(&button, move |_| match kind.as_str() {
                SERMONS_KEY => dashboard.delete_sermon(&id),
                EVENTS_KEY => dashboard.delete_event(&id),
                _ => {}
            });
        }
    }
}

fn render_into(list: &Element, content: &[pw_site_core::Element]) {
    if let Err(err) = dom::replace_children(list, content) {
        gloo_console::warn!(format!("could not render #{}:", list.id()), err);
    }
}

fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

fn fields_from_js(value: JsValue) -> Result<Map<String, Value>, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Add a sermon from a plain object of form fields (for the admin page's forms).
#[wasm_bindgen(js_name = adminAddSermon)]
pub fn admin_add_sermon(fields: JsValue) -> Result<(), JsValue> {
    let fields = fields_from_js(fields)?;
    if let Some(dashboard) = crate::state::admin() {
        dashboard.add_sermon(fields);
    }
    Ok(())
}

/// Add an event from a plain object of form fields.
#[wasm_bindgen(js_name = adminAddEvent)]
pub fn admin_add_event(fields: JsValue) -> Result<(), JsValue> {
    let fields = fields_from_js(fields)?;
    if let Some(dashboard) = crate::state::admin() {
        dashboard.add_event(fields);
    }
    Ok(())
}
