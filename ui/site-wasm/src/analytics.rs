//! Console-only analytics.

use pw_site_core::analytics::AnalyticsEvent;
use serde::Serialize;
use serde_json::{Map, Value};
use wasm_bindgen::JsValue;

pub struct Analytics {
    page: String,
}

impl Analytics {
    pub fn new(page: String) -> Self {
        Self { page }
    }

    pub fn from_location() -> Self {
        let page = web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default();
        Self::new(page)
    }

    pub fn track_event(&self, name: &str, data: Map<String, Value>) {
        let timestamp: String = js_sys::Date::new_0().to_iso_string().into();
        log_event(&AnalyticsEvent::new(name, &timestamp, data));
    }

    pub fn track_page_view(&self) {
        let timestamp: String = js_sys::Date::new_0().to_iso_string().into();
        log_event(&AnalyticsEvent::page_view(&self.page, &timestamp));
    }
}

fn log_event(event: &AnalyticsEvent) {
    let record = event
        .to_json()
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL);
    gloo_console::log!("Event tracked:", record);
}

/// Log a custom analytics event from page scripts.
#[wasm_bindgen::prelude::wasm_bindgen(js_name = trackEvent)]
pub fn track_event(name: &str, data: JsValue) -> Result<(), JsValue> {
    let data: Map<String, Value> = if data.is_undefined() || data.is_null() {
        Map::new()
    } else {
        serde_wasm_bindgen::from_value(data).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    Analytics::from_location().track_event(name, data);
    Ok(())
}
