//! Demo form submission: fields are kept in `localStorage` instead of posted.

use crate::dom;
use crate::events;
use pw_site_types::FormKind;
use pw_storage::{KeyValueStore, SubmissionLog};
use serde::Serialize;
use serde_json::{Map, Value};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{FormData, HtmlFormElement};

const CONFIRMATION_MS: u32 = 5_000;

fn form_selector(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Contact => "#contact-form",
        FormKind::Prayer => "#prayer-form",
        FormKind::Newsletter => ".newsletter-form",
    }
}

pub struct FormHandlers {
    store: Rc<dyn KeyValueStore>,
}

impl FormHandlers {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn bind(self: Rc<Self>) {
        for kind in FormKind::ALL {
            let Some(form) = dom::query(form_selector(kind))
                .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
            else {
                continue;
            };
            let handlers = self.clone();
            let target = form.clone();
            events::listen(&form, "submit", move |event| {
                event.prevent_default();
                handlers.submit(&target, kind);
            });
        }
    }

    fn submit(&self, form: &HtmlFormElement, kind: FormKind) {
        let fields = match form_fields(form) {
            Ok(fields) => fields,
            Err(err) => {
                gloo_console::error!(format!("could not read {} form:", kind.as_str()), err);
                return;
            }
        };

        let logged = fields
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .unwrap_or(JsValue::NULL);
        gloo_console::log!(format!("{} form submitted:", kind.as_str()), logged);

        let timestamp: String = js_sys::Date::new_0().to_iso_string().into();
        if let Err(err) = SubmissionLog::new(self.store.as_ref()).record(kind, fields, &timestamp) {
            gloo_console::error!(format!("could not store {} submission: {err:#}", kind.as_str()));
        }

        show_confirmation(form, &kind.confirmation_message());
        form.reset();
    }
}

/// Text entries of the form, in document order. File inputs are skipped.
fn form_fields(form: &HtmlFormElement) -> Result<Map<String, Value>, JsValue> {
    let data = FormData::new_with_form(form)?;
    let mut fields = Map::new();
    let Some(entries) = js_sys::try_iter(&data)? else {
        return Ok(fields);
    };
    for entry in entries {
        let pair: js_sys::Array = entry?.dyn_into()?;
        let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) else {
            continue;
        };
        fields.insert(key, Value::String(value));
    }
    Ok(fields)
}

fn show_confirmation(form: &HtmlFormElement, message: &str) {
    let Some(doc) = dom::document() else {
        return;
    };
    let Ok(alert) = doc.create_element("div") else {
        return;
    };
    alert.set_class_name("alert alert-success");
    alert.set_text_content(Some(message));
    if form
        .insert_before(&alert, form.first_child().as_ref())
        .is_err()
    {
        return;
    }
    gloo_timers::callback::Timeout::new(CONFIRMATION_MS, move || alert.remove()).forget();
}
