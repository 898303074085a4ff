//! Event listener plumbing.
//!
//! Listeners live for the whole page, so closures are leaked with `forget()`.

use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

/// Attach a listener for `event` on `target`.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut(Event) + 'static,
{
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    if let Err(err) = target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
        gloo_console::warn!(format!("could not bind '{event}' listener:"), err);
    }
    cb.forget();
}

/// Attach a click listener.
pub fn on_click<F>(target: &EventTarget, handler: F)
where
    F: FnMut(Event) + 'static,
{
    listen(target, "click", handler);
}

/// Run `init` once the document has been parsed.
pub fn on_dom_ready<F>(init: F)
where
    F: FnOnce() + 'static,
{
    let Some(doc) = crate::dom::document() else {
        return;
    };
    if doc.ready_state() != "loading" {
        init();
        return;
    }
    let cb = Closure::once(init);
    if let Err(err) =
        doc.add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref())
    {
        gloo_console::warn!("could not wait for DOMContentLoaded:", err);
    }
    cb.forget();
}

/// The element a listener was registered on.
pub fn current_element(event: &Event) -> Option<web_sys::Element> {
    event.current_target()?.dyn_into().ok()
}
