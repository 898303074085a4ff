//! Viewport observers: lazy image loading and fade-in on scroll.

use crate::dom;
use wasm_bindgen::prelude::*;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

type EntriesCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

fn observer_supported() -> bool {
    dom::window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

/// Calls `on_visible` once per element as it enters the viewport, then stops watching it.
fn observe_once<F>(selector: &str, threshold: Option<f64>, mut on_visible: F)
where
    F: FnMut(&web_sys::Element) + 'static,
{
    let targets = dom::query_all(selector);
    if targets.is_empty() {
        return;
    }

    let cb: EntriesCallback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    on_visible(&target);
                    observer.unobserve(&target);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let observer = match threshold {
        Some(t) => {
            let opts = IntersectionObserverInit::new();
            opts.set_threshold(&JsValue::from_f64(t));
            IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &opts)
        }
        None => IntersectionObserver::new(cb.as_ref().unchecked_ref()),
    };
    cb.forget();

    match observer {
        Ok(observer) => {
            for target in &targets {
                observer.observe(target);
            }
        }
        Err(err) => gloo_console::warn!(format!("observer for '{selector}' failed:"), err),
    }
}

/// Swap `data-src` into `src` for `img[data-src]` as images scroll into view.
pub fn bind_lazy_images() {
    if !observer_supported() {
        return;
    }
    observe_once("img[data-src]", None, |img| {
        if let Some(src) = img.get_attribute("data-src") {
            let _ = img.set_attribute("src", &src);
            let _ = img.remove_attribute("data-src");
        }
    });
}

/// Add `fade-in-up` to `.fade-on-scroll` elements once 10% visible.
pub fn bind_fade_in() {
    if !observer_supported() {
        return;
    }
    observe_once(".fade-on-scroll", Some(0.1), |el| {
        dom::add_class(el, "fade-in-up");
    });
}
