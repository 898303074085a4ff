//! Event/sermon category filter buttons and the sermon search box.

use crate::dom;
use crate::events;
use pw_site_core::filter::{CategoryFilter, SermonQuery};
use wasm_bindgen::prelude::*;
use web_sys::HtmlInputElement;

const FADE_DELAY_MS: u32 = 10;

fn apply_filter(filter: &CategoryFilter) {
    for card in dom::query_all(".event-card") {
        let visible = filter.matches(card.get_attribute("data-category").as_deref());
        dom::set_display(&card, visible);
        if visible {
            gloo_timers::callback::Timeout::new(FADE_DELAY_MS, move || {
                dom::add_class(&card, "fade-in-up");
            })
            .forget();
        }
    }

    for item in dom::query_all(".sermon-item") {
        let visible = filter.matches(item.get_attribute("data-category").as_deref());
        dom::set_display(&item, visible);
        if visible {
            dom::add_class(&item, "fade-in-up");
        }
    }
}

/// Wire `.event-filter-btn[data-category]` buttons. No-op when none exist.
pub fn bind_category_filters() {
    let buttons = dom::query_all(".event-filter-btn");
    for button in &buttons {
        let all_buttons = buttons.clone();
        events::on_click(button, move |event| {
            let Some(clicked) = events::current_element(&event) else {
                return;
            };
            let filter = CategoryFilter::from_button(clicked.get_attribute("data-category").as_deref());
            apply_filter(&filter);
            for b in &all_buttons {
                dom::remove_class(b, "active");
            }
            dom::add_class(&clicked, "active");
        });
    }
}

fn apply_search(query: &SermonQuery) {
    for sermon in dom::query_all(".sermon-item") {
        let title = dom::text_of(&sermon, ".sermon-title");
        let series = dom::text_of(&sermon, ".sermon-series");
        let visible = query.matches(title.as_deref(), series.as_deref());
        dom::set_display(&sermon, visible);
        if visible {
            dom::add_class(&sermon, "fade-in-up");
        }
    }
}

/// Filter sermons as the user types into `#sermon-search`.
pub fn bind_sermon_search() {
    let Some(input) = dom::by_id("sermon-search").and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return;
    };
    let source = input.clone();
    events::listen(&input, "input", move |_| {
        apply_search(&SermonQuery::new(&source.value()));
    });
}
