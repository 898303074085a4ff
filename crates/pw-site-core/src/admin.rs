//! Admin dashboard list items.

use crate::markup::Element;
use crate::util::format_short_date;
use pw_site_types::{EVENTS_KEY, EventRecord, PrayerSubmission, SERMONS_KEY, SermonRecord};

pub const DELETE_BUTTON_CLASS: &str = "admin-delete";

fn delete_button(list: &str, id: &str) -> Element {
    Element::new("button")
        .class(DELETE_BUTTON_CLASS)
        .attr("type", "button")
        .attr("data-list", list)
        .attr("data-id", id)
        .text("Delete")
}

fn line(text: &str) -> Element {
    Element::new("p").text(text)
}

pub fn sermon_item(sermon: &SermonRecord) -> Element {
    Element::new("div")
        .class("admin-item")
        .child(Element::new("h4").text(&sermon.title))
        .child(line(&format!("Series: {}", sermon.series)))
        .child(line(&format!("Date: {}", sermon.date)))
        .child(delete_button(SERMONS_KEY, &sermon.id.to_string()))
}

pub fn event_item(event: &EventRecord) -> Element {
    Element::new("div")
        .class("admin-item")
        .child(Element::new("h4").text(&event.title))
        .child(line(&format!("Date: {}", event.date)))
        .child(line(&format!("Time: {}", event.time)))
        .child(delete_button(EVENTS_KEY, &event.id.to_string()))
}

pub fn prayer_item(prayer: &PrayerSubmission) -> Element {
    let privacy = prayer
        .privacy
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or("Private");
    let submitted = format_short_date(&prayer.timestamp).unwrap_or_else(|| "Invalid Date".to_owned());
    Element::new("div")
        .class("admin-item")
        .child(Element::new("h4").text(&prayer.name))
        .child(line(&format!("Request: {}", prayer.request)))
        .child(line(&format!("Privacy: {privacy}")))
        .child(line(&format!("Submitted: {submitted}")))
}

pub fn sermon_items(sermons: &[SermonRecord]) -> Vec<Element> {
    sermons.iter().map(sermon_item).collect()
}

pub fn event_items(events: &[EventRecord]) -> Vec<Element> {
    events.iter().map(event_item).collect()
}

pub fn prayer_items(prayers: &[PrayerSubmission]) -> Vec<Element> {
    prayers.iter().map(prayer_item).collect()
}
