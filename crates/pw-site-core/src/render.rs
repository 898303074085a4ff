//! Media section renderers.
//!
//! Each renderer returns the complete new content of its mount point; callers
//! replace the previous children wholesale.

use crate::markup::Element;
use crate::video::{VideoId, normalize_video_ref};
use pw_site_types::{ImageRef, ImagesConfig, MediaConfig};
use url::Url;

pub const EMBED_ORIGIN: &str = "https://www.youtube-nocookie.com";
pub const FEATURED_CAPTION: &str = "Featured message \u{2014} Pastor Chris";
pub const CONFIG_PATH_HINT: &str = "data/config.json";
pub const DEFAULT_IMAGE_ALT: &str = "Church media image";

const EMBED_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

pub fn embed_src(id: &VideoId) -> String {
    match Url::parse(EMBED_ORIGIN) {
        Ok(mut url) => {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.clear().push("embed").push(id.as_str());
            }
            url.to_string()
        }
        Err(_) => format!("{EMBED_ORIGIN}/embed/{id}"),
    }
}

/// 16:9 player block; the caption, when given, sits below the frame.
pub fn embed(id: &VideoId, caption: Option<&str>) -> Element {
    let iframe = Element::new("iframe")
        .attr("width", "100%")
        .attr("height", "100%")
        .attr("frameborder", "0")
        .attr("allow", EMBED_ALLOW)
        .attr("allowfullscreen", "")
        .attr("src", &embed_src(id))
        .style("position", "absolute")
        .style("top", "0")
        .style("left", "0");

    let frame = Element::new("div")
        .class("video-frame")
        .style("position", "relative")
        .style("width", "100%")
        .style("padding-bottom", "56.25%")
        .style("border-radius", "12px")
        .style("overflow", "hidden")
        .child(iframe);

    let mut block = Element::new("div").class("video-embed").child(frame);
    if let Some(caption) = caption.filter(|c| !c.is_empty()) {
        block = block.child(
            Element::new("p")
                .style("margin-top", "0.6rem")
                .style("color", "#666")
                .text(caption),
        );
    }
    block
}

fn placeholder_card(min_height: &str, message: &str, key: Option<&str>) -> Element {
    let mut card = Element::new("div")
        .class("card")
        .style("min-height", min_height)
        .style("display", "flex")
        .style("align-items", "center")
        .style("justify-content", "center")
        .style("color", "#999")
        .text(message);
    if let Some(key) = key {
        card = card.text(&format!("Add `{key}` in "));
    }
    card.child(Element::new("code").text(CONFIG_PATH_HINT)).text(".")
}

// ── Featured message ──

pub fn featured_message(media: &MediaConfig) -> Vec<Element> {
    let raw = media.youtube.featured_video_id.as_deref().unwrap_or_default();
    match normalize_video_ref(raw) {
        Some(id) => vec![embed(&id, Some(FEATURED_CAPTION))],
        None => vec![
            Element::new("p")
                .style("color", "#666")
                .text("No featured video ID configured. Add `media.youtube.featuredVideoId` in ")
                .child(Element::new("code").text(CONFIG_PATH_HINT))
                .text("."),
        ],
    }
}

// ── Message list ──

/// One card per resolvable reference; unresolvable ones are skipped silently.
pub fn message_list(media: &MediaConfig) -> Vec<Element> {
    let refs = &media.youtube.pastor_chris_video_ids;
    if refs.is_empty() {
        return vec![placeholder_card(
            "120px",
            "No Pastor Chris video IDs configured. ",
            Some("media.youtube.pastorChrisVideoIds"),
        )];
    }

    refs.iter()
        .filter_map(|raw| {
            let id = normalize_video_ref(raw);
            if id.is_none() {
                tracing::debug!("skipping unresolvable video reference '{}'", raw);
            }
            id
        })
        .map(|id| {
            Element::new("div")
                .class("card fade-on-scroll")
                .child(embed(&id, None))
        })
        .collect()
}

// ── Gallery ──

/// Caption built from a template with `{credit}` and `{source}` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct Attribution<'a> {
    template: &'a str,
}

impl<'a> Attribution<'a> {
    pub fn new(template: &'a str) -> Self {
        Self { template }
    }

    pub fn from_config(images: &'a ImagesConfig) -> Self {
        Self::new(images.attribution_template())
    }

    /// Substitutes the first occurrence of each placeholder, `{credit}` first.
    pub fn caption(&self, image: &ImageRef) -> String {
        self.template
            .replacen("{credit}", image.credit().unwrap_or("[credit]"), 1)
            .replacen("{source}", image.source().unwrap_or("[source]"), 1)
    }
}

pub fn figure(image: &ImageRef, attribution: &Attribution<'_>) -> Element {
    let img = Element::new("img")
        .attr("alt", image.credit().unwrap_or(DEFAULT_IMAGE_ALT))
        .attr("src", &image.src)
        .style("width", "100%")
        .style("height", "180px")
        .style("object-fit", "cover");

    let caption = Element::new("figcaption")
        .style("padding", "0.5rem")
        .style("font-size", "0.85rem")
        .style("color", "#666")
        .text(&attribution.caption(image));

    Element::new("figure")
        .style("margin", "0")
        .style("border-radius", "12px")
        .style("overflow", "hidden")
        .style("background", "#fff")
        .style("box-shadow", "var(--shadow-sm)")
        .child(img)
        .child(caption)
}

pub fn gallery(images: &[ImageRef], attribution: &Attribution<'_>) -> Vec<Element> {
    if images.is_empty() {
        return vec![placeholder_card(
            "160px",
            "No images configured. Add image URLs or enable an image provider in ",
            None,
        )];
    }
    images.iter().map(|img| figure(img, attribution)).collect()
}

pub fn configured_gallery(images: &ImagesConfig) -> Vec<Element> {
    gallery(&images.all_images(), &Attribution::from_config(images))
}
