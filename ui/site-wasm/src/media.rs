//! Media sections: featured message, message list and image gallery.

use crate::api::HttpConfigSource;
use crate::dom;
use pw_image_client::ProviderRegistry;
use pw_image_unsplash::UnsplashProvider;
use pw_site_core::{MediaMounts, MediaPipeline, PipelineReport};
use std::sync::Arc;

pub const FEATURED_MOUNT_ID: &str = "pastor-chris-featured";
pub const MESSAGES_MOUNT_ID: &str = "pastor-chris-messages";
pub const GALLERY_MOUNT_ID: &str = "christ-embassy-gallery";

fn mounts() -> MediaMounts {
    MediaMounts {
        featured: dom::mount_by_id(FEATURED_MOUNT_ID),
        messages: dom::mount_by_id(MESSAGES_MOUNT_ID),
        gallery: dom::mount_by_id(GALLERY_MOUNT_ID),
    }
}

fn providers() -> ProviderRegistry {
    let mut registry = ProviderRegistry::default();
    registry.register(Arc::new(UnsplashProvider::default()));
    registry
}

/// Fetch `data/config.json` and populate whichever media sections this page has.
pub async fn load_media_from_config() {
    let pipeline = MediaPipeline::new(mounts(), providers());
    match pipeline.run(&HttpConfigSource::default()).await {
        PipelineReport::ConfigUnavailable(err) => {
            gloo_console::warn!("Could not load media config:", err.to_string());
        }
        PipelineReport::Rendered { enrichment } => {
            gloo_console::debug!(format!("media sections rendered ({enrichment:?})"));
        }
    }
}
