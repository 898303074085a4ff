//! Target-independent logic behind the church site's browser glue.
//!
//! Everything here builds plain [`markup::Element`] trees or pure values; the
//! wasm crate turns those into DOM nodes and the preview tool into HTML text.

pub mod admin;
pub mod analytics;
pub mod filter;
pub mod markup;
pub mod pipeline;
pub mod render;
pub mod util;
pub mod video;

pub use markup::{Element, Node};
pub use pipeline::{
    CapturedMount, ConfigSource, Enrichment, MediaMounts, MediaPipeline, MountPoint, PipelineReport,
};
pub use video::{VideoId, normalize_video_ref};
