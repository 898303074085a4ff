//! Configuration-driven media pipeline.
//!
//! fetch config → render featured / message list / gallery → optional
//! provider enrichment of the gallery. Rendering never mutates the fetched
//! configuration and nothing is cached between runs.

use crate::markup::Element;
use crate::render::{self, Attribution};
use async_trait::async_trait;
use pw_image_client::{ImageSearchRequest, ProviderRegistry, search_best_effort};
use pw_site_types::{EnrichMode, FetchError, ImageRef, MediaConfig, SiteConfig};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{info, warn};

/// A container whose children a renderer owns and replaces wholesale.
pub trait MountPoint {
    fn replace_children(&self, content: &[Element]);
}

/// Mount point that keeps the last rendered content in memory.
#[derive(Clone, Default)]
pub struct CapturedMount {
    content: Rc<RefCell<Vec<Element>>>,
    renders: Rc<Cell<usize>>,
}

impl CapturedMount {
    pub fn content(&self) -> Vec<Element> {
        self.content.borrow().clone()
    }

    pub fn render_count(&self) -> usize {
        self.renders.get()
    }

    pub fn to_html(&self) -> String {
        self.content
            .borrow()
            .iter()
            .map(Element::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl MountPoint for CapturedMount {
    fn replace_children(&self, content: &[Element]) {
        *self.content.borrow_mut() = content.to_vec();
        self.renders.set(self.renders.get() + 1);
    }
}

/// Mount points for the three media sections. A missing one is skipped.
#[derive(Default)]
pub struct MediaMounts {
    pub featured: Option<Box<dyn MountPoint>>,
    pub messages: Option<Box<dyn MountPoint>>,
    pub gallery: Option<Box<dyn MountPoint>>,
}

#[async_trait(?Send)]
pub trait ConfigSource {
    async fn fetch_config(&self) -> Result<SiteConfig, FetchError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment {
    NotConfigured,
    UnknownProvider(String),
    MissingCredential,
    NoGallery,
    NoResults,
    Replaced(usize),
    Appended(usize),
}

#[derive(Debug)]
pub enum PipelineReport {
    ConfigUnavailable(FetchError),
    Rendered { enrichment: Enrichment },
}

pub struct MediaPipeline {
    mounts: MediaMounts,
    providers: ProviderRegistry,
}

impl MediaPipeline {
    pub fn new(mounts: MediaMounts, providers: ProviderRegistry) -> Self {
        Self { mounts, providers }
    }

    pub async fn run(&self, source: &dyn ConfigSource) -> PipelineReport {
        let config = match source.fetch_config().await {
            Ok(config) => config,
            Err(err) => {
                warn!("could not load media config: {}", err);
                return PipelineReport::ConfigUnavailable(err);
            }
        };

        self.render(&config.media);
        let enrichment = self.enrich(&config.media).await;
        info!("media pipeline finished: {:?}", enrichment);
        PipelineReport::Rendered { enrichment }
    }

    /// Render all three sections from the configuration alone.
    pub fn render(&self, media: &MediaConfig) {
        if let Some(mount) = &self.mounts.featured {
            mount.replace_children(&render::featured_message(media));
        }
        if let Some(mount) = &self.mounts.messages {
            mount.replace_children(&render::message_list(media));
        }
        if let Some(mount) = &self.mounts.gallery {
            mount.replace_children(&render::configured_gallery(&media.images));
        }
    }

    /// Query the configured image provider and swap its results into the gallery.
    pub async fn enrich(&self, media: &MediaConfig) -> Enrichment {
        let Some(settings) = media.image_provider() else {
            return Enrichment::NotConfigured;
        };
        let Some(provider) = self.providers.provider(&settings.provider) else {
            return Enrichment::UnknownProvider(settings.provider.clone());
        };
        let Some(access_key) = settings.access_key() else {
            return Enrichment::MissingCredential;
        };
        let Some(gallery) = &self.mounts.gallery else {
            return Enrichment::NoGallery;
        };

        let requests: Vec<ImageSearchRequest> = settings
            .queries()
            .into_iter()
            .map(|query| ImageSearchRequest {
                query,
                per_page: settings.per_page,
                access_key: access_key.to_owned(),
            })
            .collect();

        let found: Vec<ImageRef> = search_best_effort(provider.as_ref(), &requests)
            .await
            .into_iter()
            .flat_map(|images| images.into_iter().take(settings.take_per_query))
            .collect();

        if found.is_empty() {
            return Enrichment::NoResults;
        }

        let attribution = Attribution::from_config(&media.images);
        match settings.enrich_mode {
            EnrichMode::Replace => {
                gallery.replace_children(&render::gallery(&found, &attribution));
                Enrichment::Replaced(found.len())
            }
            EnrichMode::Append => {
                let mut images = media.images.all_images();
                let added = found.len();
                images.extend(found);
                gallery.replace_children(&render::gallery(&images, &attribution));
                Enrichment::Appended(added)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pw_image_client::ImageProvider;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticSource(Result<&'static str, ()>);

    #[async_trait(?Send)]
    impl ConfigSource for StaticSource {
        async fn fetch_config(&self) -> Result<SiteConfig, FetchError> {
            match self.0 {
                Ok(body) => Ok(serde_json::from_str(body)?),
                Err(()) => Err(FetchError::Status {
                    status: 404,
                    body: "not found".into(),
                }),
            }
        }
    }

    struct CountingProvider {
        id: &'static str,
        calls: Arc<AtomicUsize>,
        per_query: usize,
    }

    #[async_trait(?Send)]
    impl ImageProvider for CountingProvider {
        fn provider_id(&self) -> &str {
            self.id
        }

        async fn search(&self, req: &ImageSearchRequest) -> Result<Vec<ImageRef>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if req.query.contains("worship") {
                return Err(FetchError::Transport("connection reset".into()));
            }
            Ok((0..self.per_query)
                .map(|i| ImageRef {
                    src: format!("https://img.test/{}/{i}.jpg", req.query.len()),
                    credit: Some(format!("Author {i}")),
                    source: Some("Unsplash".into()),
                })
                .collect())
        }
    }

    struct Harness {
        featured: CapturedMount,
        messages: CapturedMount,
        gallery: CapturedMount,
        calls: Arc<AtomicUsize>,
        pipeline: MediaPipeline,
    }

    fn harness(per_query: usize) -> Harness {
        let featured = CapturedMount::default();
        let messages = CapturedMount::default();
        let gallery = CapturedMount::default();
        let calls = Arc::new(AtomicUsize::new(0));

        let mut providers = ProviderRegistry::default();
        providers.register(Arc::new(CountingProvider {
            id: "unsplash",
            calls: calls.clone(),
            per_query,
        }));

        let pipeline = MediaPipeline::new(
            MediaMounts {
                featured: Some(Box::new(featured.clone())),
                messages: Some(Box::new(messages.clone())),
                gallery: Some(Box::new(gallery.clone())),
            },
            providers,
        );
        Harness {
            featured,
            messages,
            gallery,
            calls,
            pipeline,
        }
    }

    const CONFIG: &str = r#"{
        "media": {
            "youtube": {
                "featuredVideoId": "https://www.youtube.com/watch?v=oHg5SJYRHA0",
                "pastorChrisVideoIds": ["dQw4w9WgXcQ", "https://www.youtube.com/watch?v=oHg5SJYRHA0"]
            },
            "images": {
                "pastorChris": [{"src": "p.jpg", "credit": "Church Media", "source": "LoveWorld"}],
                "attributionTemplate": "Photo: {credit} / {source}"
            }
        }
    }"#;

    fn with_provider(provider: &str, key: &str, mode: &str) -> String {
        CONFIG.replacen(
            r#""images": {"#,
            &format!(
                r#""imageProvider": {{"provider": "{provider}", "unsplashAccessKey": "{key}", "enrichMode": "{mode}"}},
                "images": {{"#
            ),
            1,
        )
    }

    fn leak(s: String) -> &'static str {
        Box::leak(s.into_boxed_str())
    }

    #[tokio::test]
    async fn fetch_failure_renders_nothing() {
        let h = harness(6);
        let report = h.pipeline.run(&StaticSource(Err(()))).await;
        assert!(matches!(report, PipelineReport::ConfigUnavailable(_)));
        assert_eq!(h.featured.render_count(), 0);
        assert_eq!(h.messages.render_count(), 0);
        assert_eq!(h.gallery.render_count(), 0);
    }

    #[tokio::test]
    async fn parse_failure_renders_nothing() {
        let h = harness(6);
        let report = h.pipeline.run(&StaticSource(Ok("{ nope"))).await;
        assert!(matches!(
            report,
            PipelineReport::ConfigUnavailable(FetchError::Parse(_))
        ));
        assert_eq!(h.gallery.render_count(), 0);
    }

    #[tokio::test]
    async fn renders_all_sections_without_provider() {
        let h = harness(6);
        let report = h.pipeline.run(&StaticSource(Ok(CONFIG))).await;
        assert!(matches!(
            report,
            PipelineReport::Rendered {
                enrichment: Enrichment::NotConfigured
            }
        ));
        assert_eq!(h.featured.content()[0].find_all("iframe").len(), 1);
        assert_eq!(h.messages.content().len(), 2);
        let gallery = h.gallery.content();
        assert_eq!(gallery.len(), 1);
        assert_eq!(
            gallery[0].find_all("figcaption")[0].text_content(),
            "Photo: Church Media / LoveWorld"
        );
        assert_eq!(h.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_provider_issues_no_queries() {
        let h = harness(6);
        let config = leak(with_provider("flickr", "secret", "replace"));
        let report = h.pipeline.run(&StaticSource(Ok(config))).await;
        assert!(matches!(
            report,
            PipelineReport::Rendered {
                enrichment: Enrichment::UnknownProvider(_)
            }
        ));
        assert_eq!(h.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.gallery.render_count(), 1);
        assert_eq!(h.gallery.content()[0].find_all("img")[0].get_attr("src"), Some("p.jpg"));
    }

    #[tokio::test]
    async fn missing_key_issues_no_queries() {
        let h = harness(6);
        let config = leak(with_provider("unsplash", "", "replace"));
        let report = h.pipeline.run(&StaticSource(Ok(config))).await;
        assert!(matches!(
            report,
            PipelineReport::Rendered {
                enrichment: Enrichment::MissingCredential
            }
        ));
        assert_eq!(h.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn provider_results_replace_gallery() {
        let h = harness(6);
        let config = leak(with_provider("unsplash", "secret", "replace"));
        let report = h.pipeline.run(&StaticSource(Ok(config))).await;

        // three queries issued, the worship one fails, three results kept from each other
        assert_eq!(h.calls.load(Ordering::SeqCst), 3);
        assert!(matches!(
            report,
            PipelineReport::Rendered {
                enrichment: Enrichment::Replaced(6)
            }
        ));
        let gallery = h.gallery.content();
        assert_eq!(gallery.len(), 6);
        assert_eq!(h.gallery.render_count(), 2);
        assert!(gallery.iter().all(|f| f.find_all("img")[0].get_attr("src") != Some("p.jpg")));
        assert_eq!(
            gallery[0].find_all("figcaption")[0].text_content(),
            "Photo: Author 0 / Unsplash"
        );
    }

    #[tokio::test]
    async fn provider_results_append_after_curated_images() {
        let h = harness(2);
        let config = leak(with_provider("unsplash", "secret", "append"));
        let report = h.pipeline.run(&StaticSource(Ok(config))).await;
        assert!(matches!(
            report,
            PipelineReport::Rendered {
                enrichment: Enrichment::Appended(4)
            }
        ));
        let gallery = h.gallery.content();
        assert_eq!(gallery.len(), 5);
        assert_eq!(gallery[0].find_all("img")[0].get_attr("src"), Some("p.jpg"));
    }

    #[tokio::test]
    async fn empty_provider_results_keep_configured_gallery() {
        let h = harness(0);
        let config = leak(with_provider("unsplash", "secret", "replace"));
        let report = h.pipeline.run(&StaticSource(Ok(config))).await;
        assert!(matches!(
            report,
            PipelineReport::Rendered {
                enrichment: Enrichment::NoResults
            }
        ));
        assert_eq!(h.gallery.render_count(), 1);
        assert_eq!(h.gallery.content().len(), 1);
    }

    #[test]
    fn rerender_fully_replaces_previous_output() {
        let h = harness(0);
        let first: SiteConfig = serde_json::from_str(CONFIG).unwrap();
        h.pipeline.render(&first.media);
        assert_eq!(h.featured.content()[0].find_all("iframe").len(), 1);
        assert_eq!(h.messages.content().len(), 2);

        h.pipeline.render(&MediaConfig::default());
        let featured = h.featured.content();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].tag, "p");
        assert!(featured[0].find_all("iframe").is_empty());
        let messages = h.messages.content();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].find_all("iframe").is_empty());
        let gallery = h.gallery.content();
        assert_eq!(gallery.len(), 1);
        assert!(gallery[0].find_all("img").is_empty());
    }

    #[tokio::test]
    async fn null_sections_render_independently() {
        let h = harness(6);
        let config = r#"{"media": {
            "youtube": {"featuredVideoId": "dQw4w9WgXcQ", "pastorChrisVideoIds": null},
            "images": {"pastorChris": null, "worship": [{"src": null, "credit": "Ann"}]}
        }}"#;
        let report = h.pipeline.run(&StaticSource(Ok(config))).await;

        assert!(matches!(report, PipelineReport::Rendered { .. }));
        assert_eq!(h.featured.content()[0].find_all("iframe").len(), 1);
        let messages = h.messages.content();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].find_all("iframe").is_empty());
        let gallery = h.gallery.content();
        assert_eq!(gallery.len(), 1);
        assert_eq!(gallery[0].find_all("img")[0].get_attr("src"), Some(""));
    }

    #[tokio::test]
    async fn missing_mounts_are_skipped() {
        let pipeline = MediaPipeline::new(MediaMounts::default(), ProviderRegistry::default());
        let report = pipeline.run(&StaticSource(Ok(CONFIG))).await;
        assert!(matches!(report, PipelineReport::Rendered { .. }));
    }
}
