use anyhow::Context;
use async_trait::async_trait;
use clap::Parser;
use pw_image_client::ProviderRegistry;
use pw_image_unsplash::UnsplashProvider;
use pw_site_core::{CapturedMount, ConfigSource, Enrichment, MediaMounts, MediaPipeline};
use pw_site_types::{FetchError, SiteConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Render the site's media sections from a config file and print the HTML.
#[derive(Debug, Parser)]
#[command(name = "media-preview", version)]
struct Args {
    /// Media configuration to render.
    #[arg(long, env = "PW_CONFIG_PATH", default_value = "data/config.json")]
    config: PathBuf,

    /// Query the configured image provider and merge its results into the gallery.
    #[arg(long)]
    enrich: bool,

    /// Override the Unsplash API base URL.
    #[arg(long, env = "PW_UNSPLASH_ENDPOINT")]
    unsplash_endpoint: Option<String>,
}

struct FileConfigSource {
    path: PathBuf,
}

#[async_trait(?Send)]
impl ConfigSource for FileConfigSource {
    async fn fetch_config(&self) -> Result<SiteConfig, FetchError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Transport(format!("{}: {e}", self.path.display())))?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug)]
struct Preview {
    featured: String,
    messages: String,
    gallery: String,
    enrichment: Option<Enrichment>,
}

impl Preview {
    fn enrichment_summary(&self) -> String {
        match &self.enrichment {
            Some(outcome) => format!("gallery enrichment: {outcome:?}"),
            None => "gallery enrichment skipped (pass --enrich to query the provider)".to_owned(),
        }
    }

    fn print(&self) {
        info!("{}", self.enrichment_summary());
        println!("<!-- #pastor-chris-featured -->\n{}\n", self.featured);
        println!("<!-- #pastor-chris-messages -->\n{}\n", self.messages);
        println!("<!-- #christ-embassy-gallery -->\n{}", self.gallery);
    }
}

async fn preview(args: &Args) -> anyhow::Result<Preview> {
    let source = FileConfigSource {
        path: args.config.clone(),
    };
    let config = source
        .fetch_config()
        .await
        .with_context(|| format!("could not load {}", args.config.display()))?;

    let featured = CapturedMount::default();
    let messages = CapturedMount::default();
    let gallery = CapturedMount::default();
    let mounts = MediaMounts {
        featured: Some(Box::new(featured.clone())),
        messages: Some(Box::new(messages.clone())),
        gallery: Some(Box::new(gallery.clone())),
    };

    let mut providers = ProviderRegistry::default();
    providers.register(Arc::new(UnsplashProvider::new(
        args.unsplash_endpoint.clone(),
    )));

    let pipeline = MediaPipeline::new(mounts, providers);
    pipeline.render(&config.media);
    let enrichment = if args.enrich {
        Some(pipeline.enrich(&config.media).await)
    } else {
        None
    };

    Ok(Preview {
        featured: featured.to_html(),
        messages: messages.to_html(),
        gallery: gallery.to_html(),
        enrichment,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("rendering media sections from {}", args.config.display());

    let rendered = preview(&args).await?;
    rendered.print();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args_for(config: PathBuf, enrich: bool) -> Args {
        Args {
            config,
            enrich,
            unsplash_endpoint: Some("http://127.0.0.1:9".to_owned()),
        }
    }

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        fs::write(&path, body).expect("config should be written");
        path
    }

    #[tokio::test]
    async fn renders_all_sections_from_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_config(
            &dir,
            r#"{
                "media": {
                    "youtube": {
                        "featuredVideoId": "https://youtu.be/abc123",
                        "pastorChrisVideoIds": ["https://www.youtube.com/watch?v=xyz789"]
                    },
                    "images": {
                        "worship": [{ "src": "img/w.jpg", "credit": "Ann", "source": "Church" }]
                    }
                }
            }"#,
        );

        let rendered = preview(&args_for(path, false)).await?;

        assert!(rendered.featured.contains("https://www.youtube-nocookie.com/embed/abc123"));
        assert!(rendered.messages.contains("https://www.youtube-nocookie.com/embed/xyz789"));
        assert!(rendered.gallery.contains("img/w.jpg"));
        assert!(rendered.gallery.contains("Photo: Ann / Church"));
        assert!(rendered.enrichment.is_none());
        assert!(rendered.enrichment_summary().contains("skipped"));
        Ok(())
    }

    #[tokio::test]
    async fn empty_config_renders_placeholders() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_config(&dir, "{}");

        let rendered = preview(&args_for(path, false)).await?;

        assert!(rendered.featured.contains("data/config.json"));
        assert!(rendered.messages.contains("pastorChrisVideoIds"));
        assert!(!rendered.gallery.contains("<img"));
        Ok(())
    }

    #[tokio::test]
    async fn enrich_without_provider_settings_is_not_configured() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_config(&dir, r#"{ "media": {} }"#);

        let rendered = preview(&args_for(path, true)).await?;

        assert_eq!(rendered.enrichment, Some(Enrichment::NotConfigured));
        assert_eq!(rendered.enrichment_summary(), "gallery enrichment: NotConfigured");
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = preview(&args_for(dir.path().join("absent.json"), false)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = write_config(&dir, "{ not json");

        let result = preview(&args_for(path, false)).await;

        assert!(result.is_err());
        Ok(())
    }
}
