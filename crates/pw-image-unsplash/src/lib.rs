use async_trait::async_trait;
use pw_image_client::{ImageProvider, ImageSearchRequest};
use pw_site_types::{FetchError, ImageRef, UNSPLASH_PROVIDER};
use serde::Deserialize;
use tracing::debug;
use url::Url;

pub const UNSPLASH_SOURCE_LABEL: &str = "Unsplash";

/// HTTP adapter for the Unsplash photo search API.
///
/// Reads `UNSPLASH_API_URL` from environment at construction time
/// (default: `https://api.unsplash.com`).
pub struct UnsplashProvider {
    endpoint: String,
    http: reqwest::Client,
}

impl Default for UnsplashProvider {
    fn default() -> Self {
        Self::new(None)
    }
}

impl UnsplashProvider {
    pub fn new(endpoint: Option<String>) -> Self {
        let endpoint = endpoint
            .or_else(|| std::env::var("UNSPLASH_API_URL").ok())
            .unwrap_or_else(|| "https://api.unsplash.com".to_string());
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn search_url(&self, req: &ImageSearchRequest) -> Result<Url, FetchError> {
        let per_page = req.per_page.to_string();
        Url::parse_with_params(
            &format!("{}/search/photos", self.endpoint),
            [
                ("query", req.query.as_str()),
                ("per_page", per_page.as_str()),
                ("client_id", req.access_key.as_str()),
            ],
        )
        .map_err(|e| FetchError::Transport(format!("invalid unsplash endpoint: {e}")))
    }
}

// ── Unsplash REST API types ──

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: PhotoUrls,
    user: PhotoUser,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    #[serde(default)]
    small: String,
}

#[derive(Debug, Deserialize)]
struct PhotoUser {
    #[serde(default)]
    name: String,
}

/// Decode a search response body. Result entries without `urls`/`user` are dropped.
pub fn parse_search_response(body: &str) -> Result<Vec<ImageRef>, FetchError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    let images = response
        .results
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<Photo>(raw) {
            Ok(photo) => Some(ImageRef {
                src: photo.urls.small,
                credit: Some(photo.user.name),
                source: Some(UNSPLASH_SOURCE_LABEL.to_owned()),
            }),
            Err(err) => {
                debug!("dropping unsplash result: {}", err);
                None
            }
        })
        .collect();
    Ok(images)
}

#[async_trait(?Send)]
impl ImageProvider for UnsplashProvider {
    fn provider_id(&self) -> &str {
        UNSPLASH_PROVIDER
    }

    async fn search(&self, req: &ImageSearchRequest) -> Result<Vec<ImageRef>, FetchError> {
        let url = self.search_url(req)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(format!("unsplash search transport: {e}")))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_search_response(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_parameters() {
        let provider = UnsplashProvider::new(Some("https://unsplash.test/".into()));
        let url = provider
            .search_url(&ImageSearchRequest {
                query: "Christ Embassy worship".into(),
                per_page: 6,
                access_key: "k&ey".into(),
            })
            .unwrap();
        assert_eq!(url.path(), "/search/photos");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("query".to_string(), "Christ Embassy worship".to_string()),
                ("per_page".to_string(), "6".to_string()),
                ("client_id".to_string(), "k&ey".to_string()),
            ]
        );
    }

    #[test]
    fn parses_small_url_and_user_name() {
        let body = r#"{
            "total": 2,
            "results": [
                {"urls": {"small": "https://images.test/1-small.jpg", "full": "x"}, "user": {"name": "Ama K"}},
                {"urls": {"small": "https://images.test/2-small.jpg"}, "user": {"name": "Tunde"}}
            ]
        }"#;
        let images = parse_search_response(body).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].src, "https://images.test/1-small.jpg");
        assert_eq!(images[0].credit.as_deref(), Some("Ama K"));
        assert_eq!(images[1].source.as_deref(), Some("Unsplash"));
    }

    #[test]
    fn incomplete_results_are_dropped() {
        let body = r#"{"results": [{"urls": {"small": "a.jpg"}}, {"urls": {"small": "b.jpg"}, "user": {"name": "B"}}]}"#;
        let images = parse_search_response(body).unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].src, "b.jpg");
    }

    #[test]
    fn missing_results_is_empty_and_garbage_is_an_error() {
        assert!(parse_search_response(r#"{"errors": ["OAuth error"]}"#).unwrap().is_empty());
        assert!(matches!(parse_search_response("<html>"), Err(FetchError::Parse(_))));
    }
}
