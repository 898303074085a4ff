//! `fetch` wrapper for same-origin JSON resources.

use crate::dom;
use async_trait::async_trait;
use pw_site_core::ConfigSource;
use pw_site_types::{FetchError, SiteConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

pub const MEDIA_CONFIG_PATH: &str = "data/config.json";

/// Fetch a URL (relative to the page) and return the body text.
///
/// Non-2xx responses are errors carrying the status and body.
pub async fn fetch_text(url: &str) -> Result<String, FetchError> {
    let opts = RequestInit::new();
    opts.set_method("GET");

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| FetchError::Transport(format!("{:?}", e)))?;

    let window = dom::window().ok_or_else(|| FetchError::Transport("no window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| FetchError::Transport(format!("fetch error: {:?}", e)))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| FetchError::Transport("not a Response".to_string()))?;

    let text = JsFuture::from(resp.text().map_err(|e| FetchError::Transport(format!("{:?}", e)))?)
        .await
        .map_err(|e| FetchError::Transport(format!("text error: {:?}", e)))?;

    let text_str = text.as_string().unwrap_or_default();

    if !resp.ok() {
        return Err(FetchError::Status {
            status: resp.status(),
            body: text_str,
        });
    }

    Ok(text_str)
}

/// Media configuration served next to the page.
pub struct HttpConfigSource {
    path: String,
}

impl Default for HttpConfigSource {
    fn default() -> Self {
        Self {
            path: MEDIA_CONFIG_PATH.to_owned(),
        }
    }
}

#[async_trait(?Send)]
impl ConfigSource for HttpConfigSource {
    async fn fetch_config(&self) -> Result<SiteConfig, FetchError> {
        let body = fetch_text(&self.path).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
