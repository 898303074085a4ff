use async_trait::async_trait;
use futures::future::join_all;
use pw_site_types::{FetchError, ImageRef};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSearchRequest {
    pub query: String,
    pub per_page: u32,
    pub access_key: String,
}

/// A third-party image search service.
///
/// Futures are not `Send`: in the browser they are driven by the page's
/// single-threaded executor.
#[async_trait(?Send)]
pub trait ImageProvider {
    fn provider_id(&self) -> &str;
    async fn search(&self, req: &ImageSearchRequest) -> Result<Vec<ImageRef>, FetchError>;
}

#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn ImageProvider>>,
}

impl ProviderRegistry {
    pub fn register(&mut self, provider: Arc<dyn ImageProvider>) {
        self.providers
            .insert(provider.provider_id().to_owned(), provider);
    }

    pub fn provider(&self, provider_id: &str) -> Option<Arc<dyn ImageProvider>> {
        self.providers.get(provider_id).cloned()
    }
}

/// Issue all searches concurrently and wait for every one of them.
///
/// A failed search is logged and contributes an empty list; it never cancels
/// its siblings. Output order follows `requests`.
pub async fn search_best_effort(
    provider: &dyn ImageProvider,
    requests: &[ImageSearchRequest],
) -> Vec<Vec<ImageRef>> {
    let searches = requests.iter().map(|req| async move {
        match provider.search(req).await {
            Ok(images) => images,
            Err(err) => {
                warn!(
                    "{} search for '{}' failed: {}",
                    provider.provider_id(),
                    req.query,
                    err
                );
                Vec::new()
            }
        }
    });
    join_all(searches).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct ScriptedProvider {
        calls: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl ImageProvider for ScriptedProvider {
        fn provider_id(&self) -> &str {
            "scripted"
        }

        async fn search(&self, req: &ImageSearchRequest) -> Result<Vec<ImageRef>, FetchError> {
            self.calls.borrow_mut().push(req.query.clone());
            if req.query == "broken" {
                return Err(FetchError::Status {
                    status: 401,
                    body: "bad key".into(),
                });
            }
            Ok(vec![ImageRef {
                src: format!("{}.jpg", req.query),
                credit: Some("someone".into()),
                source: Some("Scripted".into()),
            }])
        }
    }

    fn request(query: &str) -> ImageSearchRequest {
        ImageSearchRequest {
            query: query.into(),
            per_page: 6,
            access_key: "key".into(),
        }
    }

    #[tokio::test]
    async fn failures_are_isolated_per_query() {
        let provider = ScriptedProvider {
            calls: RefCell::new(Vec::new()),
        };
        let results =
            search_best_effort(&provider, &[request("a"), request("broken"), request("c")]).await;

        assert_eq!(provider.calls.borrow().len(), 3);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0][0].src, "a.jpg");
        assert!(results[1].is_empty());
        assert_eq!(results[2][0].src, "c.jpg");
    }

    #[test]
    fn registry_looks_up_by_id() {
        let mut registry = ProviderRegistry::default();
        registry.register(Arc::new(ScriptedProvider {
            calls: RefCell::new(Vec::new()),
        }));
        assert!(registry.provider("scripted").is_some());
        assert!(registry.provider("flickr").is_none());
    }
}
