//! YouTube reference normalization.

use std::fmt;
use url::Url;

const SHORT_LINK_HOST: &str = "youtu.be";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turn a bare id, a `youtu.be/<id>` short link or a `watch?v=<id>` URL into an id.
///
/// Strings without `/` and whitespace are taken as ids verbatim; anything else
/// must parse as an absolute URL. Unusable input yields `None`.
pub fn normalize_video_ref(input: &str) -> Option<VideoId> {
    if input.is_empty() {
        return None;
    }
    if !input.contains('/') && !input.chars().any(char::is_whitespace) {
        return Some(VideoId(input.to_owned()));
    }

    let url = Url::parse(input).ok()?;
    let host = url.host_str().unwrap_or_default();
    let id = if host.contains(SHORT_LINK_HOST) {
        url.path_segments()?.next()?.to_owned()
    } else {
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())?
    };

    (!id.is_empty()).then_some(VideoId(id))
}
