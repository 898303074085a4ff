use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_ATTRIBUTION_TEMPLATE: &str = "Photo: {credit} / {source}";
pub const UNSPLASH_PROVIDER: &str = "unsplash";

pub const SERMONS_KEY: &str = "sermons";
pub const EVENTS_KEY: &str = "events";
pub const PRAYER_SUBMISSIONS_KEY: &str = "prayer_submissions";

pub const DEFAULT_PROVIDER_QUERIES: [&str; 3] = [
    "Chris Oyakhilome preaching",
    "Christ Embassy worship",
    "church crusade conference",
];

// ── Media configuration (data/config.json) ──

/// An explicit `null` reads the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub youtube: YoutubeConfig,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: ImagesConfig,
    #[serde(default)]
    pub image_provider: Option<ImageProviderConfig>,
}

impl MediaConfig {
    /// Provider descriptor; the media-level entry wins over one nested in `images`.
    pub fn image_provider(&self) -> Option<&ImageProviderConfig> {
        self.image_provider
            .as_ref()
            .or(self.images.image_provider.as_ref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeConfig {
    #[serde(default)]
    pub featured_video_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pastor_chris_video_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImagesConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pastor_chris: Vec<ImageRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub worship: Vec<ImageRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub crusades: Vec<ImageRef>,
    #[serde(default)]
    pub attribution_template: Option<String>,
    #[serde(default)]
    pub image_provider: Option<ImageProviderConfig>,
}

impl ImagesConfig {
    /// All images in category order: `pastorChris`, `worship`, `crusades`.
    pub fn all_images(&self) -> Vec<ImageRef> {
        self.pastor_chris
            .iter()
            .chain(self.worship.iter())
            .chain(self.crusades.iter())
            .cloned()
            .collect()
    }

    pub fn attribution_template(&self) -> &str {
        match &self.attribution_template {
            Some(t) if !t.is_empty() => t,
            _ => DEFAULT_ATTRIBUTION_TEMPLATE,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub src: String,
    #[serde(default)]
    pub credit: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl ImageRef {
    pub fn credit(&self) -> Option<&str> {
        self.credit.as_deref().filter(|c| !c.is_empty())
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnrichMode {
    /// Provider results fully replace the configured gallery.
    #[default]
    Replace,
    /// Provider results are added after the configured images.
    Append,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageProviderConfig {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub unsplash_access_key: Option<String>,
    #[serde(default)]
    pub enrich_mode: EnrichMode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub queries: Vec<String>,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_take_per_query")]
    pub take_per_query: usize,
}

fn default_per_page() -> u32 {
    6
}

fn default_take_per_query() -> usize {
    3
}

impl Default for ImageProviderConfig {
    fn default() -> Self {
        Self {
            provider: String::new(),
            unsplash_access_key: None,
            enrich_mode: EnrichMode::default(),
            queries: Vec::new(),
            per_page: default_per_page(),
            take_per_query: default_take_per_query(),
        }
    }
}

impl ImageProviderConfig {
    pub fn access_key(&self) -> Option<&str> {
        self.unsplash_access_key
            .as_deref()
            .filter(|k| !k.is_empty())
    }

    pub fn queries(&self) -> Vec<String> {
        if self.queries.is_empty() {
            DEFAULT_PROVIDER_QUERIES.iter().map(|q| q.to_string()).collect()
        } else {
            self.queries.clone()
        }
    }
}

// ── Stored records (local storage) ──

/// Record identifier. Older entries hold numbers, hand-edited ones strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Loose comparison against a rendered id (`"17"` matches `17`).
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            RecordId::Number(n) => raw.trim().parse::<i64>().ok() == Some(*n),
            RecordId::Text(s) => s == raw,
        }
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SermonRecord {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub series: String,
    #[serde(default)]
    pub date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRecord {
    pub id: RecordId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrayerSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub request: String,
    #[serde(default)]
    pub privacy: Option<String>,
    #[serde(default)]
    pub timestamp: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A form post as stored: every field verbatim plus the submission time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionRecord {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Contact,
    Prayer,
    Newsletter,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Contact, FormKind::Prayer, FormKind::Newsletter];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Prayer => "prayer",
            FormKind::Newsletter => "newsletter",
        }
    }

    pub fn storage_key(&self) -> String {
        format!("{}_submissions", self.as_str())
    }

    pub fn confirmation_message(&self) -> String {
        format!("Thank you! Your {} has been received.", self.as_str())
    }
}

// ── Fetch outcome ──

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}
