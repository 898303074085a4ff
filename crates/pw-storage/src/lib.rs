use anyhow::{Context, Result};
use pw_site_types::{
    EVENTS_KEY, EventRecord, FormKind, PRAYER_SUBMISSIONS_KEY, PrayerSubmission, RecordId,
    SERMONS_KEY, SermonRecord, SubmissionRecord,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::warn;

/// String key/value storage with browser `localStorage` semantics.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// Used when the browser refuses storage access (private mode, sandboxed frames).
#[derive(Default)]
pub struct NoopStore;

impl KeyValueStore for NoopStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl KeyValueStore for InMemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let guard = self
            .items
            .read()
            .map_err(|_| anyhow::anyhow!("in-memory store lock poisoned"))?;
        Ok(guard.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self
            .items
            .write()
            .map_err(|_| anyhow::anyhow!("in-memory store lock poisoned"))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// ── JSON list helpers ──

/// Read the JSON array stored under `key`. Missing or unreadable values are empty.
pub fn read_list(store: &dyn KeyValueStore, key: &str) -> Vec<Value> {
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("storage read of '{}' failed: {}", key, err);
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<Value>>(&raw) {
        Ok(items) => items,
        Err(err) => {
            warn!("stored list '{}' is not a JSON array, ignoring: {}", key, err);
            Vec::new()
        }
    }
}

pub fn write_list(store: &dyn KeyValueStore, key: &str, items: &[Value]) -> Result<()> {
    let encoded = serde_json::to_string(items)?;
    store
        .set_item(key, &encoded)
        .with_context(|| format!("storage write of '{key}'"))
}

/// Append one entry and rewrite the whole list. Returns the new length.
pub fn append_to_list(store: &dyn KeyValueStore, key: &str, item: Value) -> Result<usize> {
    let mut items = read_list(store, key);
    items.push(item);
    write_list(store, key, &items)?;
    Ok(items.len())
}

/// Decode every entry of a stored list, skipping ones that do not fit `T`.
pub fn load_records<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    read_list(store, key)
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("skipping malformed entry {} in '{}': {}", idx, key, err);
                None
            }
        })
        .collect()
}

// ── Form submissions ──

pub struct SubmissionLog<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> SubmissionLog<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Store the submitted fields plus `timestamp` under `<kind>_submissions`.
    pub fn record(
        &self,
        kind: FormKind,
        fields: Map<String, Value>,
        timestamp: &str,
    ) -> Result<SubmissionRecord> {
        let record = SubmissionRecord {
            fields,
            timestamp: timestamp.to_owned(),
        };
        let value = serde_json::to_value(&record)?;
        append_to_list(self.store, &kind.storage_key(), value)?;
        Ok(record)
    }

    pub fn list(&self, kind: FormKind) -> Vec<SubmissionRecord> {
        load_records(self.store, &kind.storage_key())
    }
}

// ── Admin-managed lists ──

pub struct AdminRepository<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> AdminRepository<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    pub fn sermons(&self) -> Vec<SermonRecord> {
        load_records(self.store, SERMONS_KEY)
    }

    pub fn events(&self) -> Vec<EventRecord> {
        load_records(self.store, EVENTS_KEY)
    }

    pub fn prayer_requests(&self) -> Vec<PrayerSubmission> {
        load_records(self.store, PRAYER_SUBMISSIONS_KEY)
    }

    pub fn add_sermon(&self, fields: Map<String, Value>, now_epoch_ms: i64) -> Result<()> {
        self.add(SERMONS_KEY, fields, now_epoch_ms)
    }

    pub fn add_event(&self, fields: Map<String, Value>, now_epoch_ms: i64) -> Result<()> {
        self.add(EVENTS_KEY, fields, now_epoch_ms)
    }

    pub fn delete_sermon(&self, id: &str) -> Result<usize> {
        self.delete(SERMONS_KEY, id)
    }

    pub fn delete_event(&self, id: &str) -> Result<usize> {
        self.delete(EVENTS_KEY, id)
    }

    // Submitted fields are spread after the generated id, so a form field named
    // `id` wins.
    fn add(&self, key: &str, fields: Map<String, Value>, now_epoch_ms: i64) -> Result<()> {
        let mut record = Map::new();
        record.insert("id".to_owned(), Value::from(now_epoch_ms));
        record.extend(fields);
        append_to_list(self.store, key, Value::Object(record))?;
        Ok(())
    }

    /// Remove every entry whose id matches; returns how many were removed.
    fn delete(&self, key: &str, id: &str) -> Result<usize> {
        let items = read_list(self.store, key);
        let before = items.len();
        let kept: Vec<Value> = items
            .into_iter()
            .filter(|item| !id_matches(item, id))
            .collect();
        let removed = before - kept.len();
        write_list(self.store, key, &kept)?;
        Ok(removed)
    }
}

fn id_matches(item: &Value, id: &str) -> bool {
    item.get("id")
        .cloned()
        .and_then(|raw| serde_json::from_value::<RecordId>(raw).ok())
        .is_some_and(|rid| rid.matches(id))
}
