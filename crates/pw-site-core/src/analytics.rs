//! Page analytics records. Events are only logged, never sent anywhere.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsEvent {
    pub name: String,
    pub timestamp: String,
    pub data: Map<String, Value>,
}

impl AnalyticsEvent {
    pub fn new(name: &str, timestamp: &str, data: Map<String, Value>) -> Self {
        Self {
            name: name.to_owned(),
            timestamp: timestamp.to_owned(),
            data,
        }
    }

    pub fn page_view(page: &str, timestamp: &str) -> Self {
        let mut data = Map::new();
        data.insert("page".to_owned(), Value::String(page.to_owned()));
        Self::new("page_view", timestamp, data)
    }

    /// `{ name, timestamp, ...data }`; keys in `data` override the first two.
    pub fn to_json(&self) -> Value {
        let mut record = Map::new();
        record.insert("name".to_owned(), Value::String(self.name.clone()));
        record.insert("timestamp".to_owned(), Value::String(self.timestamp.clone()));
        record.extend(self.data.clone());
        Value::Object(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_view_record_shape() {
        let event = AnalyticsEvent::page_view("/sermons.html", "2026-10-19T08:00:00.000Z");
        assert_eq!(
            event.to_json(),
            json!({
                "name": "page_view",
                "timestamp": "2026-10-19T08:00:00.000Z",
                "page": "/sermons.html"
            })
        );
    }

    #[test]
    fn data_spreads_last() {
        let mut data = Map::new();
        data.insert("name".into(), json!("override"));
        let event = AnalyticsEvent::new("click", "t", data);
        assert_eq!(event.to_json()["name"], "override");
    }
}
