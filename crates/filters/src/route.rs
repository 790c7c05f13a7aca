use std::collections::BTreeMap;

use serde_json::Value;
use url::form_urlencoded;

/// The filter keys recognized when filter state comes back from a URL.
///
/// Every key maps to an optional string. A value that is not a string (or a
/// query key given more than once) counts as absent; unknown keys are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteFilterSchema {
    keys: &'static [&'static str],
}

impl RouteFilterSchema {
    pub const fn new(keys: &'static [&'static str]) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &'static [&'static str] {
        self.keys
    }

    pub fn parse(&self, value: &Value) -> BTreeMap<String, String> {
        let Some(object) = value.as_object() else {
            return BTreeMap::new();
        };
        self.keys
            .iter()
            .filter_map(|key| {
                object
                    .get(*key)
                    .and_then(Value::as_str)
                    .map(|value| (key.to_string(), value.to_string()))
            })
            .collect()
    }

    pub fn parse_query(&self, query: &str) -> BTreeMap<String, String> {
        let mut seen: BTreeMap<String, Option<String>> = BTreeMap::new();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            if !self.keys.iter().any(|known| *known == &*key) {
                continue;
            }
            seen.entry(key.into_owned())
                .and_modify(|existing| *existing = None)
                .or_insert_with(|| Some(value.into_owned()));
        }
        seen.into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .collect()
    }

    pub fn to_query(&self, values: &BTreeMap<String, String>) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for key in self.keys {
            if let Some(value) = values.get(*key) {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const SCHEMA: RouteFilterSchema = RouteFilterSchema::new(&["type", "location"]);

    #[test]
    fn parse_drops_unknown_and_non_string_values() {
        let parsed = SCHEMA.parse(&json!({
            "type": "gift",
            "location": 12,
            "page": "3",
        }));
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get("type").map(String::as_str), Some("gift"));
    }

    #[test]
    fn parse_of_non_object_is_empty() {
        assert!(SCHEMA.parse(&json!(["type", "gift"])).is_empty());
        assert!(SCHEMA.parse(&Value::Null).is_empty());
    }

    #[test]
    fn repeated_query_key_is_absent() {
        let parsed = SCHEMA.parse_query("?type=gift&type=grant&location=kraken");
        assert_eq!(parsed.get("type"), None);
        assert_eq!(parsed.get("location").map(String::as_str), Some("kraken"));
    }

    #[test]
    fn query_escapes_values() {
        let mut values = BTreeMap::new();
        values.insert("type".to_string(), "dividends income".to_string());
        let query = SCHEMA.to_query(&values);
        assert_eq!(query, "type=dividends+income");
        assert_eq!(SCHEMA.parse_query(&query), values);
    }
}
