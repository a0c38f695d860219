//! Play Report Module
//!
//! 애플리케이션이 보낸 플레이 리포트와 실행 중인 앱 메타데이터

pub mod value;

pub use value::{Value, ValueKind};

use crate::error::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity of the application a report came from, as shown to formatters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMeta {
    /// Title id, lowercase hex.
    pub app_id: String,
    /// Human-readable application name.
    pub title: String,
    /// Application version string, when the host knows it.
    pub version: Option<String>,
}

impl AppMeta {
    pub fn new(app_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self { app_id: app_id.into().to_lowercase(), title: title.into(), version: None }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// A decoded play report: a read-only bag of named values.
///
/// Reports are assembled once (by the transport layer or from a JSON
/// fixture) and only read afterwards. Lookup by exact key; absence is an
/// ordinary `None`, never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    entries: BTreeMap<String, Value>,
}

impl Report {
    pub fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Value under `key`, if the report carries it.
    pub fn try_get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        pairs.into_iter().collect()
    }

    /// Builds a report from a JSON object. Fixture and tooling path; the
    /// raw report transport lives outside this crate.
    pub fn from_json_value(json: serde_json::Value) -> ReportResult<Self> {
        match json {
            serde_json::Value::Object(map) => Ok(Self {
                entries: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            }),
            other => Err(ReportError::NotAnObject { kind: json_kind(&other).to_string() }),
        }
    }

    pub fn from_json_str(json: &str) -> ReportResult<Self> {
        Self::from_json_value(serde_json::from_str(json)?)
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries.iter().map(|(k, v)| (k.clone(), v.to_json_value())).collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Report {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        Self { entries: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_get_present_and_absent() {
        let report = Report::from_pairs([("minutes", 30i64), ("laps", 3i64)]);
        assert_eq!(report.try_get("minutes").and_then(Value::as_i64), Some(30));
        assert!(report.try_get("course").is_none());
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_from_pairs_mixed_kinds() {
        // Entries of different kinds go through Value::from explicitly.
        let report = Report::from_pairs([
            ("course", Value::from("Rainbow Road")),
            ("cc", Value::from(150i64)),
            ("mirrored", Value::from(true)),
        ]);

        assert_eq!(report.len(), 3);
        assert_eq!(report.try_get("course").and_then(Value::as_str), Some("Rainbow Road"));
        assert_eq!(report.try_get("cc").and_then(Value::as_i64), Some(150));
        assert_eq!(report.try_get("mirrored").and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn test_from_json_str_object() {
        let report = Report::from_json_str(r#"{"mode":"online","score":120}"#).unwrap();
        assert_eq!(report.try_get("mode").and_then(Value::as_str), Some("online"));
        assert_eq!(report.try_get("score").and_then(Value::as_i64), Some(120));
    }

    #[test]
    fn test_from_json_str_rejects_non_object() {
        let err = Report::from_json_str("[1,2,3]").unwrap_err();
        assert!(matches!(err, ReportError::NotAnObject { .. }));

        let err = Report::from_json_str("not json at all").unwrap_err();
        assert!(matches!(err, ReportError::Json(_)));
    }

    #[test]
    fn test_json_round_trip_preserves_entries() {
        let json: serde_json::Value =
            serde_json::json!({"a": 1, "b": "two", "c": {"nested": true}});
        let report = Report::from_json_value(json.clone()).unwrap();
        assert_eq!(report.to_json_value(), json);
    }

    #[test]
    fn test_app_meta_normalizes_id() {
        let app = AppMeta::new("01007EF00011E000", "The Legend of Zelda: Breath of the Wild");
        assert_eq!(app.app_id, "01007ef00011e000");
        assert!(app.version.is_none());

        let app = app.with_version("1.6.0");
        assert_eq!(app.version.as_deref(), Some("1.6.0"));
    }
}
