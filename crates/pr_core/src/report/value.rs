//! Report Value Module
//!
//! 디코딩된 플레이 리포트 페이로드 값 타입

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Discriminant of a report value, for diagnostics and tooling output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum ValueKind {
    Nil,
    Bool,
    Int,
    Float,
    Str,
    Bin,
    Array,
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Nil => "nil",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "str",
            ValueKind::Bin => "bin",
            ValueKind::Array => "array",
            ValueKind::Map => "map",
        };
        f.write_str(name)
    }
}

/// One decoded entry of a play report payload.
///
/// The closed set of kinds a report entry can carry after the transport
/// layer has decoded it. Map keys use `BTreeMap` so iteration order (and
/// therefore any rendered output) is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bin(Vec<u8>),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::Bin(_) => ValueKind::Bin,
            Value::Array(_) => ValueKind::Array,
            Value::Map(_) => ValueKind::Map,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(i) if *i >= 0 => Some(*i as u64),
            _ => None,
        }
    }

    /// Float value, coercing integers. Counters arrive as either kind
    /// depending on how the sender encoded them.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bin(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// JSON projection for tooling and the string API. `Bin` becomes an
    /// array of numbers (JSON has no byte kind); non-finite floats become
    /// null.
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Value::Nil => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(x) => serde_json::Number::from_f64(*x)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Bin(bytes) => {
                serde_json::Value::Array(bytes.iter().map(|b| serde_json::Value::from(*b)).collect())
            }
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json_value).collect())
            }
            Value::Map(entries) => serde_json::Value::Object(
                entries.iter().map(|(k, v)| (k.clone(), v.to_json_value())).collect(),
            ),
        }
    }
}

/// Scalars render bare (a string shows its text without quotes, the common
/// case for presence lines); containers render as compact JSON.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Bin(bytes) => write!(f, "<{} bytes>", bytes.len()),
            Value::Array(_) | Value::Map(_) => match serde_json::to_string(&self.to_json_value()) {
                Ok(json) => f.write_str(&json),
                Err(_) => f.write_str("<unprintable>"),
            },
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    // u64 beyond i64::MAX or a true float
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bin(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_accessors_match_kind() {
        let v = Value::Int(42);
        assert_eq!(v.kind(), ValueKind::Int);
        assert_eq!(v.as_i64(), Some(42));
        assert_eq!(v.as_u64(), Some(42));
        assert_eq!(v.as_str(), None);

        let v = Value::Str("Hyrule Field".to_string());
        assert_eq!(v.as_str(), Some("Hyrule Field"));
        assert_eq!(v.as_i64(), None);

        let v = Value::Int(-1);
        assert_eq!(v.as_u64(), None);
        assert_eq!(v.as_i64(), Some(-1));
    }

    #[test]
    fn test_bin_and_nil_accessors() {
        let v = Value::from(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(v.kind(), ValueKind::Bin);
        assert_eq!(v.as_bytes(), Some(&[0xde, 0xad, 0xbe, 0xef][..]));
        assert!(!v.is_nil());
        // JSON has no byte kind, so Bin projects to an array of numbers.
        assert_eq!(v.to_json_value(), serde_json::json!([222, 173, 190, 239]));

        let v = Value::Nil;
        assert!(v.is_nil());
        assert_eq!(v.as_bytes(), None);
        assert_eq!(v.as_bool(), None);
        assert_eq!(v.to_json_value(), serde_json::Value::Null);
    }

    #[test]
    fn test_float_coerces_int() {
        assert_eq!(Value::Int(90).as_f64(), Some(90.0));
        assert_eq!(Value::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(Value::Str("90".to_string()).as_f64(), None);
    }

    #[test]
    fn test_display_scalars_bare() {
        assert_eq!(Value::Str("Mario".to_string()).to_string(), "Mario");
        assert_eq!(Value::Int(7).to_string(), "7");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::Bin(vec![1, 2, 3]).to_string(), "<3 bytes>");
    }

    #[test]
    fn test_display_containers_compact_json() {
        let v = Value::Array(vec![Value::Int(1), Value::Str("a".to_string())]);
        assert_eq!(v.to_string(), r#"[1,"a"]"#);

        let mut entries = BTreeMap::new();
        entries.insert("mode".to_string(), Value::Str("race".to_string()));
        entries.insert("cc".to_string(), Value::Int(150));
        // BTreeMap renders in key order
        assert_eq!(Value::Map(entries).to_string(), r#"{"cc":150,"mode":"race"}"#);
    }

    #[test]
    fn test_json_conversion_round_trip() {
        let json: serde_json::Value = serde_json::json!({
            "minutes": 12,
            "ratio": 0.75,
            "name": "Link",
            "flags": [true, false],
            "nested": { "depth": 2 }
        });

        let value = Value::from(json.clone());
        assert_eq!(value.kind(), ValueKind::Map);
        let map = value.as_map().unwrap();
        assert_eq!(map["minutes"].as_i64(), Some(12));
        assert_eq!(map["ratio"].as_f64(), Some(0.75));
        assert_eq!(map["name"].as_str(), Some("Link"));

        assert_eq!(value.to_json_value(), json);
    }

    #[test]
    fn test_large_u64_maps_to_float() {
        let json = serde_json::json!(u64::MAX);
        let value = Value::from(json);
        assert_eq!(value.kind(), ValueKind::Float);
    }

    #[test]
    fn test_kind_display_covers_all_variants() {
        for kind in ValueKind::iter() {
            assert!(!kind.to_string().is_empty());
        }
    }
}
