//! Formatter Input/Output Types
//!
//! 포매터가 받는 페이로드 래퍼와 반환 값

use crate::report::{AppMeta, Report, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// What a formatter produced for the host presence line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedValue {
    /// Display-ready text.
    Text(String),
    /// Clear whatever presence text is currently shown.
    ForceReset,
    /// The formatter ran but declined the value (unknown flag, unexpected
    /// shape). Distinct from extraction failure: the rule still claimed
    /// the report.
    Unhandled,
}

impl FormattedValue {
    pub fn is_handled(&self) -> bool {
        !matches!(self, FormattedValue::Unhandled)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormattedValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<String> for FormattedValue {
    fn from(text: String) -> Self {
        FormattedValue::Text(text)
    }
}

impl From<&str> for FormattedValue {
    fn from(text: &str) -> Self {
        FormattedValue::Text(text.to_string())
    }
}

/// Payload of a single-key rule: the matched value plus call context.
/// Borrows live for the duration of the formatter call.
#[derive(Debug, Clone)]
pub struct SingleValue<'a> {
    pub value: &'a Value,
    pub app: &'a AppMeta,
    pub report: &'a Report,
}

/// Payload of an all-required rule: one value per listed key, in key
/// order.
#[derive(Debug, Clone)]
pub struct MultiValue<'a> {
    pub values: Vec<&'a Value>,
    pub app: &'a AppMeta,
    pub report: &'a Report,
}

/// Payload of a sparse rule: the present subset of the listed keys.
/// May be empty.
#[derive(Debug, Clone)]
pub struct SparseMultiValue<'a> {
    pub values: BTreeMap<&'a str, &'a Value>,
    pub app: &'a AppMeta,
    pub report: &'a Report,
}

impl<'a> SparseMultiValue<'a> {
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.values.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

/// Formatter callbacks are shared and shape-typed per rule kind.
/// `Send + Sync` so a built analyzer can serve concurrent callers.
pub type ValueFormatter = Arc<dyn Fn(SingleValue<'_>) -> FormattedValue + Send + Sync>;
pub type MultiValueFormatter = Arc<dyn Fn(MultiValue<'_>) -> FormattedValue + Send + Sync>;
pub type SparseMultiValueFormatter =
    Arc<dyn Fn(SparseMultiValue<'_>) -> FormattedValue + Send + Sync>;
