//! Rule Module
//!
//! 단일 추출-포매팅 규칙과 그 디스패치

use crate::report::{AppMeta, Report};
use crate::rules::types::{
    FormattedValue, MultiValue, MultiValueFormatter, SingleValue, SparseMultiValue,
    SparseMultiValueFormatter, ValueFormatter,
};
use std::fmt;

/// Extraction discipline of a rule, carrying the formatter whose input
/// shape matches it. Pairing a kind with a foreign formatter shape is
/// unrepresentable.
pub enum RuleKind {
    /// One key; fires only when that key is present.
    Single(ValueFormatter),
    /// Several keys; fires only when every one is present.
    AllRequired(MultiValueFormatter),
    /// Several keys; fires with whatever subset is present.
    Sparse(SparseMultiValueFormatter),
}

impl RuleKind {
    pub fn label(&self) -> &'static str {
        match self {
            RuleKind::Single(_) => "single",
            RuleKind::AllRequired(_) => "all_required",
            RuleKind::Sparse(_) => "sparse",
        }
    }
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What extraction produced for a rule.
#[derive(Debug, Clone)]
pub enum Extracted<'a> {
    Single(SingleValue<'a>),
    Multi(MultiValue<'a>),
    Sparse(SparseMultiValue<'a>),
    /// Already display-ready; the dispatcher returns it without calling
    /// the formatter.
    Formatted(FormattedValue),
}

impl Extracted<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            Extracted::Single(_) => "single",
            Extracted::Multi(_) => "multi",
            Extracted::Sparse(_) => "sparse",
            Extracted::Formatted(_) => "formatted",
        }
    }
}

/// One extraction-and-formatting unit. Immutable once constructed; the
/// owning rule set decides nothing about ordering, it only stores these.
pub struct Rule {
    /// Higher = consulted first by an analyzer scan.
    pub priority: i32,
    keys: Vec<String>,
    kind: RuleKind,
    precomputed: Option<FormattedValue>,
}

impl Rule {
    /// Rule over one required key.
    pub fn single(priority: i32, key: impl Into<String>, formatter: ValueFormatter) -> Self {
        Self { priority, keys: vec![key.into()], kind: RuleKind::Single(formatter), precomputed: None }
    }

    /// Rule requiring every listed key. Panics when `keys` is empty; a
    /// rule that can never match anything is a registration defect.
    pub fn all_required<I, S>(priority: i32, keys: I, formatter: MultiValueFormatter) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        assert!(!keys.is_empty(), "all-required rule registered with no keys");
        Self { priority, keys, kind: RuleKind::AllRequired(formatter), precomputed: None }
    }

    /// Rule matching any present subset of the listed keys. Panics when
    /// `keys` is empty.
    pub fn sparse<I, S>(priority: i32, keys: I, formatter: SparseMultiValueFormatter) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        assert!(!keys.is_empty(), "sparse rule registered with no keys");
        Self { priority, keys, kind: RuleKind::Sparse(formatter), precomputed: None }
    }

    /// Attach a precomputed result. The presence gate still applies, but
    /// once it passes the stored value is returned and the formatter is
    /// never called.
    pub fn with_precomputed(mut self, value: FormattedValue) -> Self {
        self.precomputed = Some(value);
        self
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Applies the kind's presence gate to `report`.
    ///
    /// `None` means the report does not satisfy the rule (ordinary data
    /// absence). `Some` carries the payload for the formatter, or the
    /// precomputed value when one is attached.
    pub fn try_extract<'a>(&'a self, app: &'a AppMeta, report: &'a Report) -> Option<Extracted<'a>> {
        let payload = match &self.kind {
            RuleKind::Single(_) => {
                let value = report.try_get(&self.keys[0])?;
                Extracted::Single(SingleValue { value, app, report })
            }
            RuleKind::AllRequired(_) => {
                // Atomic: one absent key fails the whole rule.
                let mut values = Vec::with_capacity(self.keys.len());
                for key in &self.keys {
                    values.push(report.try_get(key)?);
                }
                Extracted::Multi(MultiValue { values, app, report })
            }
            RuleKind::Sparse(_) => {
                let values = self
                    .keys
                    .iter()
                    .filter_map(|key| report.try_get(key).map(|value| (key.as_str(), value)))
                    .collect();
                Extracted::Sparse(SparseMultiValue { values, app, report })
            }
        };

        match &self.precomputed {
            Some(value) => Some(Extracted::Formatted(value.clone())),
            None => Some(payload),
        }
    }

    /// Extracts and formats in one step.
    ///
    /// `None` = the presence gate failed. `Some(Unhandled)` = the gate
    /// passed but the formatter declined; callers scanning several rules
    /// must still stop here.
    pub fn format(&self, app: &AppMeta, report: &Report) -> Option<FormattedValue> {
        let extracted = self.try_extract(app, report)?;
        let formatted = match (extracted, &self.kind) {
            (Extracted::Formatted(value), _) => value,
            (Extracted::Single(payload), RuleKind::Single(formatter)) => formatter(payload),
            (Extracted::Multi(payload), RuleKind::AllRequired(formatter)) => formatter(payload),
            (Extracted::Sparse(payload), RuleKind::Sparse(formatter)) => formatter(payload),
            // try_extract builds the payload from self.kind, so the
            // shapes cannot disagree. Reaching this arm is a defect in
            // this file, not bad input.
            (payload, kind) => unreachable!(
                "{} payload extracted for a {} rule",
                payload.label(),
                kind.label()
            ),
        };
        Some(formatted)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("priority", &self.priority)
            .field("keys", &self.keys)
            .field("kind", &self.kind.label())
            .field("precomputed", &self.precomputed)
            .finish()
    }
}
