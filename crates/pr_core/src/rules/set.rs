//! Rule Set Module
//!
//! 애플리케이션별 규칙 모음과 등록 빌더

use crate::rules::rule::Rule;
use crate::rules::types::{MultiValueFormatter, SparseMultiValueFormatter, ValueFormatter};

/// The rules registered for one application (or a family of ids sharing
/// behavior, e.g. regional releases).
///
/// Purely a registration container: rules stay in registration order and
/// no selection policy lives here. Auto-assigned priorities count up from
/// zero per set; explicit priorities leave the counter untouched, so a
/// later auto rule can never accidentally outrank an explicit one.
#[derive(Debug)]
pub struct RuleSet {
    app_ids: Vec<String>,
    rules: Vec<Rule>,
    next_auto_priority: i32,
}

impl RuleSet {
    /// Rule set for a single application id.
    pub fn for_app(app_id: impl Into<String>) -> Self {
        Self::for_apps([app_id.into()])
    }

    /// Rule set shared by several application ids. Ids are hex strings
    /// and compare case-insensitively.
    pub fn for_apps<I, S>(app_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let app_ids: Vec<String> =
            app_ids.into_iter().map(|id| id.into().to_lowercase()).collect();
        assert!(!app_ids.is_empty(), "rule set registered with no application ids");
        Self { app_ids, rules: Vec::new(), next_auto_priority: 0 }
    }

    pub fn app_ids(&self) -> &[String] {
        &self.app_ids
    }

    pub fn matches_app(&self, app_id: &str) -> bool {
        let needle = app_id.to_lowercase();
        self.app_ids.iter().any(|id| *id == needle)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Single-key rule at the next auto priority.
    pub fn add_value_formatter(mut self, key: impl Into<String>, formatter: ValueFormatter) -> Self {
        let priority = self.take_auto_priority();
        self.add_value_formatter_at(priority, key, formatter)
    }

    /// Single-key rule at an explicit priority.
    pub fn add_value_formatter_at(
        mut self,
        priority: i32,
        key: impl Into<String>,
        formatter: ValueFormatter,
    ) -> Self {
        self.rules.push(Rule::single(priority, key, formatter));
        self
    }

    /// All-required multi-key rule at the next auto priority. Panics on
    /// an empty key list.
    pub fn add_multi_value_formatter<I, S>(mut self, keys: I, formatter: MultiValueFormatter) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let priority = self.take_auto_priority();
        self.add_multi_value_formatter_at(priority, keys, formatter)
    }

    /// All-required multi-key rule at an explicit priority. Panics on an
    /// empty key list.
    pub fn add_multi_value_formatter_at<I, S>(
        mut self,
        priority: i32,
        keys: I,
        formatter: MultiValueFormatter,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.push(Rule::all_required(priority, keys, formatter));
        self
    }

    /// Sparse multi-key rule at the next auto priority. Panics on an
    /// empty key list.
    pub fn add_sparse_multi_value_formatter<I, S>(
        mut self,
        keys: I,
        formatter: SparseMultiValueFormatter,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let priority = self.take_auto_priority();
        self.add_sparse_multi_value_formatter_at(priority, keys, formatter)
    }

    /// Sparse multi-key rule at an explicit priority. Panics on an empty
    /// key list.
    pub fn add_sparse_multi_value_formatter_at<I, S>(
        mut self,
        priority: i32,
        keys: I,
        formatter: SparseMultiValueFormatter,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.push(Rule::sparse(priority, keys, formatter));
        self
    }

    /// Registers a fully built rule (e.g. one carrying a precomputed
    /// value). The auto counter is untouched.
    pub fn add_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    fn take_auto_priority(&mut self) -> i32 {
        let priority = self.next_auto_priority;
        self.next_auto_priority += 1;
        priority
    }
}
