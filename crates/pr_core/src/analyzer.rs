//! Analyzer Module
//!
//! 등록된 규칙 세트를 훑어 리포트를 표시 문자열로 바꾸는 소비자

use crate::report::{AppMeta, Report};
use crate::rules::{FormattedValue, Rule, RuleSet};
use log::{debug, trace};
use std::cmp::Reverse;

/// Holds every registered rule set and arbitrates between rules.
///
/// Built once at startup, read-only afterwards; concurrent `format`
/// calls need no synchronization.
#[derive(Debug, Default)]
pub struct Analyzer {
    rule_sets: Vec<RuleSet>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self { rule_sets: Vec::new() }
    }

    /// Registers a rule set for one application id, built in place.
    pub fn add_spec<F>(self, app_id: impl Into<String>, build: F) -> Self
    where
        F: FnOnce(RuleSet) -> RuleSet,
    {
        self.add_set(build(RuleSet::for_app(app_id)))
    }

    /// Registers a rule set shared by several application ids (regional
    /// releases of the same title).
    pub fn add_spec_multi<I, S, F>(self, app_ids: I, build: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnOnce(RuleSet) -> RuleSet,
    {
        self.add_set(build(RuleSet::for_apps(app_ids)))
    }

    pub fn add_set(mut self, set: RuleSet) -> Self {
        self.rule_sets.push(set);
        self
    }

    pub fn rule_sets(&self) -> &[RuleSet] {
        &self.rule_sets
    }

    /// First registered set covering `app_id`, if any.
    pub fn rule_set_for(&self, app_id: &str) -> Option<&RuleSet> {
        self.rule_sets.iter().find(|set| set.matches_app(app_id))
    }

    /// Every application id any registered set covers, in registration
    /// order.
    pub fn app_ids(&self) -> impl Iterator<Item = &str> {
        self.rule_sets.iter().flat_map(|set| set.app_ids()).map(String::as_str)
    }

    /// Runs `report` through the rules for `app.app_id`.
    ///
    /// Rules are consulted by descending priority (ties keep
    /// registration order) and the first rule whose extraction succeeds
    /// decides the outcome, even when its formatter declines. No set or
    /// no matching rule yields `Unhandled`.
    pub fn format(&self, app: &AppMeta, report: &Report) -> FormattedValue {
        let Some(set) = self.rule_set_for(&app.app_id) else {
            debug!("no rule set covers app {}", app.app_id);
            return FormattedValue::Unhandled;
        };

        let mut candidates: Vec<&Rule> = set.rules().iter().collect();
        // Stable sort: equal priorities stay in registration order.
        candidates.sort_by_key(|rule| Reverse(rule.priority));

        for rule in candidates {
            trace!("trying {} rule {:?} at priority {}", rule.kind().label(), rule.keys(), rule.priority);
            if let Some(formatted) = rule.format(app, report) {
                debug!(
                    "rule {:?} claimed report for {} ({} entries)",
                    rule.keys(),
                    app.app_id,
                    report.len()
                );
                return formatted;
            }
        }

        debug!("no rule matched report for {}", app.app_id);
        FormattedValue::Unhandled
    }
}
