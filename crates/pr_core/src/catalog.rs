//! Built-in Catalog Module
//!
//! 기본 제공 타이틀별 규칙 세트. One builder function per title, wired
//! into a lazily initialized analyzer.

use crate::analyzer::Analyzer;
use crate::report::Value;
use crate::rules::{
    FormattedValue, MultiValue, Rule, RuleSet, SingleValue, SparseMultiValue,
};
use once_cell::sync::Lazy;
use std::sync::Arc;

static ANALYZER: Lazy<Analyzer> = Lazy::new(build_analyzer);

/// The built-in analyzer, initialized on first use and read-only after.
pub fn analyzer() -> &'static Analyzer {
    &ANALYZER
}

fn build_analyzer() -> Analyzer {
    Analyzer::new()
        .add_spec("01007ef00011e000", breath_of_the_wild)
        .add_spec("0100000000010000", super_mario_odyssey)
        .add_spec_multi(["0100152000022000", "010075100e8ec000"], mario_kart_8_deluxe)
        .add_spec("01006a800016e000", smash_ultimate)
        .add_spec_multi(["01003bc0000a0000", "01003c700009c000"], splatoon_2)
}

fn breath_of_the_wild(spec: RuleSet) -> RuleSet {
    spec.add_value_formatter(
        "IsHardMode",
        Arc::new(|payload: SingleValue<'_>| {
            if truthy(payload.value) {
                "Playing Master Mode".into()
            } else {
                "Playing Normal Mode".into()
            }
        }),
    )
}

fn super_mario_odyssey(spec: RuleSet) -> RuleSet {
    spec.add_value_formatter(
        "is_kids_mode",
        Arc::new(|payload: SingleValue<'_>| {
            if truthy(payload.value) {
                "Playing in Assist Mode".into()
            } else {
                "Playing in Regular Mode".into()
            }
        }),
    )
}

fn mario_kart_8_deluxe(spec: RuleSet) -> RuleSet {
    spec.add_sparse_multi_value_formatter(
        ["mode", "cc", "course"],
        Arc::new(|payload: SparseMultiValue<'_>| {
            let course = payload.get("course").map(|value| value.to_string());
            match (payload.get("mode").and_then(Value::as_str), course) {
                (Some("race"), Some(course)) => match payload.get("cc").and_then(Value::as_i64) {
                    Some(cc) => format!("Racing {}cc on {}", cc, course).into(),
                    None => format!("Racing on {}", course).into(),
                },
                (Some("battle"), Some(course)) => format!("Battling on {}", course).into(),
                (_, Some(course)) => format!("On {}", course).into(),
                _ => FormattedValue::Unhandled,
            }
        }),
    )
}

fn smash_ultimate(spec: RuleSet) -> RuleSet {
    spec.add_multi_value_formatter(
        ["match_mode", "player_1_fighter"],
        Arc::new(|payload: MultiValue<'_>| {
            format!("Fighting as {} ({})", payload.values[1], payload.values[0]).into()
        }),
    )
    // Matchmaking presence is fixed text; the stored value short-circuits
    // the formatter entirely.
    .add_rule(
        Rule::single(
            50,
            "is_matchmaking",
            Arc::new(|_payload: SingleValue<'_>| FormattedValue::Unhandled),
        )
        .with_precomputed("Looking for opponents".into()),
    )
}

fn splatoon_2(spec: RuleSet) -> RuleSet {
    spec.add_value_formatter(
        "mode",
        Arc::new(|payload: SingleValue<'_>| match payload.value.as_i64() {
            Some(0) => "Regular Battle".into(),
            Some(1) => "Ranked Battle".into(),
            Some(2) => "League Battle".into(),
            Some(3) => "Salmon Run".into(),
            _ => FormattedValue::Unhandled,
        }),
    )
    .add_value_formatter_at(
        20,
        "in_lobby",
        Arc::new(|payload: SingleValue<'_>| {
            if truthy(payload.value) {
                FormattedValue::ForceReset
            } else {
                FormattedValue::Unhandled
            }
        }),
    )
}

// Flags arrive as bool or 0/1 depending on the title's encoder.
fn truthy(value: &Value) -> bool {
    value.as_bool().unwrap_or_else(|| value.as_i64().is_some_and(|i| i != 0))
}
