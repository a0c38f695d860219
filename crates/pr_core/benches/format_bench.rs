use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pr_core::{Analyzer, AppMeta, Report, SingleValue, SparseMultiValue, Value};
use std::sync::Arc;

fn bench_rule_dispatch(c: &mut Criterion) {
    let analyzer = Analyzer::new().add_spec("01007ef00011e000", |spec| {
        spec.add_value_formatter(
            "location",
            Arc::new(|payload: SingleValue<'_>| format!("Exploring {}", payload.value).into()),
        )
        .add_sparse_multi_value_formatter(
            ["mode", "cc", "course"],
            Arc::new(|payload: SparseMultiValue<'_>| {
                format!("{} fields", payload.values.len()).into()
            }),
        )
    });

    let app = AppMeta::new("01007ef00011e000", "The Legend of Zelda: Breath of the Wild");
    let single_hit = Report::from_pairs([("location", "Hyrule Field")]);
    let sparse_only = Report::from_pairs([
        ("course", Value::from("Rainbow Road")),
        ("lap", Value::from(2i64)),
    ]);

    let mut group = c.benchmark_group("rule_dispatch");

    group.bench_function("single_hit", |b| {
        b.iter(|| analyzer.format(black_box(&app), black_box(&single_hit)))
    });

    group.bench_function("scan_to_sparse", |b| {
        b.iter(|| analyzer.format(black_box(&app), black_box(&sparse_only)))
    });

    group.finish();
}

fn bench_catalog_format(c: &mut Criterion) {
    let analyzer = pr_core::catalog::analyzer();

    let zelda = AppMeta::new("01007ef00011e000", "The Legend of Zelda: Breath of the Wild");
    let flag_report = Report::from_pairs([("IsHardMode", true)]);

    let mk8 = AppMeta::new("0100152000022000", "Mario Kart 8 Deluxe");
    let race_report = Report::from_pairs([
        ("mode", Value::from("race")),
        ("cc", Value::from(150i64)),
        ("course", Value::from("Rainbow Road")),
    ]);

    let mut group = c.benchmark_group("catalog_format");

    group.bench_function("botw_flag", |b| {
        b.iter(|| analyzer.format(black_box(&zelda), black_box(&flag_report)))
    });

    group.bench_function("mk8_sparse", |b| {
        b.iter(|| analyzer.format(black_box(&mk8), black_box(&race_report)))
    });

    group.finish();
}

fn bench_json_api(c: &mut Criterion) {
    let request = serde_json::json!({
        "app_id": "0100152000022000",
        "report": { "mode": "race", "cc": 150, "course": "Rainbow Road" }
    })
    .to_string();

    c.bench_function("format_report_json", |b| {
        b.iter(|| pr_core::format_report_catalog_json(black_box(&request)))
    });
}

criterion_group!(benches, bench_rule_dispatch, bench_catalog_format, bench_json_api);
criterion_main!(benches);
