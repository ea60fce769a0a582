use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scorecard_thresholds::{parse_expression, validate_config, MetricType};
use serde_json::json;

fn expression_parsing_benchmark(c: &mut Criterion) {
    let test_values = vec![
        ">=20",
        "<=15",
        ">0.5",
        "<100",
        "==42",
        "!=7",
        "10-200",
        "0.5-1.5",
        "  >=  20  ",
    ];

    c.bench_function("parse_expression_number", |b| {
        b.iter(|| {
            for value in &test_values {
                let _ = black_box(parse_expression(black_box(value), MetricType::Number));
            }
        })
    });
}

fn boolean_parsing_benchmark(c: &mut Criterion) {
    let test_values = vec!["==true", "==false", "!=true", "!=false"];

    c.bench_function("parse_expression_boolean", |b| {
        b.iter(|| {
            for value in &test_values {
                let _ = black_box(parse_expression(black_box(value), MetricType::Boolean));
            }
        })
    });
}

fn config_validation_benchmark(c: &mut Criterion) {
    let thresholds = json!({
        "rules": [
            {"key": "error", "expression": ">=200"},
            {"key": "warning", "expression": "10-200"},
            {"key": "success", "expression": "<10"},
        ]
    });

    c.bench_function("validate_config", |b| {
        b.iter(|| {
            let _ = black_box(validate_config(black_box(&thresholds), MetricType::Number));
        })
    });
}

criterion_group!(
    benches,
    expression_parsing_benchmark,
    boolean_parsing_benchmark,
    config_validation_benchmark
);
criterion_main!(benches);
