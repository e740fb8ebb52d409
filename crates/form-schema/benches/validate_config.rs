//! Config validation benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use form_schema::{Config, Fixture, DEFAULT_BACKEND_URL};
use serde_json::{json, Value};

fn fixture_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_fixture");

    for fixture in Fixture::ALL {
        let raw = fixture.build(DEFAULT_BACKEND_URL);
        group.bench_with_input(BenchmarkId::from_parameter(fixture), &raw, |b, raw| {
            b.iter(|| Config::from_value(black_box(raw)))
        });
    }

    group.finish();
}

fn question_scaling_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("question_scaling");

    for size in [10usize, 100, 1000].iter() {
        let questions: Vec<Value> = (0..*size)
            .map(|i| {
                json!({
                    "label": ["Question", i.to_string()],
                    "name": format!("q{i}"),
                    "type": "selectbox",
                    "required": i % 2 == 0,
                    "options": [{"label": "Yes", "value": "y"}, {"label": "No", "value": "n"}],
                })
            })
            .collect();
        let raw = json!({
            "title": "Bench",
            "subject": "Bench",
            "email": "bench@example.com",
            "questions": questions,
        });

        group.bench_with_input(BenchmarkId::from_parameter(size), &raw, |b, raw| {
            b.iter(|| Config::from_value(black_box(raw)))
        });
    }

    group.finish();
}

criterion_group!(benches, fixture_benchmark, question_scaling_benchmark);
criterion_main!(benches);
