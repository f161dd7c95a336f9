use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

use json_reshape::execute;

fn sample_input() -> Value {
    json!({
        "events": (0..200).map(|i| json!({
            "user_id": format!("u{}", i),
            "amount": i,
            "tags": [{"k": "region", "v": "us"}, {"k": "tier", "v": "gold"}],
            "created_at": "2024-01-15T10:30:00Z",
        })).collect::<Vec<_>>()
    })
}

fn sample_config() -> Value {
    json!({
        "pipeline": [
            {"op": "rename", "mapping": {"events[].user_id": "events[].userId"}},
            {"op": "list_to_map", "path": "events[].tags", "key_from": "k", "value_from": "v"},
            {"op": "format_date", "path": "events[].created_at", "format": "date_only"},
            {"op": "transform", "path": "events[].userId", "function": "uppercase"},
        ],
        "output": {"events": "$working.events"}
    })
}

pub fn execute_benchmark(c: &mut Criterion) {
    let config = sample_config();
    c.bench_function("execute pipeline", |b| {
        b.iter_with_large_setup(sample_input, |input| execute(black_box(&input), black_box(&config)))
    });
}

criterion_group!(benches, execute_benchmark);
criterion_main!(benches);
