//! Benchmarks for line tokenization.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use codesheet::token::{tokenize, Language};

fn sample_source() -> String {
    let mut src = String::new();
    for i in 0..200 {
        src.push_str(&format!(
            "def handler_{i}(request):\n    # dispatch {i}\n    total = {i} * 3.5\n    return str(total)\n"
        ));
    }
    src
}

fn bench_tokenize(c: &mut Criterion) {
    let src = sample_source();
    let table = Language::Python.rules();

    c.bench_function("tokenize_python", |b| {
        b.iter(|| {
            for line in black_box(&src).lines() {
                black_box(tokenize(line, table));
            }
        })
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
