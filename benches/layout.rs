//! Benchmarks for the full layout pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use codesheet::config::{layout_params, PageSize};
use codesheet::render::preview::CellMeasure;
use codesheet::render::{layout_pass, DocumentInput};
use codesheet::token::Language;

fn sample_source() -> String {
    let mut src = String::new();
    for i in 0..500 {
        src.push_str(&format!(
            "for x_{i} in range({i}):\n    print('value', x_{i} + {i}.5)\n"
        ));
    }
    src
}

fn bench_layout_pass(c: &mut Criterion) {
    let params = layout_params(PageSize::A4, 10.0);
    let cells = CellMeasure::for_font_size(10.0);
    let input = DocumentInput::new(sample_source(), Language::Python);

    c.bench_function("layout_pass_a4", |b| {
        b.iter(|| layout_pass(black_box(&input), &params, &cells).unwrap())
    });
}

criterion_group!(benches, bench_layout_pass);
criterion_main!(benches);
