use criterion::{Criterion, criterion_group, criterion_main};
use markdown_ruler_engine::{Env, Markdown, Preset};
mod common;

fn bench_render_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(10);

    let content = common::generate_markdown_content(100);
    let md = Markdown::new();
    group.bench_function("render_default", |b| {
        b.iter(|| std::hint::black_box(md.render(std::hint::black_box(&content))));
    });

    let commonmark = Markdown::with_preset(Preset::CommonMark);
    group.bench_function("render_commonmark", |b| {
        b.iter(|| std::hint::black_box(commonmark.render(std::hint::black_box(&content))));
    });

    group.bench_function("parse_only", |b| {
        b.iter(|| {
            let mut env = Env::default();
            std::hint::black_box(md.parse(std::hint::black_box(&content), &mut env))
        });
    });

    group.finish();
}

fn bench_adversarial_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("adversarial");
    group.sample_size(10);

    let md = Markdown::new();

    let emphasis = common::generate_pathological_emphasis(5_000);
    group.bench_function("unmatched_emphasis", |b| {
        b.iter(|| std::hint::black_box(md.render(std::hint::black_box(&emphasis))));
    });

    let brackets = common::generate_nested_brackets(5_000);
    group.bench_function("nested_brackets", |b| {
        b.iter(|| std::hint::black_box(md.render(std::hint::black_box(&brackets))));
    });

    let quotes = common::generate_nested_quotes(200);
    group.bench_function("nested_quotes", |b| {
        b.iter(|| std::hint::black_box(md.render(std::hint::black_box(&quotes))));
    });

    group.finish();
}

criterion_group!(benches, bench_render_document, bench_adversarial_input);
criterion_main!(benches);
