//! Tokenizer throughput benchmarks.
//! Run with: `cargo bench --package io-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use io_lex::tokenize;

fn token_count(source: &str) -> usize {
    tokenize(source).map(|tokens| tokens.len()).unwrap_or(0)
}

fn bench_object_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_object");

    let source = "name: \"Alice\", age: 30, active: true, tags: [1, 2, 3]";
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("small_object", |b| b.iter(|| token_count(black_box(source))));

    group.finish();
}

fn bench_nested_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_nested");

    let source = r#"
        ~ name: string, age: number
        ---
        Alice, 30, {city: "Springfield", zip: 90210}
        Bob, 25, {city: "Shelbyville", zip: 90211}
    "#;
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("header_and_section", |b| b.iter(|| token_count(black_box(source))));

    group.finish();
}

fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_strings");

    group.bench_function("short_string", |b| b.iter(|| token_count(black_box("\"hello\""))));
    group.bench_function("raw_string", |b| b.iter(|| token_count(black_box("r\"a\\nb\""))));
    group.bench_function("byte_string", |b| b.iter(|| token_count(black_box("b\"aGVsbG8gd29ybGQ=\""))));
    group.bench_function("open_string", |b| {
        b.iter(|| token_count(black_box("this is an unquoted open string value")))
    });

    group.finish();
}

fn bench_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_numbers");

    group.bench_function("decimal_integer", |b| b.iter(|| token_count(black_box("123456"))));
    group.bench_function("float", |b| b.iter(|| token_count(black_box("3.14159e10"))));
    group.bench_function("hex", |b| b.iter(|| token_count(black_box("0xDEADBEEF"))));
    group.bench_function("bigint", |b| {
        b.iter(|| token_count(black_box("999999999999999999999999999999999999")))
    });

    group.finish();
}

criterion_group!(benches, bench_object_document, bench_nested_document, bench_strings, bench_numbers);
criterion_main!(benches);
