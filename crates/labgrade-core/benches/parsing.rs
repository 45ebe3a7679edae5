use criterion::{black_box, criterion_group, criterion_main, Criterion};

use labgrade_core::classify::classify;
use labgrade_core::parser::parse_line;

fn bench_parse_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_line");

    let verbose = "Mon Jan 01 10:00:00 UTC 2024: FAIL: user sally exists check";
    let iso = "2024-01-01 10:00:00: YUM REPO VERIFICATION PASSED: yum repo verification passed";
    let fallback = "sometime last week: PARTIAL: nfs mount of shares pending";
    let rejected = "kernel: [    0.000000] Linux version 5.14.0 (mockbuild@example)";

    group.bench_function("verbose_timestamp", |b| {
        b.iter(|| parse_line(black_box(1), black_box(verbose)))
    });

    group.bench_function("iso_timestamp", |b| {
        b.iter(|| parse_line(black_box(1), black_box(iso)))
    });

    group.bench_function("fallback_timestamp", |b| {
        b.iter(|| parse_line(black_box(1), black_box(fallback)))
    });

    group.bench_function("rejected", |b| {
        b.iter(|| parse_line(black_box(1), black_box(rejected)))
    });

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    let first_rule = "user sally exists check";
    let lab_complete = "yum repo verification passed";
    let fallthrough = "selinux mode is enforcing on server";

    group.bench_function("first_rule", |b| {
        b.iter(|| classify(black_box(first_rule)))
    });

    group.bench_function("lab_complete", |b| {
        b.iter(|| classify(black_box(lab_complete)))
    });

    group.bench_function("fallthrough", |b| {
        b.iter(|| classify(black_box(fallthrough)))
    });

    group.finish();
}

criterion_group!(benches, bench_parse_line, bench_classify);
criterion_main!(benches);
