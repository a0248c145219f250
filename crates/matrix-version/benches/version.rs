use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matrix_version::{Comparator, Version, VersionRange};

fn bench_parse(c: &mut Criterion) {
    let versions = [
        "1.69.0",
        "1.75.0",
        "1.87.0",
        "1.88.0_rc1",
        "2.0.5",
        "2.0.10",
        "2.0.11",
        "10.20.30",
    ];

    c.bench_function("parse_versions", |b| {
        b.iter(|| {
            for version in versions {
                black_box(Version::parse(black_box(version)).ok());
            }
        })
    });
}

fn bench_range_contains(c: &mut Criterion) {
    let range = VersionRange::new(
        Version::parse("1.75.0").unwrap(),
        Some(Version::parse("1.82.0").unwrap()),
    );
    let candidates: Vec<Version> = (60..100)
        .map(|minor| Version::parse(&format!("1.{minor}.0")).unwrap())
        .collect();

    c.bench_function("range_contains", |b| {
        b.iter(|| {
            for candidate in &candidates {
                black_box(range.contains(black_box(candidate)));
            }
        })
    });
}

fn bench_sort(c: &mut Criterion) {
    let versions = [
        "1.87.0", "1.70.0", "1.88.0_rc1", "1.69.0", "1.82.0", "1.75.0", "1.81.0", "1.72.0",
    ];

    c.bench_function("sort_versions", |b| {
        b.iter(|| black_box(Comparator::sort(black_box(&versions)).ok()))
    });
}

criterion_group!(benches, bench_parse, bench_range_contains, bench_sort);
criterion_main!(benches);
