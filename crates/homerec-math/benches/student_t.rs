//! Criterion benchmarks for `homerec-math`.
//!
//! The t quantile runs once per (metric, cutoff, classifier) cell when an
//! experiment is aggregated, so it should stay cheap.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use homerec_math::{regularized_incomplete_beta, student_t_isf};

fn bench_student_t(c: &mut Criterion) {
    let mut group = c.benchmark_group("student_t");

    for dof in [1.0_f64, 4.0, 9.0, 29.0] {
        group.bench_with_input(BenchmarkId::new("isf_0.05", dof), &dof, |b, &dof| {
            b.iter(|| black_box(student_t_isf(black_box(0.05), black_box(dof))));
        });
    }

    group.bench_function("incomplete_beta", |b| {
        b.iter(|| {
            black_box(regularized_incomplete_beta(
                black_box(0.37),
                black_box(4.5),
                black_box(0.5),
            ))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_student_t);
criterion_main!(benches);
