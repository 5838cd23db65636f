// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for id expression parsing in the scandex-core crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use scandex_core::IdRange;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Parse a mix of every expression form, the way a `--ids` list looks.
fn bench_parse_list(c: &mut Criterion) {
    let input = "5,5+,5++,1203-05,1298-02,17#,digital,40-80";

    c.bench_function("parse_list (8 expressions)", |b| {
        b.iter(|| {
            let ranges = IdRange::parse_list(black_box(input)).expect("valid list");
            black_box(ranges);
        });
    });
}

/// Render and align, as done once per record when listing a large archive.
fn bench_align_render(c: &mut Criterion) {
    let ranges: Vec<IdRange> = (1..2000)
        .map(|id| IdRange::new(id, id + id % 4).expect("valid range"))
        .collect();

    c.bench_function("align + render (2000 ranges)", |b| {
        b.iter(|| {
            for range in &ranges {
                black_box(range.align().render(6));
            }
        });
    });
}

criterion_group!(benches, bench_parse_list, bench_align_render);
criterion_main!(benches);
