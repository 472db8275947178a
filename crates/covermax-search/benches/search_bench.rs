// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use covermax_model::builder::MatrixBuilder;
use covermax_model::entity::{Product, Source};
use covermax_model::matrix::CoverageMatrix;
use covermax_search::state::SearchState;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

/// Builds a deterministic synthetic matrix where each source produces each
/// product with probability `density`.
fn synthetic_matrix(num_sources: usize, num_products: usize, density: f64) -> CoverageMatrix<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED);
    let mut builder = MatrixBuilder::new();

    for s in 0..num_sources {
        builder.add_source(Source::new(format!("S{:03}", s)).expect("valid name"));
    }
    for p in 0..num_products {
        builder.add_product(Product::new(format!("P{:03}", p)).expect("valid name"));
    }
    for s in 0..num_sources {
        for p in 0..num_products {
            if rng.gen_bool(density) {
                builder.declare_production(
                    Source::new(format!("S{:03}", s)).expect("valid name"),
                    Product::new(format!("P{:03}", p)).expect("valid name"),
                    rng.gen_range(0.1..10.0),
                );
            }
        }
    }

    builder.compile().expect("synthetic matrix compiles")
}

fn bench_full_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_bench");

    for &(num_sources, num_products) in &[(12, 60), (18, 120), (24, 200)] {
        let matrix = synthetic_matrix(num_sources, num_products, 0.15);
        let label = format!("{}x{}", num_sources, num_products);

        group.throughput(Throughput::Elements(num_sources as u64));
        group.bench_with_input(
            BenchmarkId::new("full_search", &label),
            &matrix,
            |b, matrix| {
                b.iter(|| {
                    let mut state = SearchState::new(black_box(matrix));
                    while state.advance() {}
                    black_box(state.best_score())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_full_search);
criterion_main!(benches);
