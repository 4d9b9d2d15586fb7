use criterion::{criterion_group, criterion_main, Criterion};

use draftlot::enumerate::exact_by_enumeration;
use draftlot::odds::exact;
use draftlot::probs::SliceExt;
use draftlot::scheme::Weight;

fn criterion_benchmark(c: &mut Criterion) {
    fn weighted(n: usize) -> Vec<Weight> {
        (1..=n as Weight).rev().collect()
    }

    // sanity check
    let weights = weighted(6);
    assert!(exact(&weights).flatten().max_abs_diff(exact_by_enumeration(&weights).flatten()) < 1e-9);

    fn bench_exact(c: &mut Criterion, n: usize) {
        let weights = weighted(n);
        c.bench_function(&format!("cri_odds_exact_{n}"), |b| {
            b.iter(|| exact(&weights));
        });
    }
    bench_exact(c, 12);
    bench_exact(c, 18);

    c.bench_function("cri_odds_enumerated_6", |b| {
        b.iter(|| exact_by_enumeration(&weights));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
