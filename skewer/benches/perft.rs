use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use skewer::*;

fn perft_benchmark(c: &mut Criterion) {
    let kiwipete = Position::from_fen(FEN_KIWIPETE).unwrap();
    c.bench_function("Kiwipete Perft 4", |b| {
        b.iter(|| {
            let mut kiwipete = black_box(kiwipete.clone());
            let depth = black_box(4);
            black_box(perft(&mut kiwipete, depth))
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(100).measurement_time(Duration::from_secs(60));
    targets = perft_benchmark
}
criterion_main!(benches);
