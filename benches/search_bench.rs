use criterion::{criterion_group, criterion_main, Criterion, black_box};
use knightwatch::board::Position;
use knightwatch::search::{self, SearchLimits, SearchSession};
use std::time::Duration;

fn bench_search(c: &mut Criterion) {
    let start = Position::startpos();
    let limits = SearchLimits { depth: 3, movetime: Duration::from_secs(30) };
    c.bench_function("search_depth_3_startpos", |ben| {
        ben.iter(|| {
            let mut session = SearchSession::new();
            let r = search::search(black_box(&start), limits, &mut session);
            black_box(r.map(|o| o.nodes))
        })
    });
}

fn bench_eval(c: &mut Criterion) {
    let p = Position::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3").unwrap();
    c.bench_function("evaluate_italian", |ben| {
        ben.iter(|| black_box(search::eval::evaluate(black_box(&p), p.turn())))
    });
}

criterion_group!(benches, bench_search, bench_eval);
criterion_main!(benches);
