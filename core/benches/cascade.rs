use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use minesweeper_core::*;
use std::hint::black_box;

const TIERS: [(&str, Coord, Coord, CellCount); 3] = [
    ("beginner", 9, 9, 10),
    ("expert", 16, 30, 99),
    ("open_255", 255, 255, 1),
];

fn placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("place_mines");
    for (name, rows, cols, mines) in TIERS {
        let config = GameConfig::new((rows, cols), mines).unwrap();
        group.bench_function(name, |b| {
            let mut seed = 0;
            b.iter_batched(
                || {
                    seed += 1;
                    Board::seeded(config, seed)
                },
                |mut board| {
                    board.place_mines((rows / 2, cols / 2)).unwrap();
                    black_box(board)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");
    for (name, rows, cols, mines) in TIERS {
        let config = GameConfig::new((rows, cols), mines).unwrap();
        group.bench_function(name, |b| {
            let mut seed = 0;
            b.iter_batched(
                || {
                    seed += 1;
                    Board::seeded(config, seed)
                },
                |mut board| black_box(board.reveal((0, 0)).unwrap()),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, placement, first_reveal);
criterion_main!(benches);
