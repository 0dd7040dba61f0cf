//! Criterion benchmarks measure time of the clearly separated pieces of code.

use checkers::game::turn::TurnOrchestrator;
use checkers::rules::board::Board;
use checkers::rules::core::Color;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const LAYOUTS: [&str; 4] = [
    "dddd/dddd/dddd/4/4/llll/llll/llll l",
    "4/1l2/1dd1/1ld1/1l2/d3/1l1d/4 l",
    "1d1d/l1l1/1d1d/l1l1/1d1d/l1l1/1d1d/l1l1 d",
    "ddddd/l1l1l/1d1d1/5/5/1l1l1/d1d1d/lllll/5/5 l",
];

fn candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidates");
    for layout in LAYOUTS {
        let board = Board::try_from(layout).expect("layout should be valid");
        let _ = group.bench_with_input(BenchmarkId::from_parameter(layout), &board, |b, board| {
            b.iter(|| {
                for color in [Color::Light, Color::Dark] {
                    for piece in board.pieces(color) {
                        let _ = black_box(piece.compute_jumps(board));
                        let _ = black_box(piece.compute_moves(board));
                    }
                }
            });
        });
    }
    group.finish();
}

fn begin_turn(c: &mut Criterion) {
    let mut group = c.benchmark_group("begin_turn");
    for layout in LAYOUTS {
        let board = Board::try_from(layout).expect("layout should be valid");
        let _ = group.bench_with_input(BenchmarkId::from_parameter(layout), &board, |b, board| {
            b.iter(|| {
                let mut turn = TurnOrchestrator::new(board.clone());
                turn.begin_turn(Color::Light);
                black_box(turn.take_notifications())
            });
        });
    }
    group.finish();
}

fn layout_parsing(c: &mut Criterion) {
    let _ = c.bench_function("parse layouts", |b| {
        b.iter(|| {
            for layout in LAYOUTS {
                let _ = black_box(Board::try_from(black_box(layout)));
            }
        });
    });
}

criterion_group! {
    name = rules;
    config = Criterion::default().sample_size(10);
    targets = candidates, begin_turn, layout_parsing
}
criterion_main!(rules);
