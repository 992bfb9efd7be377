use criterion::{Criterion, criterion_group, criterion_main};
use lines_core::*;
use std::hint::black_box;

/// Plays seeded games, always moving the first ball that has a legal move.
fn play_game(seed: u64) -> u32 {
    let mut engine = BoardEngine::with_seed(GameConfig::CLASSIC, seed);
    let mut scores = Scoreboard::default();
    engine.start_new_game(&mut scores);

    while !engine.is_game_over() {
        let size = engine.size();
        let step = iter_coords(size)
            .filter(|&from| !engine.cell_at(from).is_empty())
            .find_map(|from| {
                iter_coords(size)
                    .find(|&to| engine.can_move(from, to))
                    .map(|to| (from, to))
            });
        let Some((from, to)) = step else {
            break;
        };
        engine.move_ball(from, to, &mut scores);
    }

    scores.score()
}

fn bench_turns(c: &mut Criterion) {
    let mut board = ndarray::Array2::<Cell>::default([9, 9]);
    for col in 2..7 {
        board[[4, col]] = Cell::Ball(BallColor::Red);
        board[[col, 4]] = Cell::Ball(BallColor::Red);
    }

    c.bench_function("find_lines_cross", |b| {
        b.iter(|| find_crosses(&find_lines(black_box(&board), 5)))
    });
    c.bench_function("has_path_open_board", |b| {
        b.iter(|| has_path(black_box(&board), (0, 0), (8, 8)))
    });
    c.bench_function("full_game", |b| b.iter(|| play_game(black_box(42))));
}

criterion_group!(benches, bench_turns);
criterion_main!(benches);
