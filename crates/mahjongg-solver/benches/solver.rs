//! Benchmarks for move enumeration and greedy play-through on the classic board.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::hint;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mahjongg_core::{BoardTemplate, GridIndex, Symbol, Tile};
use mahjongg_solver::{GreedySolver, find_available_moves};

/// Fills the classic template with pairs laid out in slot order.
fn paired_in_order() -> Vec<Tile> {
    let template = BoardTemplate::classic();
    let symbols = (0..template.slot_count()).map(|i| Symbol::ALL[(i / 2) % Symbol::COUNT]);
    template.instantiate(symbols).unwrap()
}

/// Fills the classic template with pairs placed far apart.
fn paired_across_layers() -> Vec<Tile> {
    let template = BoardTemplate::classic();
    let half = template.slot_count() / 2;
    let symbols = (0..template.slot_count()).map(|i| Symbol::ALL[(i % half) % Symbol::COUNT]);
    template.instantiate(symbols).unwrap()
}

fn boards() -> [(&'static str, Vec<Tile>); 2] {
    [
        ("in_order", paired_in_order()),
        ("across_layers", paired_across_layers()),
    ]
}

fn bench_find_available_moves(c: &mut Criterion) {
    for (param, tiles) in boards() {
        let grid = GridIndex::new(&tiles);
        c.bench_with_input(
            BenchmarkId::new("find_available_moves", param),
            &(tiles, grid),
            |b, (tiles, grid)| b.iter(|| hint::black_box(find_available_moves(tiles, grid))),
        );
    }
}

fn bench_greedy_solve(c: &mut Criterion) {
    let solver = GreedySolver::new();
    for (param, tiles) in boards() {
        c.bench_with_input(BenchmarkId::new("greedy_solve", param), &tiles, |b, tiles| {
            b.iter(|| hint::black_box(solver.solve(tiles)));
        });
    }
}

criterion_group!(benches, bench_find_available_moves, bench_greedy_solve);
criterion_main!(benches);
