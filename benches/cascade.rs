use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hex_merge::board::Board;
use hex_merge::core::{GridConfig, PuzzleRng, Tier};
use hex_merge::grid::{HexGrid, HexagonGrid};
use hex_merge::matching::{probe, MatchEngine};
use hex_merge::puzzle::BoardInitializer;
use hex_merge::spawn::{PieceSpawnRate, SpawnCurve, SpawnRateTable};
use hexx::Hex;

fn table(tiers: usize) -> SpawnRateTable {
    let pieces = (0..tiers)
        .map(|_| PieceSpawnRate::uniform(SpawnCurve::constant(1.0)))
        .collect();
    SpawnRateTable::new(pieces).unwrap()
}

fn bench_probe_large_region(c: &mut Criterion) {
    let grid = HexagonGrid::from_config(&GridConfig::hexagon(12)).unwrap();
    let mut board = Board::new();
    for hex in grid.coordinates() {
        board.place(hex, Tier::new(0));
    }

    c.bench_function("probe_full_radius_12", |b| {
        b.iter(|| probe(black_box(Hex::ZERO), Tier::new(0), &board, &grid))
    });
}

fn bench_cascade_preview(c: &mut Criterion) {
    let grid = HexagonGrid::from_config(&GridConfig::hexagon(3)).unwrap();
    let engine = MatchEngine::new(Tier::new(4));
    let mut board = Board::new();
    // Pairs of each tier around the origin, so tier 0 cascades to tier 3.
    board.place(Hex::new(1, 0), Tier::new(0));
    board.place(Hex::new(2, 0), Tier::new(0));
    board.place(Hex::new(-1, 0), Tier::new(1));
    board.place(Hex::new(-2, 0), Tier::new(1));
    board.place(Hex::new(0, 1), Tier::new(2));
    board.place(Hex::new(0, 2), Tier::new(2));

    c.bench_function("cascade_preview_3_steps", |b| {
        b.iter(|| engine.preview(&board, &grid, black_box(Hex::ZERO), Tier::new(0)))
    });
}

fn bench_populate(c: &mut Criterion) {
    let grid = HexagonGrid::from_config(&GridConfig::hexagon(4)).unwrap();
    let table = table(4);
    let initializer = BoardInitializer::new(&table, MatchEngine::new(table.max_tier()));

    c.bench_function("populate_radius_4_count_30", |b| {
        b.iter(|| {
            let mut board = Board::new();
            let mut rng = PuzzleRng::new(12345);
            initializer.populate(&mut board, &grid, black_box(30), &mut rng);
            board
        })
    });
}

criterion_group!(benches, bench_probe_large_region, bench_cascade_preview, bench_populate);
criterion_main!(benches);
