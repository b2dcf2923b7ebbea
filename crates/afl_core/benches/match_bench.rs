//! Full-match and round benchmarks using Criterion.rs.

use afl_core::engine::{simulate_match, simulate_round, EngineConfig, NullSink};
use afl_core::models::{
    Conditions, FixtureId, MatchSetup, PlayerAttributes, PlayerProfile, Position, TeamSheet,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const LINEUP: [Position; 18] = [
    Position::FB,
    Position::BP,
    Position::BP,
    Position::CHB,
    Position::HBF,
    Position::HBF,
    Position::W,
    Position::W,
    Position::C,
    Position::R,
    Position::RR,
    Position::ROV,
    Position::HFF,
    Position::HFF,
    Position::CHF,
    Position::FP,
    Position::FP,
    Position::FF,
];

fn sheet(id: u32, rating: u8) -> TeamSheet {
    let player = |n: u32, position| {
        PlayerProfile::new(id * 100 + n, format!("Player {n}"), position, PlayerAttributes::uniform(rating))
    };
    TeamSheet {
        id,
        name: format!("Team {id}"),
        on_field: LINEUP.iter().zip(1..).map(|(p, n)| player(n, *p)).collect(),
        bench: [Position::UT, Position::C, Position::HBF, Position::HFF]
            .iter()
            .zip(19..)
            .map(|(p, n)| player(n, *p))
            .collect(),
        tactics: Default::default(),
    }
}

fn setup(match_id: u32, seed: u64) -> MatchSetup {
    MatchSetup {
        fixture: FixtureId { match_id, round: 1 },
        seed,
        home: sheet(match_id * 2, 65),
        away: sheet(match_id * 2 + 1, 60),
        conditions: Conditions::default(),
    }
}

fn bench_full_match(c: &mut Criterion) {
    let config = EngineConfig::default();
    let setup = setup(1, 42);
    c.bench_function("full_match", |b| {
        b.iter(|| black_box(simulate_match(black_box(&setup), &config, &mut NullSink)))
    });
}

fn bench_round(c: &mut Criterion) {
    let config = EngineConfig::default();
    let mut group = c.benchmark_group("round");
    for fixtures in [9u32, 36] {
        let setups: Vec<_> = (0..fixtures).map(|n| setup(n + 1, n as u64)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(fixtures), &setups, |b, setups| {
            b.iter(|| black_box(simulate_round(setups, &config)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_full_match, bench_round);
criterion_main!(benches);
