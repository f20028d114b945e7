//! Performance benchmarks for the playmat engine
//!
//! - **hand_layout**: pose computation across the crowding buckets
//! - **session**: a scripted turn cycle (draw, play, stack, tap, next turn)
//!   through the coordinator, including the per-transition state copy

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mtg_playmat_rs::{
    game::ActionOutcome, layout::HandLayoutConfig, CardRef, DeckDefinition, DeckEntry,
    GameAction, Playmat, PlaymatConfig, Position, StartZone,
};

fn bench_hand_layout(c: &mut Criterion) {
    let config = HandLayoutConfig::default();
    let mut group = c.benchmark_group("hand_layout");

    for n in [1usize, 7, 15, 40] {
        group.bench_function(BenchmarkId::new("cards", n), |b| {
            b.iter(|| config.layout(black_box(n), 1200.0, 300.0, Some(n / 2)))
        });
    }
    group.finish();
}

fn deck() -> DeckDefinition {
    DeckDefinition::new(
        "bench",
        vec![
            DeckEntry::new(CardRef::new("Forest"), StartZone::Library).with_count(60),
            DeckEntry::new(CardRef::new("Omnath"), StartZone::Command),
        ],
    )
}

/// Play through turns until the library runs out
fn run_session(seed: u64) -> usize {
    let mut playmat = Playmat::with_seed(deck(), PlaymatConfig::default(), seed);
    playmat.logger_mut().enable_capture();
    let mut host = None;

    loop {
        let Ok(ActionOutcome::Drew(card)) = playmat.apply(GameAction::Draw) else {
            break;
        };
        let _ = playmat.apply(GameAction::Play {
            card,
            position: Some(Position::new(100.0, 100.0)),
        });
        match host {
            Some(target) => {
                let _ = playmat.apply(GameAction::Stack {
                    child: card,
                    target,
                    position: None,
                });
            }
            None => host = Some(card),
        }
        if let Some(target) = host {
            let _ = playmat.apply(GameAction::ToggleTap { card: target });
        }
        let _ = playmat.apply(GameAction::NextTurn);
        playmat.logger_mut().clear_logs();
    }
    playmat.history().len()
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    group.sample_size(20);
    group.bench_function("turn_cycle_60_cards", |b| b.iter(|| run_session(black_box(42))));
    group.finish();
}

criterion_group!(benches, bench_hand_layout, bench_session);
criterion_main!(benches);
