//! Benchmarks for greedy action selection and full games.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

#[path = "../tests/common/mod.rs"]
mod common;

use common::{action, ScriptedEngine};
use gammon_env::{
    Action, ActionSelector, Arena, Color, ConstantScore, Episode, EpisodeConfig, MatchConfig,
    Observation, WinKind,
};

fn lookahead_score(observation: &Observation) -> f64 {
    observation.get(2).unwrap_or(0.0)
}

fn bench_choose(c: &mut Criterion) {
    let mut group = c.benchmark_group("choose");

    for count in [4usize, 16, 64] {
        let actions: Vec<Action> = (0..count)
            .map(|i| action(&[(24, 23 - (i % 20) as i8), (13, 12 - (i / 20) as i8)]))
            .collect();
        let lookahead = actions
            .iter()
            .enumerate()
            .map(|(i, a)| (a.clone(), (i * 37 % count) as f64 / count as f64))
            .collect();
        let engine = ScriptedEngine::new()
            .with_legal(actions.clone())
            .with_lookahead(lookahead);
        let mut episode = Episode::new(engine, EpisodeConfig::default());
        episode.reset(1).unwrap();
        let selector = ActionSelector::new(lookahead_score);

        group.bench_with_input(BenchmarkId::from_parameter(count), &actions, |b, actions| {
            b.iter(|| {
                let choice = selector
                    .choose(&episode, black_box(Color::White), Some(actions.as_slice()))
                    .unwrap();
                black_box(choice.map(|c| c.index))
            })
        });
    }

    group.finish();
}

fn bench_full_game(c: &mut Criterion) {
    let arena = Arena::new(
        ActionSelector::new(ConstantScore::default()),
        ActionSelector::new(ConstantScore::default()),
        MatchConfig::default(),
    );
    let engine = ScriptedEngine::new().with_race_to(30, WinKind::Normal);
    let mut episode = Episode::new(engine, EpisodeConfig::default());

    c.bench_function("play_game", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            let record = arena.play_game(&mut episode, black_box(seed)).unwrap();
            black_box(record.rounds)
        })
    });
}

criterion_group!(benches, bench_choose, bench_full_game);
criterion_main!(benches);
