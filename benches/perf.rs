use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

use league_stats::aggregation::{goals_per_round, score_frequency};
use league_stats::championship::Championship;
use league_stats::fake_season::generate_round_robin;
use league_stats::match_record::MatchRecord;
use league_stats::season_csv::parse_season_csv;

fn twenty_team_season() -> Vec<MatchRecord> {
    let teams: Vec<String> = (1..=20).map(|idx| format!("Team {idx:02}")).collect();
    let mut rng = StdRng::seed_from_u64(20);
    generate_round_robin(&teams, 2023, &mut rng)
}

fn bench_standings(c: &mut Criterion) {
    let season = Championship::new(twenty_team_season());
    c.bench_function("standings_20_teams", |b| {
        b.iter(|| {
            let table = black_box(&season).standings();
            black_box(table.len());
        })
    });
}

fn bench_score_frequency(c: &mut Criterion) {
    let records = twenty_team_season();
    c.bench_function("score_frequency", |b| {
        b.iter(|| {
            let freq = score_frequency(black_box(&records));
            black_box(freq.len());
        })
    });
}

fn bench_goals_per_round(c: &mut Criterion) {
    let records = twenty_team_season();
    c.bench_function("goals_per_round", |b| {
        b.iter(|| {
            let rounds = goals_per_round(black_box(&records));
            black_box(rounds.len());
        })
    });
}

fn bench_full_report(c: &mut Criterion) {
    let season = Championship::new(twenty_team_season());
    c.bench_function("season_report", |b| {
        b.iter(|| {
            let report = black_box(&season).summary();
            black_box(report.standings.len());
        })
    });
}

fn bench_csv_parse(c: &mut Criterion) {
    c.bench_function("season_csv_parse", |b| {
        b.iter(|| {
            let (rows, _) = parse_season_csv(black_box(SEASON_CSV.as_bytes())).unwrap();
            black_box(rows.len());
        })
    });
}

criterion_group!(
    perf,
    bench_standings,
    bench_score_frequency,
    bench_goals_per_round,
    bench_full_report,
    bench_csv_parse
);
criterion_main!(perf);

static SEASON_CSV: &str = include_str!("../tests/fixtures/season_sample.csv");
