use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use league_stats::championship::{Championship, SeasonReport};
use league_stats::fake_season;
use league_stats::match_record::MatchRecord;
use league_stats::season_csv;
use league_stats::settings::Settings;

const DEMO_YEAR: i32 = 2023;
const DEMO_SEED: u64 = 2003;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let settings = Settings::load()?;
    let records = load_records(&settings)?;
    let season = match settings.match_filter() {
        Some(filter) => Championship::filtered(records, filter),
        None => Championship::new(records),
    };

    let report = season.report(settings.goal_threshold);
    if settings.json {
        let json = serde_json::to_string_pretty(&report).context("serialize season report")?;
        println!("{json}");
    } else {
        print_report(&report);
    }

    if let Some(team) = settings.team.as_deref() {
        let row = season.standings_row(team);
        if row.played() == 0 {
            warn!("team {team:?} has no matches in the selection");
        }
        println!();
        println!(
            "{}: {} pts, {}W {}D {}L, goals {}:{} ({:+})",
            row.team,
            row.points,
            row.wins,
            row.draws,
            row.losses,
            row.goals_for,
            row.goals_against,
            row.goal_difference
        );
    }

    Ok(())
}

fn load_records(settings: &Settings) -> Result<Vec<MatchRecord>> {
    if settings.demo {
        let mut rng = StdRng::seed_from_u64(DEMO_SEED);
        let year = settings.season_year.unwrap_or(DEMO_YEAR);
        let records = fake_season::generate_round_robin(&fake_season::demo_teams(), year, &mut rng);
        info!("generated demo season {year}: {} matches", records.len());
        return Ok(records);
    }

    let path = settings
        .csv_path
        .as_deref()
        .ok_or_else(|| anyhow!("no season file: pass --csv <path>, set SEASON_CSV_PATH, or use --demo"))?;
    let (records, ingest) = season_csv::read_season_csv(path)?;
    info!(
        "loaded {} of {} rows from {}",
        ingest.rows_loaded,
        ingest.rows_read,
        path.display()
    );
    if !ingest.skipped.is_empty() {
        warn!("{} rows skipped", ingest.skipped.len());
    }
    Ok(records)
}

fn print_report(report: &SeasonReport) {
    println!("Selection: {}", report.filter);
    println!("Matches: {}", report.total_matches);
    println!(
        "Goals: total {} min {} max {} avg {}",
        report.goals.sum,
        opt_to_string(report.goals.min),
        opt_to_string(report.goals.max),
        report
            .goals
            .average
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "n/a".to_string())
    );
    println!(
        "Home wins: {}  Away wins: {}  Draws: {}",
        report.home_wins, report.away_wins, report.draws
    );
    println!(
        "Under {} goals: {}  {} or more: {}",
        report.goal_threshold, report.low_scoring, report.goal_threshold, report.high_scoring
    );
    match &report.most_frequent_score {
        Some(sc) => println!("Most frequent score: {} ({}x)", sc.score, sc.count),
        None => println!("Most frequent score: n/a"),
    }
    match &report.least_frequent_score {
        Some(sc) => println!("Least frequent score: {} ({}x)", sc.score, sc.count),
        None => println!("Least frequent score: n/a"),
    }

    println!();
    println!("Goals per round:");
    for row in &report.goals_per_round {
        println!("  {:>3}: {}", row.round, row.goals);
    }

    println!();
    println!(
        "{:>3}  {:<24} {:>4} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4}",
        "#", "Team", "Pts", "W", "D", "L", "GF", "GA", "GD"
    );
    for (idx, row) in report.standings.iter().enumerate() {
        println!(
            "{:>3}  {:<24} {:>4} {:>3} {:>3} {:>3} {:>4} {:>4} {:>+4}",
            idx + 1,
            row.team,
            row.points,
            row.wins,
            row.draws,
            row.losses,
            row.goals_for,
            row.goals_against,
            row.goal_difference
        );
    }
}

fn opt_to_string<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "n/a".to_string())
}
