use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime, Weekday};

use league_stats::match_record::Winner;
use league_stats::season_csv::read_season_csv;

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

#[test]
fn reads_sample_season() {
    let (rows, report) =
        read_season_csv(&fixture_path("season_sample.csv")).expect("fixture should parse");
    assert_eq!(report.rows_read, 14);
    assert_eq!(report.rows_loaded, 13);
    assert_eq!(rows.len(), 13);
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].starts_with("line 14:"));

    let first = &rows[0];
    assert_eq!(first.round, 1);
    assert_eq!(first.home_team, "Santos");
    assert_eq!(first.away_team, "Vasco");
    assert_eq!(first.winner, Winner::Team("Santos".to_string()));
    assert_eq!(first.venue, "Vila Belmiro");
    assert_eq!(first.schedule.date, NaiveDate::from_ymd_opt(2003, 3, 29).unwrap());
    assert_eq!(first.schedule.kickoff, NaiveTime::from_hms_opt(16, 0, 0));
    assert_eq!(first.schedule.weekday, Weekday::Sat);
    assert_eq!((first.home_goals, first.away_goals), (2, 1));
    assert_eq!(first.home_state, "SP");
    assert_eq!(first.away_state, "RJ");
}

#[test]
fn draws_and_missing_kickoff() {
    let (rows, _) = read_season_csv(&fixture_path("season_sample.csv")).unwrap();
    let draw = rows
        .iter()
        .find(|m| m.round == 3 && m.home_team == "Vasco")
        .expect("round 3 fixture");
    assert_eq!(draw.winner, Winner::Draw);
    assert_eq!(draw.winner_state, None);
    assert_eq!(draw.schedule.kickoff, None);

    let last = rows.last().unwrap();
    assert_eq!(last.schedule.weekday, Weekday::Thu);
    assert_eq!(last.schedule.kickoff, NaiveTime::from_hms_opt(20, 30, 0));
}

#[test]
fn missing_file_is_an_error() {
    assert!(read_season_csv(&fixture_path("no_such_season.csv")).is_err());
}
