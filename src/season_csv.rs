use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveTime, Weekday};
use csv::{ByteRecord, Position, ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use serde::Serialize;

use crate::match_record::{MatchRecord, MatchSchedule, Winner};

pub const DRAW_SENTINEL: &str = "-";
const EXPECTED_COLUMNS: usize = 13;
/// Largest goal count a single side may carry.
pub const MAX_GOALS: u32 = 99;

#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub rows_read: usize,
    pub rows_loaded: usize,
    pub skipped: Vec<String>,
}

pub fn read_season_csv(path: &Path) -> Result<(Vec<MatchRecord>, IngestReport)> {
    let file = File::open(path).with_context(|| format!("open season file {}", path.display()))?;
    parse_season_csv(file).with_context(|| format!("parse season file {}", path.display()))
}

/// Reads the `;`-separated season export. The first line is a header.
///
/// Rows that do not parse are skipped and listed in the report.
pub fn parse_season_csv<R: Read>(reader: R) -> Result<(Vec<MatchRecord>, IngestReport)> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut report = IngestReport::default();
    let mut out = Vec::new();
    for (idx, row) in rdr.byte_records().enumerate() {
        report.rows_read += 1;
        let parsed = match row {
            Ok(raw) => {
                let line = line_of(raw.position(), idx);
                (line, decode_row(raw).and_then(|row| parse_row(&row)))
            }
            Err(err) if err.is_io_error() => {
                return Err(err).with_context(|| format!("read season row {}", idx + 2));
            }
            Err(err) => (
                line_of(err.position(), idx),
                Err(anyhow!("malformed row: {err}")),
            ),
        };
        match parsed {
            (_, Ok(record)) => out.push(record),
            (line, Err(err)) => {
                warn!("skipping season line {line}: {err}");
                report.skipped.push(format!("line {line}: {err}"));
            }
        }
    }
    report.rows_loaded = out.len();
    debug!(
        "season ingest: {}/{} rows loaded",
        report.rows_loaded, report.rows_read
    );
    Ok((out, report))
}

/// Header is line 1, so the n-th data row sits on line n + 2.
fn line_of(pos: Option<&Position>, idx: usize) -> u64 {
    pos.map_or(idx as u64 + 2, Position::line)
}

fn decode_row(raw: ByteRecord) -> Result<StringRecord> {
    StringRecord::from_byte_record(raw).map_err(|err| {
        let field = err.utf8_error().field() + 1;
        anyhow!("field {field} is not valid UTF-8")
    })
}

fn parse_row(row: &StringRecord) -> Result<MatchRecord> {
    if row.len() != EXPECTED_COLUMNS {
        return Err(anyhow!(
            "expected {EXPECTED_COLUMNS} columns, found {}",
            row.len()
        ));
    }
    let field = |i: usize| row.get(i).unwrap_or_default();

    let round = field(0)
        .parse::<u32>()
        .ok()
        .filter(|r| *r > 0)
        .ok_or_else(|| anyhow!("invalid round {:?}", field(0)))?;
    let date = parse_date(field(1))?;
    let kickoff = parse_kickoff(field(2))?;
    let weekday = parse_weekday(field(3)).ok_or_else(|| anyhow!("unknown weekday {:?}", field(3)))?;

    let home_team = non_empty(field(4), "home team")?;
    let away_team = non_empty(field(5), "away team")?;
    let winner = match field(6) {
        "" | DRAW_SENTINEL => Winner::Draw,
        name => Winner::Team(name.to_string()),
    };
    let home_goals = parse_goals(field(8))?;
    let away_goals = parse_goals(field(9))?;
    let winner_state = match field(12) {
        "" | DRAW_SENTINEL => None,
        state => Some(state.to_string()),
    };

    Ok(MatchRecord {
        round,
        schedule: MatchSchedule {
            date,
            kickoff,
            weekday,
        },
        home_team,
        away_team,
        winner,
        venue: field(7).to_string(),
        home_goals,
        away_goals,
        home_state: field(10).to_string(),
        away_state: field(11).to_string(),
        winner_state,
    })
}

fn non_empty(raw: &str, what: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(anyhow!("missing {what}"));
    }
    Ok(raw.to_string())
}

fn parse_goals(raw: &str) -> Result<u32> {
    raw.parse::<u32>()
        .ok()
        .filter(|goals| *goals <= MAX_GOALS)
        .ok_or_else(|| anyhow!("invalid goal count {raw:?}"))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%d/%m/%Y").map_err(|err| anyhow!("invalid date {raw:?}: {err}"))
}

/// Kickoff times appear as `16h00`, `16:00` or not at all.
fn parse_kickoff(raw: &str) -> Result<Option<NaiveTime>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let normalized = raw.replace(['h', 'H'], ":");
    NaiveTime::parse_from_str(&normalized, "%H:%M")
        .map(Some)
        .map_err(|err| anyhow!("invalid kickoff time {raw:?}: {err}"))
}

pub fn parse_weekday(raw: &str) -> Option<Weekday> {
    let s = raw.trim().to_lowercase();
    let weekday = match s.as_str() {
        "segunda-feira" | "segunda" | "monday" => Weekday::Mon,
        "terça-feira" | "terca-feira" | "terça" | "tuesday" => Weekday::Tue,
        "quarta-feira" | "quarta" | "wednesday" => Weekday::Wed,
        "quinta-feira" | "quinta" | "thursday" => Weekday::Thu,
        "sexta-feira" | "sexta" | "friday" => Weekday::Fri,
        "sábado" | "sabado" | "saturday" => Weekday::Sat,
        "domingo" | "sunday" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}
