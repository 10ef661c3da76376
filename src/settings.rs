use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use crate::aggregation::DEFAULT_GOAL_THRESHOLD;
use crate::record_store::MatchFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub csv_path: Option<PathBuf>,
    pub season_year: Option<i32>,
    pub rounds: Option<RoundSpan>,
    pub goal_threshold: u32,
    pub team: Option<String>,
    pub json: bool,
    pub demo: bool,
}

/// Round selection. `last: None` keeps every round from `first` on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSpan {
    pub first: u32,
    pub last: Option<u32>,
}

impl RoundSpan {
    pub fn between(first: u32, last: u32) -> Self {
        Self {
            first,
            last: Some(last),
        }
    }

    pub fn filter(self) -> MatchFilter {
        match self.last {
            Some(last) => MatchFilter::in_rounds(self.first..=last),
            None => MatchFilter::from_round(self.first),
        }
    }
}

impl Settings {
    /// Loads `.env.local` / `.env`, then reads the environment and command line.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        let args = std::env::args().skip(1).collect::<Vec<_>>();
        Self::resolve(&args, |key| std::env::var(key).ok())
    }

    /// Command line flags take precedence over environment values.
    pub fn resolve(args: &[String], env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let csv_path = arg_value(args, "--csv")
            .or_else(|| env("SEASON_CSV_PATH"))
            .map(PathBuf::from);

        let season_year = match arg_value(args, "--year").or_else(|| env("SEASON_YEAR")) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<i32>()
                    .with_context(|| format!("invalid season year {raw:?}"))?,
            ),
            None => None,
        };

        let rounds = match arg_value(args, "--rounds") {
            Some(raw) => Some(parse_round_range(&raw)?),
            None => match (env("SEASON_FIRST_ROUND"), env("SEASON_LAST_ROUND")) {
                (None, None) => None,
                (first, last) => {
                    let first = parse_round(first.as_deref().unwrap_or("1"))?;
                    let last = last.as_deref().map(parse_round).transpose()?;
                    if let Some(last) = last
                        && first > last
                    {
                        return Err(anyhow!("round range {first}-{last} is reversed"));
                    }
                    Some(RoundSpan { first, last })
                }
            },
        };

        let goal_threshold =
            match arg_value(args, "--threshold").or_else(|| env("LOW_SCORING_THRESHOLD")) {
                Some(raw) => raw
                    .trim()
                    .parse::<u32>()
                    .with_context(|| format!("invalid goal threshold {raw:?}"))?,
                None => DEFAULT_GOAL_THRESHOLD,
            };

        Ok(Self {
            csv_path,
            season_year,
            rounds,
            goal_threshold,
            team: arg_value(args, "--team"),
            json: has_flag(args, "--json"),
            demo: has_flag(args, "--demo"),
        })
    }

    pub fn match_filter(&self) -> Option<MatchFilter> {
        let season = self.season_year.map(MatchFilter::in_season);
        let rounds = self.rounds.map(RoundSpan::filter);
        match (season, rounds) {
            (Some(s), Some(r)) => Some(s.and(r)),
            (s, r) => s.or(r),
        }
    }
}

fn arg_value(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&prefix) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn parse_round(raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|r| *r > 0)
        .ok_or_else(|| anyhow!("invalid round {raw:?}"))
}

/// Accepts `7` or `1-19`.
fn parse_round_range(raw: &str) -> Result<RoundSpan> {
    let (first, last) = match raw.split_once('-') {
        Some((a, b)) => (parse_round(a)?, parse_round(b)?),
        None => {
            let r = parse_round(raw)?;
            (r, r)
        }
    };
    if first > last {
        return Err(anyhow!("round range {raw:?} is reversed"));
    }
    Ok(RoundSpan::between(first, last))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_input() {
        let s = Settings::resolve(&[], |_| None).unwrap();
        assert_eq!(s.csv_path, None);
        assert_eq!(s.goal_threshold, DEFAULT_GOAL_THRESHOLD);
        assert!(!s.json);
        assert!(s.match_filter().is_none());
    }

    #[test]
    fn flags_override_environment() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SEASON_CSV_PATH", "/data/env.csv"),
            ("SEASON_YEAR", "2019"),
            ("LOW_SCORING_THRESHOLD", "2"),
        ]);
        let s = Settings::resolve(
            &args(&["--csv=/data/cli.csv", "--year", "2022", "--json"]),
            |k| env.get(k).map(|v| v.to_string()),
        )
        .unwrap();
        assert_eq!(s.csv_path, Some(PathBuf::from("/data/cli.csv")));
        assert_eq!(s.season_year, Some(2022));
        assert_eq!(s.goal_threshold, 2);
        assert!(s.json);
        assert_eq!(s.match_filter().unwrap().label(), "season 2022");
    }

    #[test]
    fn round_ranges() {
        let s = Settings::resolve(&args(&["--rounds", "1-19"]), |_| None).unwrap();
        assert_eq!(s.rounds, Some(RoundSpan::between(1, 19)));
        let s = Settings::resolve(&args(&["--rounds=7"]), |_| None).unwrap();
        assert_eq!(s.rounds, Some(RoundSpan::between(7, 7)));
        assert!(Settings::resolve(&args(&["--rounds", "9-3"]), |_| None).is_err());
        assert!(Settings::resolve(&args(&["--rounds", "0-3"]), |_| None).is_err());

        let env: HashMap<&str, &str> = HashMap::from([("SEASON_LAST_ROUND", "38")]);
        let s = Settings::resolve(&[], |k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(s.rounds, Some(RoundSpan::between(1, 38)));
        assert_eq!(s.match_filter().unwrap().label(), "rounds 1-38");
    }

    #[test]
    fn first_round_alone_is_open_ended() {
        let env: HashMap<&str, &str> = HashMap::from([("SEASON_FIRST_ROUND", "5")]);
        let s = Settings::resolve(&[], |k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(
            s.rounds,
            Some(RoundSpan {
                first: 5,
                last: None
            })
        );
        assert_eq!(s.match_filter().unwrap().label(), "rounds 5+");

        let env: HashMap<&str, &str> =
            HashMap::from([("SEASON_FIRST_ROUND", "9"), ("SEASON_LAST_ROUND", "3")]);
        assert!(Settings::resolve(&[], |k| env.get(k).map(|v| v.to_string())).is_err());
    }

    #[test]
    fn combined_filter_label() {
        let s = Settings::resolve(&args(&["--year=2003", "--rounds=1-23"]), |_| None).unwrap();
        assert_eq!(s.match_filter().unwrap().label(), "season 2003 & rounds 1-23");
    }

    #[test]
    fn bad_numbers_are_errors() {
        assert!(Settings::resolve(&args(&["--threshold", "lots"]), |_| None).is_err());
        assert!(Settings::resolve(&args(&["--year", "MMIII"]), |_| None).is_err());
    }
}
