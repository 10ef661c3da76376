use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSchedule {
    pub date: NaiveDate,
    // Some seasons publish kickoff times only for part of the fixtures.
    pub kickoff: Option<NaiveTime>,
    pub weekday: Weekday,
}

impl MatchSchedule {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date,
            kickoff: None,
            weekday: date.weekday(),
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Team(String),
    Draw,
}

impl Winner {
    pub fn name(&self) -> Option<&str> {
        match self {
            Winner::Team(name) => Some(name.as_str()),
            Winner::Draw => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

/// Exact scoreline of a match, home goals first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub home: u32,
    pub away: u32,
}

impl ScoreOutcome {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }
}

impl fmt::Display for ScoreOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// One played fixture as delivered by the ingest layer.
///
/// Records are never mutated after construction; the winner and winner
/// state are expected to agree with the scoreline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub round: u32,
    pub schedule: MatchSchedule,
    pub home_team: String,
    pub away_team: String,
    pub winner: Winner,
    pub venue: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub home_state: String,
    pub away_state: String,
    pub winner_state: Option<String>,
}

impl MatchRecord {
    /// Saturates at `u32::MAX` instead of wrapping.
    pub fn total_goals(&self) -> u32 {
        self.home_goals.saturating_add(self.away_goals)
    }

    pub fn score(&self) -> ScoreOutcome {
        ScoreOutcome::new(self.home_goals, self.away_goals)
    }

    pub fn outcome(&self) -> Outcome {
        if self.home_goals > self.away_goals {
            Outcome::Home
        } else if self.home_goals < self.away_goals {
            Outcome::Away
        } else {
            Outcome::Draw
        }
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(round: u32, home: &str, away: &str, hg: u32, ag: u32) -> MatchRecord {
        let date = NaiveDate::from_ymd_opt(2023, 4, 15).expect("valid date")
            + chrono::Duration::weeks(i64::from(round.saturating_sub(1)));
        let (winner, winner_state) = if hg > ag {
            (Winner::Team(home.to_string()), Some("SP".to_string()))
        } else if hg < ag {
            (Winner::Team(away.to_string()), Some("RJ".to_string()))
        } else {
            (Winner::Draw, None)
        };
        MatchRecord {
            round,
            schedule: MatchSchedule::on(date),
            home_team: home.to_string(),
            away_team: away.to_string(),
            winner,
            venue: format!("{home} Arena"),
            home_goals: hg,
            away_goals: ag,
            home_state: "SP".to_string(),
            away_state: "RJ".to_string(),
            winner_state,
        }
    }

    #[test]
    fn outcome_follows_scoreline() {
        assert_eq!(record(1, "A", "B", 2, 1).outcome(), Outcome::Home);
        assert_eq!(record(1, "A", "B", 0, 3).outcome(), Outcome::Away);
        assert_eq!(record(1, "A", "B", 1, 1).outcome(), Outcome::Draw);
    }

    #[test]
    fn score_keeps_home_first() {
        let m = record(1, "A", "B", 2, 1);
        assert_eq!(m.score(), ScoreOutcome::new(2, 1));
        assert_ne!(m.score(), ScoreOutcome::new(1, 2));
        assert_eq!(m.score().to_string(), "2-1");
        assert_eq!(m.total_goals(), 3);
    }

    #[test]
    fn schedule_derives_weekday() {
        let date = NaiveDate::from_ymd_opt(2023, 4, 15).unwrap();
        let schedule = MatchSchedule::on(date);
        assert_eq!(schedule.weekday, Weekday::Sat);
        assert_eq!(schedule.year(), 2023);
    }
}
