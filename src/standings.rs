use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aggregation::{TeamTally, team_names, team_tally};
use crate::match_record::MatchRecord;

pub const POINTS_PER_WIN: i64 = 3;
pub const POINTS_PER_DRAW: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team: String,
    pub points: i64,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
}

impl StandingsRow {
    pub fn from_tally(team: impl Into<String>, tally: TeamTally) -> Self {
        Self {
            team: team.into(),
            points: POINTS_PER_WIN * i64::from(tally.wins)
                + POINTS_PER_DRAW * i64::from(tally.draws),
            wins: tally.wins,
            losses: tally.losses,
            draws: tally.draws,
            goals_for: tally.goals_for,
            goals_against: tally.goals_against,
            goal_difference: i64::from(tally.goals_for) - i64::from(tally.goals_against),
        }
    }

    pub fn played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherBetter,
    LowerBetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankKey {
    Points,
    Wins,
    GoalDifference,
}

impl RankKey {
    pub fn extract(self, row: &StandingsRow) -> i64 {
        match self {
            RankKey::Points => row.points,
            RankKey::Wins => i64::from(row.wins),
            RankKey::GoalDifference => row.goal_difference,
        }
    }
}

/// Ranking criteria in evaluation order. Each key only matters when every
/// earlier key is level.
pub const RANKING_KEYS: &[(RankKey, Direction)] = &[
    (RankKey::Points, Direction::HigherBetter),
    (RankKey::Wins, Direction::HigherBetter),
    (RankKey::GoalDifference, Direction::HigherBetter),
];

/// Orders rows best first by `keys`. Rows level on every key fall back to
/// team name ascending.
pub fn compare_rows(a: &StandingsRow, b: &StandingsRow, keys: &[(RankKey, Direction)]) -> Ordering {
    for (key, dir) in keys {
        let (va, vb) = (key.extract(a), key.extract(b));
        let ord = match dir {
            Direction::HigherBetter => vb.cmp(&va),
            Direction::LowerBetter => va.cmp(&vb),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.team.cmp(&b.team)
}

pub fn standings_row(matches: &[&MatchRecord], team: &str) -> StandingsRow {
    StandingsRow::from_tally(team, team_tally(matches, team))
}

pub fn build_standings(matches: &[&MatchRecord]) -> Vec<StandingsRow> {
    let teams: Vec<String> = team_names(matches.iter().copied()).into_iter().collect();
    let mut rows: Vec<StandingsRow> = teams
        .par_iter()
        .map(|team| standings_row(matches, team))
        .collect();
    rows.sort_by(|a, b| compare_rows(a, b, RANKING_KEYS));
    rows
}
