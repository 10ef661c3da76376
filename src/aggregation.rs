use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::match_record::{MatchRecord, Outcome, ScoreOutcome};

pub const DEFAULT_GOAL_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("no scorelines in the selected matches")]
    NoScores,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalSummary {
    pub count: usize,
    pub sum: u64,
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub average: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTally {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl TeamTally {
    pub fn played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Less => self.losses += 1,
            std::cmp::Ordering::Equal => self.draws += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCount {
    pub score: ScoreOutcome,
    pub count: u64,
}

pub fn total_goals(m: &MatchRecord) -> u32 {
    m.total_goals()
}

pub fn goal_summary<'a>(matches: impl IntoIterator<Item = &'a MatchRecord>) -> GoalSummary {
    let mut count = 0usize;
    let mut sum = 0u64;
    let mut min: Option<u32> = None;
    let mut max: Option<u32> = None;
    for m in matches {
        let goals = total_goals(m);
        count += 1;
        sum += u64::from(goals);
        min = Some(min.map_or(goals, |v| v.min(goals)));
        max = Some(max.map_or(goals, |v| v.max(goals)));
    }
    let average = (count > 0).then(|| sum as f64 / count as f64);
    GoalSummary {
        count,
        sum,
        min,
        max,
        average,
    }
}

pub fn average_goals_per_match<'a>(
    matches: impl IntoIterator<Item = &'a MatchRecord>,
) -> Option<f64> {
    goal_summary(matches).average
}

pub fn score_frequency<'a>(
    matches: impl IntoIterator<Item = &'a MatchRecord>,
) -> BTreeMap<ScoreOutcome, u64> {
    let mut out = BTreeMap::new();
    for m in matches {
        *out.entry(m.score()).or_insert(0) += 1;
    }
    out
}

/// Highest count wins; among equal counts the smallest scoreline (home goals,
/// then away goals) is kept.
pub fn most_frequent_score(freq: &BTreeMap<ScoreOutcome, u64>) -> Result<ScoreCount, StatsError> {
    pick_extreme(freq, |candidate, best| candidate > best)
}

/// Lowest count wins; ties resolve like [`most_frequent_score`].
pub fn least_frequent_score(freq: &BTreeMap<ScoreOutcome, u64>) -> Result<ScoreCount, StatsError> {
    pick_extreme(freq, |candidate, best| candidate < best)
}

fn pick_extreme(
    freq: &BTreeMap<ScoreOutcome, u64>,
    better: impl Fn(u64, u64) -> bool,
) -> Result<ScoreCount, StatsError> {
    let mut best: Option<ScoreCount> = None;
    for (score, count) in freq {
        // Strict comparison keeps the first extreme in key order.
        if best.is_none_or(|b| better(*count, b.count)) {
            best = Some(ScoreCount {
                score: *score,
                count: *count,
            });
        }
    }
    best.ok_or(StatsError::NoScores)
}

fn count_outcome<'a>(matches: impl IntoIterator<Item = &'a MatchRecord>, outcome: Outcome) -> usize {
    matches
        .into_iter()
        .filter(|m| m.outcome() == outcome)
        .count()
}

pub fn count_home_wins<'a>(matches: impl IntoIterator<Item = &'a MatchRecord>) -> usize {
    count_outcome(matches, Outcome::Home)
}

pub fn count_away_wins<'a>(matches: impl IntoIterator<Item = &'a MatchRecord>) -> usize {
    count_outcome(matches, Outcome::Away)
}

pub fn count_draws<'a>(matches: impl IntoIterator<Item = &'a MatchRecord>) -> usize {
    count_outcome(matches, Outcome::Draw)
}

/// Matches with fewer than `threshold` goals in total.
pub fn count_low_scoring<'a>(
    matches: impl IntoIterator<Item = &'a MatchRecord>,
    threshold: u32,
) -> usize {
    matches
        .into_iter()
        .filter(|m| total_goals(m) < threshold)
        .count()
}

/// Matches with `threshold` goals or more.
pub fn count_high_scoring<'a>(
    matches: impl IntoIterator<Item = &'a MatchRecord>,
    threshold: u32,
) -> usize {
    matches
        .into_iter()
        .filter(|m| total_goals(m) >= threshold)
        .count()
}

pub fn goals_per_round<'a>(
    matches: impl IntoIterator<Item = &'a MatchRecord>,
) -> BTreeMap<u32, u32> {
    matches.into_iter().fold(BTreeMap::new(), |mut acc, m| {
        let goals = acc.entry(m.round).or_insert(0u32);
        *goals = goals.saturating_add(total_goals(m));
        acc
    })
}

pub fn team_names<'a>(matches: impl IntoIterator<Item = &'a MatchRecord>) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for m in matches {
        if !out.contains(&m.home_team) {
            out.insert(m.home_team.clone());
        }
        if !out.contains(&m.away_team) {
            out.insert(m.away_team.clone());
        }
    }
    out
}

pub fn team_tally(matches: &[&MatchRecord], team: &str) -> TeamTally {
    let mut tally = TeamTally::default();
    for m in matches.iter().filter(|m| m.home_team == team) {
        tally.record(m.home_goals, m.away_goals);
    }
    for m in matches.iter().filter(|m| m.away_team == team) {
        tally.record(m.away_goals, m.home_goals);
    }
    tally
}
