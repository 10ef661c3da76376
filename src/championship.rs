use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::aggregation::{
    self, DEFAULT_GOAL_THRESHOLD, GoalSummary, ScoreCount, StatsError, TeamTally,
};
use crate::match_record::{MatchRecord, ScoreOutcome};
use crate::record_store::{MatchFilter, RecordStore};
use crate::standings::{self, StandingsRow};

/// Query entry points over one season's records.
///
/// Nothing is cached: every call re-reads the filtered view of the store.
#[derive(Debug, Clone)]
pub struct Championship {
    store: RecordStore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundGoals {
    pub round: u32,
    pub goals: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreFrequencyRow {
    pub score: ScoreOutcome,
    pub count: u64,
}

/// Everything the report binary prints, in one serializable value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonReport {
    pub filter: String,
    pub total_matches: usize,
    pub goals: GoalSummary,
    pub home_wins: usize,
    pub away_wins: usize,
    pub draws: usize,
    pub goal_threshold: u32,
    pub low_scoring: usize,
    pub high_scoring: usize,
    pub most_frequent_score: Option<ScoreCount>,
    pub least_frequent_score: Option<ScoreCount>,
    pub score_frequency: Vec<ScoreFrequencyRow>,
    pub goals_per_round: Vec<RoundGoals>,
    pub standings: Vec<StandingsRow>,
}

impl Championship {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        Self {
            store: RecordStore::new(records),
        }
    }

    pub fn filtered(records: Vec<MatchRecord>, filter: MatchFilter) -> Self {
        Self {
            store: RecordStore::with_filter(records, filter),
        }
    }

    pub fn from_store(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn matches(&self) -> Vec<&MatchRecord> {
        self.store.filtered_matches()
    }

    pub fn total_matches(&self) -> usize {
        self.store.filtered().count()
    }

    pub fn goal_summary(&self) -> GoalSummary {
        aggregation::goal_summary(self.store.filtered())
    }

    pub fn average_goals_per_match(&self) -> Option<f64> {
        aggregation::average_goals_per_match(self.store.filtered())
    }

    pub fn score_frequency(&self) -> BTreeMap<ScoreOutcome, u64> {
        aggregation::score_frequency(self.store.filtered())
    }

    pub fn most_frequent_score(&self) -> Result<ScoreCount, StatsError> {
        aggregation::most_frequent_score(&self.score_frequency())
    }

    pub fn least_frequent_score(&self) -> Result<ScoreCount, StatsError> {
        aggregation::least_frequent_score(&self.score_frequency())
    }

    pub fn home_wins(&self) -> usize {
        aggregation::count_home_wins(self.store.filtered())
    }

    pub fn away_wins(&self) -> usize {
        aggregation::count_away_wins(self.store.filtered())
    }

    pub fn draws(&self) -> usize {
        aggregation::count_draws(self.store.filtered())
    }

    pub fn low_scoring_matches(&self, threshold: u32) -> usize {
        aggregation::count_low_scoring(self.store.filtered(), threshold)
    }

    pub fn high_scoring_matches(&self, threshold: u32) -> usize {
        aggregation::count_high_scoring(self.store.filtered(), threshold)
    }

    pub fn goals_per_round(&self) -> BTreeMap<u32, u32> {
        aggregation::goals_per_round(self.store.filtered())
    }

    pub fn goals_in_round(&self, round: u32) -> u32 {
        aggregation::goals_per_round(self.store.filtered().filter(|m| m.round == round))
            .get(&round)
            .copied()
            .unwrap_or(0)
    }

    pub fn teams(&self) -> BTreeSet<String> {
        aggregation::team_names(self.store.filtered())
    }

    pub fn team_tally(&self, team: &str) -> TeamTally {
        aggregation::team_tally(&self.matches(), team)
    }

    pub fn standings_row(&self, team: &str) -> StandingsRow {
        standings::standings_row(&self.matches(), team)
    }

    pub fn standings(&self) -> Vec<StandingsRow> {
        standings::build_standings(&self.matches())
    }

    pub fn report(&self, goal_threshold: u32) -> SeasonReport {
        let matches = self.matches();
        let freq = aggregation::score_frequency(matches.iter().copied());
        SeasonReport {
            filter: self
                .store
                .filter()
                .map(|f| f.label().to_string())
                .unwrap_or_else(|| "all".to_string()),
            total_matches: matches.len(),
            goals: aggregation::goal_summary(matches.iter().copied()),
            home_wins: aggregation::count_home_wins(matches.iter().copied()),
            away_wins: aggregation::count_away_wins(matches.iter().copied()),
            draws: aggregation::count_draws(matches.iter().copied()),
            goal_threshold,
            low_scoring: aggregation::count_low_scoring(matches.iter().copied(), goal_threshold),
            high_scoring: aggregation::count_high_scoring(matches.iter().copied(), goal_threshold),
            most_frequent_score: aggregation::most_frequent_score(&freq).ok(),
            least_frequent_score: aggregation::least_frequent_score(&freq).ok(),
            score_frequency: freq
                .iter()
                .map(|(score, count)| ScoreFrequencyRow {
                    score: *score,
                    count: *count,
                })
                .collect(),
            goals_per_round: aggregation::goals_per_round(matches.iter().copied())
                .into_iter()
                .map(|(round, goals)| RoundGoals { round, goals })
                .collect(),
            standings: standings::build_standings(&matches),
        }
    }

    pub fn summary(&self) -> SeasonReport {
        self.report(DEFAULT_GOAL_THRESHOLD)
    }
}
