use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

use log::debug;

use crate::match_record::MatchRecord;

type Predicate = Arc<dyn Fn(&MatchRecord) -> bool + Send + Sync>;

/// Inclusion rule applied to the stored records before any aggregation.
#[derive(Clone)]
pub struct MatchFilter {
    label: String,
    predicate: Predicate,
}

impl MatchFilter {
    pub fn new(
        label: impl Into<String>,
        predicate: impl Fn(&MatchRecord) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn all() -> Self {
        Self::new("all", |_| true)
    }

    pub fn in_rounds(rounds: RangeInclusive<u32>) -> Self {
        let label = format!("rounds {}-{}", rounds.start(), rounds.end());
        Self::new(label, move |m| rounds.contains(&m.round))
    }

    /// Rounds `first` onwards, with no upper bound.
    pub fn from_round(first: u32) -> Self {
        Self::new(format!("rounds {first}+"), move |m| m.round >= first)
    }

    pub fn in_season(year: i32) -> Self {
        Self::new(format!("season {year}"), move |m| m.schedule.year() == year)
    }

    pub fn involving_team(team: impl Into<String>) -> Self {
        let team = team.into();
        Self::new(format!("team {team}"), move |m| m.involves(&team))
    }

    pub fn and(self, other: MatchFilter) -> Self {
        let label = format!("{} & {}", self.label, other.label);
        let (a, b) = (self.predicate, other.predicate);
        Self::new(label, move |m| a(m) && b(m))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn matches(&self, record: &MatchRecord) -> bool {
        (self.predicate)(record)
    }
}

impl fmt::Debug for MatchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchFilter")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Full ingested season plus an optional filter.
///
/// The stored sequence is never rewritten: every call to
/// [`RecordStore::filtered_matches`] re-derives the view from the full set.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<MatchRecord>,
    filter: Option<MatchFilter>,
}

impl RecordStore {
    pub fn new(records: Vec<MatchRecord>) -> Self {
        Self {
            records,
            filter: None,
        }
    }

    pub fn with_filter(records: Vec<MatchRecord>, filter: MatchFilter) -> Self {
        Self {
            records,
            filter: Some(filter),
        }
    }

    pub fn all_records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn filter(&self) -> Option<&MatchFilter> {
        self.filter.as_ref()
    }

    pub fn filtered(&self) -> impl Iterator<Item = &MatchRecord> + '_ {
        self.records
            .iter()
            .filter(move |m| self.filter.as_ref().is_none_or(|f| f.matches(m)))
    }

    pub fn filtered_matches(&self) -> Vec<&MatchRecord> {
        let out: Vec<&MatchRecord> = self.filtered().collect();
        debug!(
            "filter {}: {}/{} matches",
            self.filter.as_ref().map(|f| f.label()).unwrap_or("none"),
            out.len(),
            self.records.len()
        );
        out
    }
}
