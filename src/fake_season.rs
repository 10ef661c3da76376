use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use rand::Rng;

use crate::match_record::{MatchRecord, MatchSchedule, Winner};

const DEMO_TEAMS: &[(&str, &str, &str)] = &[
    ("Palmeiras", "SP", "Allianz Parque"),
    ("Flamengo", "RJ", "Maracanã"),
    ("Atlético-MG", "MG", "Arena MRV"),
    ("Grêmio", "RS", "Arena do Grêmio"),
    ("Fortaleza", "CE", "Castelão"),
    ("Bahia", "BA", "Fonte Nova"),
    ("Athletico-PR", "PR", "Ligga Arena"),
    ("Cuiabá", "MT", "Arena Pantanal"),
];

pub fn demo_teams() -> Vec<String> {
    DEMO_TEAMS.iter().map(|(name, _, _)| name.to_string()).collect()
}

/// Double round-robin (circle method): each pair meets once at each ground,
/// one round per week starting on the first Saturday of April.
pub fn generate_round_robin<R: Rng>(teams: &[String], year: i32, rng: &mut R) -> Vec<MatchRecord> {
    if teams.len() < 2 {
        return Vec::new();
    }
    let mut slots: Vec<Option<&str>> = teams.iter().map(|t| Some(t.as_str())).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let n = slots.len();
    let first_leg_rounds = n - 1;
    let start = first_saturday_of_april(year);
    let kickoff = NaiveTime::from_hms_opt(16, 0, 0);

    let mut out = Vec::with_capacity(teams.len() * (teams.len() - 1));
    for leg in 0..2 {
        let mut order = slots.clone();
        for r in 0..first_leg_rounds {
            let round = (leg * first_leg_rounds + r + 1) as u32;
            let date = start + Duration::weeks(i64::from(round - 1));
            for i in 0..n / 2 {
                let (Some(a), Some(b)) = (order[i], order[n - 1 - i]) else {
                    continue;
                };
                // Alternate grounds so nobody plays every first-leg game at home.
                let (home, away) = if (r + i) % 2 == 0 { (a, b) } else { (b, a) };
                let (home, away) = if leg == 0 { (home, away) } else { (away, home) };
                let mut schedule = MatchSchedule::on(date);
                schedule.kickoff = kickoff;
                out.push(random_match(round, schedule, home, away, rng));
            }
            // Rotate everything but the first slot.
            let last = order.remove(n - 1);
            order.insert(1, last);
        }
    }
    out
}

fn random_match<R: Rng>(
    round: u32,
    schedule: MatchSchedule,
    home: &str,
    away: &str,
    rng: &mut R,
) -> MatchRecord {
    let home_goals = random_goals(rng, 1.5);
    let away_goals = random_goals(rng, 1.1);
    let home_state = state_of(home);
    let away_state = state_of(away);
    let (winner, winner_state) = if home_goals > away_goals {
        (Winner::Team(home.to_string()), Some(home_state.clone()))
    } else if home_goals < away_goals {
        (Winner::Team(away.to_string()), Some(away_state.clone()))
    } else {
        (Winner::Draw, None)
    };
    MatchRecord {
        round,
        schedule,
        home_team: home.to_string(),
        away_team: away.to_string(),
        winner,
        venue: venue_of(home),
        home_goals,
        away_goals,
        home_state,
        away_state,
        winner_state,
    }
}

// Knuth's Poisson sampler; lambda stays small so the loop is short.
fn random_goals<R: Rng>(rng: &mut R, lambda: f64) -> u32 {
    let limit = (-lambda).exp();
    let mut k = 0u32;
    let mut p: f64 = 1.0;
    loop {
        p *= rng.gen_range(0.0_f64..1.0);
        if p <= limit || k >= 9 {
            return k;
        }
        k += 1;
    }
}

fn state_of(team: &str) -> String {
    DEMO_TEAMS
        .iter()
        .find(|(name, _, _)| *name == team)
        .map(|(_, state, _)| state.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn venue_of(team: &str) -> String {
    DEMO_TEAMS
        .iter()
        .find(|(name, _, _)| *name == team)
        .map(|(_, _, venue)| venue.to_string())
        .unwrap_or_else(|| format!("Estádio {team}"))
}

fn first_saturday_of_april(year: i32) -> NaiveDate {
    let april = NaiveDate::from_ymd_opt(year, 4, 1).unwrap_or_default();
    april
        .iter_days()
        .find(|d| d.weekday() == Weekday::Sat)
        .unwrap_or(april)
}
