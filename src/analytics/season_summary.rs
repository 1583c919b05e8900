use serde::{Deserialize, Serialize};

use super::standings::StandingsTable;
use crate::domain::{MatchFact, Season};

/// Scored matches needed before relegation is reported: a full 20-team
/// double round-robin (20 * 19). Policy constant, not derived from the data.
pub const RELEGATION_MATCH_THRESHOLD: usize = 380;

/// Number of clubs relegated at the end of a complete season
pub const RELEGATION_PLACES: usize = 3;

/// Aggregate facts about one season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    pub season_id: i32,
    pub season: String,
    pub total_matches: usize,
    pub total_goals: i64,
    pub avg_goals_per_match: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub champion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relegated: Option<Vec<String>>,
}

/// Summarize a season from its table and match facts.
///
/// Totals count scored matches only. `relegated` is `None` below
/// [`RELEGATION_MATCH_THRESHOLD`]; a partial table never yields a guess.
/// When present it lists the bottom clubs worst first.
pub fn summarize(season: &Season, standings: &StandingsTable, matches: &[MatchFact]) -> SeasonSummary {
    let goals: Vec<i64> = matches
        .iter()
        .filter_map(MatchFact::total_goals)
        .map(i64::from)
        .collect();
    let total_matches = goals.len();
    let total_goals: i64 = goals.iter().sum();
    let avg_goals_per_match = if total_matches > 0 {
        total_goals as f64 / total_matches as f64
    } else {
        0.0
    };

    let champion = standings.leader().map(|e| e.record.team_name.clone());

    let relegated = (total_matches >= RELEGATION_MATCH_THRESHOLD).then(|| {
        standings
            .bottom(RELEGATION_PLACES)
            .into_iter()
            .map(|e| e.record.team_name.clone())
            .collect()
    });

    SeasonSummary {
        season_id: season.id,
        season: season.name.clone(),
        total_matches,
        total_goals,
        avg_goals_per_match,
        champion,
        relegated,
    }
}
