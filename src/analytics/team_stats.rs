use serde::{Deserialize, Serialize};

use super::standings::TeamRecord;
use crate::domain::{MatchFact, Season, Team};

/// A single team's season record with its derived rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSeasonStats {
    pub team_id: i32,
    pub team: String,
    pub season_id: i32,
    pub season: String,
    pub matches_played: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub goal_difference: i32,
    pub points: i32,
    pub win_percentage: f64,
    pub points_per_game: f64,
}

impl TeamSeasonStats {
    fn from_record(record: &TeamRecord, season: &Season) -> Self {
        Self {
            team_id: record.team_id,
            team: record.team_name.clone(),
            season_id: season.id,
            season: season.name.clone(),
            matches_played: record.played,
            wins: record.won,
            draws: record.drawn,
            losses: record.lost,
            goals_for: record.goals_for,
            goals_against: record.goals_against,
            goal_difference: record.goal_difference(),
            points: record.points(),
            win_percentage: record.win_percentage(),
            points_per_game: record.points_per_game(),
        }
    }
}

/// Compute one team's record for one season.
///
/// `matches` may contain other clubs' fixtures or other seasons; only scored
/// matches of `season` involving `team` are counted. A team with no such
/// matches gets a zeroed record rather than an error.
pub fn team_season_stats(team: &Team, season: &Season, matches: &[MatchFact]) -> TeamSeasonStats {
    let mut record = TeamRecord::new(team.id, team.name.clone());
    for fixture in matches.iter().filter(|m| m.season_id == season.id) {
        record.record(fixture);
    }
    TeamSeasonStats::from_record(&record, season)
}
