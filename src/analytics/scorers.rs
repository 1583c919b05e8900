use serde::{Deserialize, Serialize};

use crate::domain::PlayerSeasonStats;

/// Default number of scorers when the caller gives no usable limit
pub const DEFAULT_SCORERS_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopScorer {
    pub rank: u32,
    pub player_id: i32,
    pub player_name: String,
    pub team_id: i32,
    pub team_name: String,
    pub goals: i32,
    pub assists: i32,
    pub appearances: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// Rank players by goals, then assists. Players without a goal are left out;
/// remaining ties keep input order. A `limit` of 0 means the default.
pub fn rank_top_scorers(mut rows: Vec<PlayerSeasonStats>, limit: usize) -> Vec<TopScorer> {
    let limit = if limit == 0 { DEFAULT_SCORERS_LIMIT } else { limit };

    rows.retain(|r| r.goals > 0);
    rows.sort_by(|a, b| b.goals.cmp(&a.goals).then_with(|| b.assists.cmp(&a.assists)));

    rows.into_iter()
        .take(limit)
        .zip(1u32..)
        .map(|(r, rank)| TopScorer {
            rank,
            player_id: r.player_id,
            player_name: r.player_name,
            team_id: r.team_id,
            team_name: r.team_name,
            goals: r.goals,
            assists: r.assists,
            appearances: r.appearances,
            nationality: r.nationality,
            position: r.position,
        })
        .collect()
}
