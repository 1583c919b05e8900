//! Read-only access to match facts and reference data.
//!
//! The analytics engine never talks to a store directly; services fetch
//! owned snapshots through this trait and pass them in. Ordering of returned
//! collections is not part of the contract.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{
    ActivityLog, GoalEvent, MatchFact, Player, PlayerSeasonStats, SearchHit, Season, Team,
};
use crate::error::Result;

pub use memory::{Dataset, MemoryProvider};

/// Kickoff ordering for match listings; ties break on id in the same direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOrder {
    #[default]
    Newest,
    Oldest,
}

/// Filter for match listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct MatchFilter {
    pub season_id: Option<i32>,
    pub team_id: Option<i32>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    #[serde(default)]
    pub order: MatchOrder,
}

impl MatchFilter {
    pub fn season(season_id: i32) -> Self {
        Self {
            season_id: Some(season_id),
            ..Default::default()
        }
    }

    pub fn team_in_season(team_id: i32, season_id: i32) -> Self {
        Self {
            season_id: Some(season_id),
            team_id: Some(team_id),
            ..Default::default()
        }
    }

    pub fn matches(&self, fixture: &MatchFact) -> bool {
        self.season_id.map_or(true, |s| fixture.season_id == s)
            && self.team_id.map_or(true, |t| fixture.involves(t))
    }
}

/// Filter for player listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlayerFilter {
    /// Case-insensitive substring of the player name
    pub search: Option<String>,
    pub position: Option<String>,
    pub nationality: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Check that the backing store is reachable
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// All seasons, ordered by id
    async fn list_seasons(&self) -> Result<Vec<Season>>;

    async fn get_season(&self, season_id: i32) -> Result<Option<Season>>;

    /// Seasons with at least one scored match, ordered by id
    async fn list_available_seasons(&self) -> Result<Vec<Season>>;

    /// Starting year of a season, `None` if the season does not exist
    async fn season_year(&self, season_id: i32) -> Result<Option<i32>> {
        Ok(self.get_season(season_id).await?.map(|s| s.year))
    }

    /// All teams, ordered by name
    async fn list_teams(&self) -> Result<Vec<Team>>;

    async fn get_team(&self, team_id: i32) -> Result<Option<Team>>;

    /// Teams appearing on either side of any match in the season
    async fn list_teams_in_season(&self, season_id: i32) -> Result<Vec<Team>>;

    async fn list_matches(&self, filter: MatchFilter) -> Result<Vec<MatchFact>>;

    async fn get_match(&self, match_id: i32) -> Result<Option<MatchFact>>;

    /// Goal events, optionally restricted to one season's matches
    async fn list_goal_events(&self, season_id: Option<i32>) -> Result<Vec<GoalEvent>>;

    /// Goal events recorded for one match, ordered by id
    async fn list_match_goals(&self, match_id: i32) -> Result<Vec<GoalEvent>>;

    async fn list_players(&self, filter: PlayerFilter) -> Result<Vec<Player>>;

    async fn get_player(&self, player_id: i32) -> Result<Option<Player>>;

    /// Distinct non-null positions, sorted
    async fn list_player_positions(&self) -> Result<Vec<String>>;

    /// Distinct non-null nationalities, sorted
    async fn list_player_nationalities(&self) -> Result<Vec<String>>;

    async fn list_player_season_stats(&self, season_id: i32) -> Result<Vec<PlayerSeasonStats>>;

    /// One player's season rows, newest season first
    async fn list_player_stats(
        &self,
        player_id: i32,
        season_id: Option<i32>,
    ) -> Result<Vec<PlayerSeasonStats>>;

    /// Players and teams whose name contains `term` (case-insensitive).
    /// Players come before teams, each group by name; at most `limit` hits.
    async fn search(&self, term: &str, limit: i64) -> Result<Vec<SearchHit>>;

    /// Goal-import activity recorded since `since`, newest first
    async fn recent_activity(&self, since: DateTime<Utc>, limit: i64) -> Result<Vec<ActivityLog>>;
}
