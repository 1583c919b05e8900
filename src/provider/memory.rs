use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

use super::{MatchFilter, MatchOrder, PlayerFilter, StatsProvider};
use crate::domain::{
    ActivityLog, GoalEvent, MatchFact, Player, PlayerSeasonStats, SearchHit, SearchKind, Season,
    Team,
};
use crate::error::Result;

/// A complete, self-contained set of league data
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    pub teams: Vec<Team>,
    pub seasons: Vec<Season>,
    pub matches: Vec<MatchFact>,
    pub goals: Vec<GoalEvent>,
    pub players: Vec<Player>,
    pub player_stats: Vec<PlayerSeasonStats>,
    pub activity: Vec<ActivityLog>,
}

/// In-process provider over an owned [`Dataset`]
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    data: Dataset,
}

fn paginate<T>(items: Vec<T>, limit: Option<i64>, offset: Option<i64>) -> Vec<T> {
    let offset = offset.unwrap_or(0).max(0) as usize;
    let iter = items.into_iter().skip(offset);
    match limit {
        Some(limit) if limit > 0 => iter.take(limit as usize).collect(),
        _ => iter.collect(),
    }
}

fn eq_ignore_case(value: &Option<String>, wanted: &str) -> bool {
    value
        .as_deref()
        .is_some_and(|v| v.eq_ignore_ascii_case(wanted))
}

/// Distinct non-null values, sorted
fn distinct<'a>(values: impl Iterator<Item = Option<&'a String>>) -> Vec<String> {
    let mut values: Vec<String> = values.flatten().cloned().collect();
    values.sort();
    values.dedup();
    values
}

impl MemoryProvider {
    pub fn new(data: Dataset) -> Self {
        Self { data }
    }

    /// Load a dataset from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let data: Dataset = serde_json::from_str(&raw)?;
        info!(
            "Loaded dataset from {}: {} teams, {} seasons, {} matches",
            path.as_ref().display(),
            data.teams.len(),
            data.seasons.len(),
            data.matches.len()
        );
        Ok(Self { data })
    }

    fn team_names(&self) -> HashMap<i32, &str> {
        self.data
            .teams
            .iter()
            .map(|t| (t.id, t.name.as_str()))
            .collect()
    }

    /// Fill team names on a match from the team list, as the SQL join does
    fn with_team_names(names: &HashMap<i32, &str>, mut fixture: MatchFact) -> MatchFact {
        if let Some(name) = names.get(&fixture.home_team_id) {
            fixture.home_team = name.to_string();
        }
        if let Some(name) = names.get(&fixture.away_team_id) {
            fixture.away_team = name.to_string();
        }
        fixture
    }
}

#[async_trait]
impl StatsProvider for MemoryProvider {
    async fn list_seasons(&self) -> Result<Vec<Season>> {
        let mut seasons = self.data.seasons.clone();
        seasons.sort_by_key(|s| s.id);
        Ok(seasons)
    }

    async fn get_season(&self, season_id: i32) -> Result<Option<Season>> {
        Ok(self.data.seasons.iter().find(|s| s.id == season_id).cloned())
    }

    async fn list_available_seasons(&self) -> Result<Vec<Season>> {
        let scored: HashSet<i32> = self
            .data
            .matches
            .iter()
            .filter(|m| m.is_scored())
            .map(|m| m.season_id)
            .collect();
        let mut seasons: Vec<Season> = self
            .data
            .seasons
            .iter()
            .filter(|s| scored.contains(&s.id))
            .cloned()
            .collect();
        seasons.sort_by_key(|s| s.id);
        Ok(seasons)
    }

    async fn list_teams(&self) -> Result<Vec<Team>> {
        let mut teams = self.data.teams.clone();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teams)
    }

    async fn get_team(&self, team_id: i32) -> Result<Option<Team>> {
        Ok(self.data.teams.iter().find(|t| t.id == team_id).cloned())
    }

    async fn list_teams_in_season(&self, season_id: i32) -> Result<Vec<Team>> {
        let ids: HashSet<i32> = self
            .data
            .matches
            .iter()
            .filter(|m| m.season_id == season_id)
            .flat_map(|m| [m.home_team_id, m.away_team_id])
            .collect();
        let mut teams: Vec<Team> = self
            .data
            .teams
            .iter()
            .filter(|t| ids.contains(&t.id))
            .cloned()
            .collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teams)
    }

    async fn list_matches(&self, filter: MatchFilter) -> Result<Vec<MatchFact>> {
        let names = self.team_names();
        let mut matches: Vec<MatchFact> = self
            .data
            .matches
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .map(|m| Self::with_team_names(&names, m))
            .collect();
        matches.sort_by(|a, b| {
            let oldest_first = a.match_date.cmp(&b.match_date).then(a.id.cmp(&b.id));
            match filter.order {
                MatchOrder::Newest => oldest_first.reverse(),
                MatchOrder::Oldest => oldest_first,
            }
        });
        Ok(paginate(matches, filter.limit, filter.offset))
    }

    async fn get_match(&self, match_id: i32) -> Result<Option<MatchFact>> {
        Ok(self
            .data
            .matches
            .iter()
            .find(|m| m.id == match_id)
            .cloned()
            .map(|m| Self::with_team_names(&self.team_names(), m)))
    }

    async fn list_goal_events(&self, season_id: Option<i32>) -> Result<Vec<GoalEvent>> {
        let Some(season_id) = season_id else {
            return Ok(self.data.goals.clone());
        };
        let match_ids: HashSet<i32> = self
            .data
            .matches
            .iter()
            .filter(|m| m.season_id == season_id)
            .map(|m| m.id)
            .collect();
        Ok(self
            .data
            .goals
            .iter()
            .filter(|g| match_ids.contains(&g.match_id))
            .cloned()
            .collect())
    }

    async fn list_match_goals(&self, match_id: i32) -> Result<Vec<GoalEvent>> {
        let mut goals: Vec<GoalEvent> = self
            .data
            .goals
            .iter()
            .filter(|g| g.match_id == match_id)
            .cloned()
            .collect();
        goals.sort_by_key(|g| g.id);
        Ok(goals)
    }

    async fn list_players(&self, filter: PlayerFilter) -> Result<Vec<Player>> {
        let search = filter.search.as_deref().map(str::to_lowercase);
        let mut players: Vec<Player> = self
            .data
            .players
            .iter()
            .filter(|p| {
                search
                    .as_deref()
                    .map_or(true, |s| p.name.to_lowercase().contains(s))
            })
            .filter(|p| {
                filter
                    .position
                    .as_deref()
                    .map_or(true, |pos| eq_ignore_case(&p.position, pos))
            })
            .filter(|p| {
                filter
                    .nationality
                    .as_deref()
                    .map_or(true, |n| eq_ignore_case(&p.nationality, n))
            })
            .cloned()
            .collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(players, filter.limit, filter.offset))
    }

    async fn get_player(&self, player_id: i32) -> Result<Option<Player>> {
        Ok(self.data.players.iter().find(|p| p.id == player_id).cloned())
    }

    async fn list_player_positions(&self) -> Result<Vec<String>> {
        Ok(distinct(self.data.players.iter().map(|p| p.position.as_ref())))
    }

    async fn list_player_nationalities(&self) -> Result<Vec<String>> {
        Ok(distinct(self.data.players.iter().map(|p| p.nationality.as_ref())))
    }

    async fn list_player_season_stats(&self, season_id: i32) -> Result<Vec<PlayerSeasonStats>> {
        Ok(self
            .data
            .player_stats
            .iter()
            .filter(|s| s.season_id == season_id)
            .cloned()
            .collect())
    }

    async fn list_player_stats(
        &self,
        player_id: i32,
        season_id: Option<i32>,
    ) -> Result<Vec<PlayerSeasonStats>> {
        let mut rows: Vec<PlayerSeasonStats> = self
            .data
            .player_stats
            .iter()
            .filter(|s| s.player_id == player_id)
            .filter(|s| season_id.map_or(true, |id| s.season_id == id))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.season_id.cmp(&a.season_id));
        Ok(rows)
    }

    async fn search(&self, term: &str, limit: i64) -> Result<Vec<SearchHit>> {
        let term = term.trim().to_lowercase();
        let limit = limit.max(0) as usize;

        let players = self
            .data
            .players
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&term))
            .map(|p| SearchHit {
                kind: SearchKind::Player,
                id: p.id,
                name: p.name.clone(),
                subtitle: p.position.clone(),
            });
        let teams = self
            .data
            .teams
            .iter()
            .filter(|t| t.name.to_lowercase().contains(&term))
            .map(|t| SearchHit {
                kind: SearchKind::Team,
                id: t.id,
                name: t.name.clone(),
                subtitle: t.stadium.clone(),
            });

        let mut hits: Vec<SearchHit> = players.chain(teams).collect();
        hits.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
        hits.truncate(limit);
        Ok(hits)
    }

    async fn recent_activity(&self, since: DateTime<Utc>, limit: i64) -> Result<Vec<ActivityLog>> {
        let mut rows: Vec<ActivityLog> = self
            .data
            .activity
            .iter()
            .filter(|a| a.date >= since)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(paginate(rows, Some(limit), None))
    }
}
