//! Statistics service: reference lookups, fact fetching and engine calls.

use chrono::{Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::analytics::{
    aggregate, build_report, rank_top_scorers, season_completeness, summarize, team_season_stats,
    CompletenessReport, SeasonCompleteness, SeasonFacts, SeasonSummary, StandingsTable,
    TeamSeasonStats, TopScorer,
};
use crate::config::ReportsConfig;
use crate::domain::{
    ActivityLog, GoalEvent, MatchFact, Player, PlayerSeasonStats, SearchHit, Season, Team,
};
use crate::error::{Result, StatsError};
use crate::provider::{MatchFilter, MatchOrder, PlayerFilter, StatsProvider};

/// League table for one season
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standings {
    pub season_id: i32,
    pub season: String,
    pub table: StandingsTable,
}

#[derive(Clone)]
pub struct StatsService {
    provider: Arc<dyn StatsProvider>,
    reports: ReportsConfig,
}

impl StatsService {
    pub fn new(provider: Arc<dyn StatsProvider>, reports: ReportsConfig) -> Self {
        Self { provider, reports }
    }

    /// Reachability of the backing store
    pub async fn ping(&self) -> Result<()> {
        self.provider.ping().await
    }

    async fn require_season(&self, season_id: i32) -> Result<Season> {
        self.provider
            .get_season(season_id)
            .await?
            .ok_or_else(|| StatsError::not_found("Season", season_id))
    }

    async fn require_team(&self, team_id: i32) -> Result<Team> {
        self.provider
            .get_team(team_id)
            .await?
            .ok_or_else(|| StatsError::not_found("Team", team_id))
    }

    async fn season_table(&self, season_id: i32) -> Result<(StandingsTable, Vec<MatchFact>)> {
        let teams = self.provider.list_teams_in_season(season_id).await?;
        let matches = self.provider.list_matches(MatchFilter::season(season_id)).await?;
        debug!(
            season_id,
            teams = teams.len(),
            matches = matches.len(),
            "Aggregating season table"
        );
        Ok((aggregate(&teams, &matches), matches))
    }

    // ==================== Engine ====================

    #[instrument(skip(self))]
    pub async fn standings(&self, season_id: i32) -> Result<Standings> {
        let season = self.require_season(season_id).await?;
        let (table, _) = self.season_table(season_id).await?;
        Ok(Standings {
            season_id,
            season: season.name,
            table,
        })
    }

    #[instrument(skip(self))]
    pub async fn team_stats(&self, team_id: i32, season_id: i32) -> Result<TeamSeasonStats> {
        let team = self.require_team(team_id).await?;
        let season = self.require_season(season_id).await?;
        let matches = self
            .provider
            .list_matches(MatchFilter::team_in_season(team_id, season_id))
            .await?;
        Ok(team_season_stats(&team, &season, &matches))
    }

    #[instrument(skip(self))]
    pub async fn season_summary(&self, season_id: i32) -> Result<SeasonSummary> {
        let season = self.require_season(season_id).await?;
        let (table, matches) = self.season_table(season_id).await?;
        Ok(summarize(&season, &table, &matches))
    }

    #[instrument(skip(self))]
    pub async fn top_scorers(&self, season_id: i32, limit: usize) -> Result<Vec<TopScorer>> {
        self.require_season(season_id).await?;
        let rows = self.provider.list_player_season_stats(season_id).await?;
        Ok(rank_top_scorers(rows, limit))
    }

    /// Full data-completeness report across every season
    #[instrument(skip(self))]
    pub async fn completeness_report(&self) -> Result<CompletenessReport> {
        let seasons = self.provider.list_seasons().await?;
        let matches = self.provider.list_matches(MatchFilter::default()).await?;
        let goals = self.provider.list_goal_events(None).await?;

        let season_of: HashMap<i32, i32> = matches.iter().map(|m| (m.id, m.season_id)).collect();
        let mut facts: HashMap<i32, SeasonFacts> = seasons
            .into_iter()
            .map(|season| {
                (
                    season.id,
                    SeasonFacts {
                        season,
                        matches: Vec::new(),
                        goals: Vec::new(),
                    },
                )
            })
            .collect();
        for fixture in matches {
            if let Some(entry) = facts.get_mut(&fixture.season_id) {
                entry.matches.push(fixture);
            }
        }
        for goal in goals {
            let entry = season_of
                .get(&goal.match_id)
                .and_then(|season_id| facts.get_mut(season_id));
            if let Some(entry) = entry {
                entry.goals.push(goal);
            }
        }

        let facts: Vec<SeasonFacts> = facts.into_values().collect();
        let recent_activity = self.recent_activity().await;
        let report = build_report(&facts, recent_activity, Utc::now());

        info!(
            "Data completeness report generated with {} seasons",
            report.season_data.len()
        );
        Ok(report)
    }

    /// Completeness for the season starting in `year`
    #[instrument(skip(self))]
    pub async fn season_completeness(&self, year: i32) -> Result<SeasonCompleteness> {
        let season = self
            .provider
            .list_seasons()
            .await?
            .into_iter()
            .find(|s| s.year == year)
            .ok_or_else(|| StatsError::not_found("Season", year))?;

        let matches = self.provider.list_matches(MatchFilter::season(season.id)).await?;
        let goals = self.provider.list_goal_events(Some(season.id)).await?;
        Ok(season_completeness(&SeasonFacts {
            season,
            matches,
            goals,
        }))
    }

    /// Recent import activity; an unavailable feed yields an empty section
    async fn recent_activity(&self) -> Vec<ActivityLog> {
        let Some(since) = Duration::try_days(self.reports.recent_activity_days)
            .and_then(|window| Utc::now().checked_sub_signed(window))
        else {
            warn!(
                days = self.reports.recent_activity_days,
                "Recent activity window out of range"
            );
            return Vec::new();
        };
        match self
            .provider
            .recent_activity(since, self.reports.recent_activity_limit)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Could not load recent activity: {}", e);
                Vec::new()
            }
        }
    }

    // ==================== Reference data ====================

    pub async fn seasons(&self) -> Result<Vec<Season>> {
        self.provider.list_seasons().await
    }

    pub async fn season(&self, season_id: i32) -> Result<Season> {
        self.require_season(season_id).await
    }

    pub async fn available_seasons(&self) -> Result<Vec<Season>> {
        self.provider.list_available_seasons().await
    }

    pub async fn teams(&self) -> Result<Vec<Team>> {
        self.provider.list_teams().await
    }

    pub async fn team(&self, team_id: i32) -> Result<Team> {
        self.require_team(team_id).await
    }

    pub async fn teams_in_season(&self, season_id: i32) -> Result<Vec<Team>> {
        self.require_season(season_id).await?;
        self.provider.list_teams_in_season(season_id).await
    }

    pub async fn matches(&self, filter: MatchFilter) -> Result<Vec<MatchFact>> {
        self.provider.list_matches(filter).await
    }

    /// One season's fixtures in kickoff order
    pub async fn season_matches(
        &self,
        season_id: i32,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MatchFact>> {
        self.require_season(season_id).await?;
        self.provider
            .list_matches(MatchFilter {
                season_id: Some(season_id),
                limit: Some(limit),
                offset: Some(offset),
                order: MatchOrder::Oldest,
                ..Default::default()
            })
            .await
    }

    pub async fn match_fact(&self, match_id: i32) -> Result<MatchFact> {
        self.provider
            .get_match(match_id)
            .await?
            .ok_or_else(|| StatsError::not_found("Match", match_id))
    }

    pub async fn match_goals(&self, match_id: i32) -> Result<Vec<GoalEvent>> {
        self.match_fact(match_id).await?;
        self.provider.list_match_goals(match_id).await
    }

    pub async fn players(&self, filter: PlayerFilter) -> Result<Vec<Player>> {
        self.provider.list_players(filter).await
    }

    pub async fn player(&self, player_id: i32) -> Result<Player> {
        self.provider
            .get_player(player_id)
            .await?
            .ok_or_else(|| StatsError::not_found("Player", player_id))
    }

    pub async fn player_stats(
        &self,
        player_id: i32,
        season_id: Option<i32>,
    ) -> Result<Vec<PlayerSeasonStats>> {
        self.player(player_id).await?;
        self.provider.list_player_stats(player_id, season_id).await
    }

    pub async fn player_positions(&self) -> Result<Vec<String>> {
        self.provider.list_player_positions().await
    }

    pub async fn player_nationalities(&self) -> Result<Vec<String>> {
        self.provider.list_player_nationalities().await
    }

    /// Name search across players and teams; a blank term is rejected
    pub async fn search(&self, term: &str, limit: i64) -> Result<Vec<SearchHit>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(StatsError::Validation("Search query is required".to_string()));
        }
        self.provider.search(term, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::standings::tests::{played, team};
    use crate::domain::GoalEvent;
    use crate::provider::{Dataset, MemoryProvider, MockStatsProvider};

    fn season(id: i32, year: i32) -> Season {
        Season {
            id,
            name: format!("{}/{:02}", year, (year + 1) % 100),
            year,
            created_at: None,
        }
    }

    fn service(provider: impl StatsProvider + 'static) -> StatsService {
        StatsService::new(Arc::new(provider), ReportsConfig::default())
    }

    fn memory_service() -> StatsService {
        let a = team(1, "Team A");
        let b = team(2, "Team B");
        let c = team(3, "Team C");
        let mut matches = vec![
            played(1, &a, &b, Some((2, 1))),
            played(2, &a, &c, Some((1, 1))),
            played(3, &b, &c, Some((3, 0))),
            played(4, &c, &a, None),
        ];
        let mut other = played(5, &a, &b, Some((0, 0)));
        other.season_id = 2;
        matches.push(other);

        service(MemoryProvider::new(Dataset {
            teams: vec![a, b, c],
            seasons: vec![season(1, 2023), season(2, 1993)],
            matches,
            goals: vec![
                GoalEvent {
                    id: 1,
                    match_id: 1,
                    player_id: Some(9),
                    created_at: None,
                },
                GoalEvent {
                    id: 2,
                    match_id: 1,
                    player_id: Some(10),
                    created_at: None,
                },
                GoalEvent {
                    id: 3,
                    match_id: 3,
                    player_id: Some(9),
                    created_at: None,
                },
            ],
            ..Default::default()
        }))
    }

    #[tokio::test]
    async fn test_standings_for_known_season() {
        let svc = memory_service();
        let standings = svc.standings(1).await.unwrap();

        assert_eq!(standings.season, "2023/24");
        let names: Vec<&str> = standings
            .table
            .entries()
            .iter()
            .map(|e| e.record.team_name.as_str())
            .collect();
        assert_eq!(names, vec!["Team A", "Team B", "Team C"]);
        assert_eq!(standings.table.entries()[0].points, 4);
    }

    #[tokio::test]
    async fn test_unknown_season_is_not_found() {
        let svc = memory_service();
        let err = svc.standings(99).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(svc.season_summary(99).await.unwrap_err().is_not_found());
        assert!(svc.team_stats(1, 99).await.unwrap_err().is_not_found());
        assert!(svc.team_stats(99, 1).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_team_stats_and_summary() {
        let svc = memory_service();
        let stats = svc.team_stats(2, 1).await.unwrap();
        assert_eq!(stats.matches_played, 2);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.points, 3);

        let summary = svc.season_summary(1).await.unwrap();
        assert_eq!(summary.total_matches, 3);
        assert_eq!(summary.total_goals, 8);
        assert_eq!(summary.champion.as_deref(), Some("Team A"));
        assert!(summary.relegated.is_none());
    }

    #[tokio::test]
    async fn test_completeness_report_groups_by_season() {
        let svc = memory_service();
        let report = svc.completeness_report().await.unwrap();

        assert_eq!(report.season_data.len(), 2);
        // ordered by year
        assert_eq!(report.season_data[0].year, 1993);
        let current = &report.season_data[1];
        assert_eq!(current.total_matches, 4);
        assert_eq!(current.matches_with_scores, 3);
        assert_eq!(current.matches_with_goals, 2);
        assert_eq!(current.total_goals, 3);
        assert_eq!(current.unique_players, 2);
        assert!(report.recent_activity.is_empty());
    }

    #[tokio::test]
    async fn test_season_completeness_by_year() {
        let svc = memory_service();
        let early = svc.season_completeness(1993).await.unwrap();
        assert_eq!(early.expected_matches, 462);
        assert_eq!(early.total_goals, 0);
        assert!(svc.season_completeness(1980).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_recent_activity_failure_keeps_report() {
        let mut mock = MockStatsProvider::new();
        mock.expect_list_seasons()
            .returning(|| Ok(vec![season(1, 2001)]));
        mock.expect_list_matches().returning(|_| Ok(Vec::new()));
        mock.expect_list_goal_events().returning(|_| Ok(Vec::new()));
        mock.expect_recent_activity()
            .times(1)
            .returning(|_, _| Err(StatsError::Internal("activity feed offline".to_string())));

        let report = service(mock).completeness_report().await.unwrap();
        assert_eq!(report.season_data.len(), 1);
        assert!(report.recent_activity.is_empty());
        assert_eq!(report.overall_stats.no_data_seasons, 1);
    }

    #[tokio::test]
    async fn test_provider_errors_propagate() {
        let mut mock = MockStatsProvider::new();
        mock.expect_get_season()
            .returning(|id| Ok(Some(season(id, 2010))));
        mock.expect_list_teams_in_season()
            .returning(|_| Err(StatsError::Database(sqlx::Error::PoolTimedOut)));

        let err = service(mock).standings(1).await.unwrap_err();
        assert!(matches!(err, StatsError::Database(_)));
    }

    #[tokio::test]
    async fn test_oversized_activity_window_keeps_report() {
        let mut mock = MockStatsProvider::new();
        mock.expect_list_seasons().returning(|| Ok(Vec::new()));
        mock.expect_list_matches().returning(|_| Ok(Vec::new()));
        mock.expect_list_goal_events().returning(|_| Ok(Vec::new()));
        mock.expect_recent_activity().times(0);

        let reports = ReportsConfig {
            recent_activity_days: i64::MAX,
            ..Default::default()
        };
        let report = StatsService::new(Arc::new(mock), reports)
            .completeness_report()
            .await
            .unwrap();
        assert!(report.recent_activity.is_empty());
    }

    #[tokio::test]
    async fn test_season_matches_oldest_first() {
        let svc = memory_service();
        let ids: Vec<i32> = svc
            .season_matches(1, 50, 0)
            .await
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(svc.season_matches(42, 50, 0).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_match_goals_require_match() {
        let svc = memory_service();
        assert_eq!(svc.match_goals(1).await.unwrap().len(), 2);
        assert!(svc.match_goals(4).await.unwrap().is_empty());
        assert!(svc.match_goals(404).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_blank_search_is_rejected() {
        let mut mock = MockStatsProvider::new();
        mock.expect_search().times(0);

        let err = service(mock).search("   ", 20).await.unwrap_err();
        assert!(matches!(err, StatsError::Validation(_)));
    }

    #[tokio::test]
    async fn test_ping_reports_store_failure() {
        let mut mock = MockStatsProvider::new();
        mock.expect_ping()
            .returning(|| Err(StatsError::Database(sqlx::Error::PoolTimedOut)));

        assert!(service(mock).ping().await.is_err());
        assert!(memory_service().ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_top_scorers_requires_season() {
        let mut mock = MockStatsProvider::new();
        mock.expect_get_season().returning(|_| Ok(None));
        mock.expect_list_player_season_stats().times(0);

        let err = service(mock).top_scorers(7, 10).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
