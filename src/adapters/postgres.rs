use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{postgres::Postgres, QueryBuilder, Row};
use tracing::{debug, info, instrument};

use crate::domain::{
    ActivityLog, GoalEvent, MatchFact, Player, PlayerSeasonStats, SearchHit, SearchKind, Season,
    Team,
};
use crate::error::{Result, StatsError};
use crate::provider::{MatchFilter, MatchOrder, PlayerFilter, StatsProvider};

const MATCH_COLUMNS: &str = r#"
    SELECT
        m.id, m.season_id, m.home_team_id, m.away_team_id,
        ht.name AS home_team, at.name AS away_team,
        m.home_score, m.away_score, m.half_time_home, m.half_time_away,
        m.match_date::timestamptz AS match_date, m.referee,
        m.created_at::timestamptz AS created_at
    FROM matches m
    JOIN teams ht ON m.home_team_id = ht.id
    JOIN teams at ON m.away_team_id = at.id
"#;

const SEASON_COLUMNS: &str =
    "SELECT id, name, year, created_at::timestamptz AS created_at FROM seasons";

const TEAM_COLUMNS: &str = "SELECT id, name, short_name, stadium, founded FROM teams";

const PLAYER_COLUMNS: &str = "SELECT id, name, date_of_birth::text AS date_of_birth, nationality, position FROM players";

/// PostgreSQL storage adapter
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Distinct non-null values of one `players` column
    async fn distinct_player_column(&self, column: &str) -> Result<Vec<String>> {
        let rows = sqlx::query(&format!(
            "SELECT DISTINCT {column} AS value FROM players WHERE {column} IS NOT NULL ORDER BY {column}"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|row| row.try_get::<String, _>("value").map_err(StatsError::from))
            .collect()
    }
}

fn season_from_row(row: &PgRow) -> Result<Season> {
    Ok(Season {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        year: row.try_get::<Option<i32>, _>("year")?.unwrap_or_default(),
        created_at: row.try_get("created_at")?,
    })
}

fn team_from_row(row: &PgRow) -> Result<Team> {
    Ok(Team {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        short_name: row
            .try_get::<Option<String>, _>("short_name")?
            .unwrap_or_default(),
        stadium: row.try_get("stadium")?,
        founded: row.try_get("founded")?,
    })
}

fn match_from_row(row: &PgRow) -> Result<MatchFact> {
    Ok(MatchFact {
        id: row.try_get("id")?,
        season_id: row.try_get("season_id")?,
        home_team_id: row.try_get("home_team_id")?,
        away_team_id: row.try_get("away_team_id")?,
        home_team: row.try_get("home_team")?,
        away_team: row.try_get("away_team")?,
        home_score: row.try_get("home_score")?,
        away_score: row.try_get("away_score")?,
        half_time_home: row.try_get("half_time_home")?,
        half_time_away: row.try_get("half_time_away")?,
        match_date: row.try_get("match_date")?,
        referee: row.try_get("referee")?,
        created_at: row.try_get("created_at")?,
    })
}

fn goal_from_row(row: &PgRow) -> Result<GoalEvent> {
    Ok(GoalEvent {
        id: row.try_get("id")?,
        match_id: row.try_get("match_id")?,
        player_id: row.try_get("player_id")?,
        created_at: row.try_get("created_at")?,
    })
}

fn player_stats_from_row(row: &PgRow) -> Result<PlayerSeasonStats> {
    Ok(PlayerSeasonStats {
        player_id: row.try_get("player_id")?,
        player_name: row.try_get("player_name")?,
        season_id: row.try_get("season_id")?,
        team_id: row.try_get("team_id")?,
        team_name: row.try_get("team_name")?,
        appearances: row.try_get::<Option<i32>, _>("appearances")?.unwrap_or(0),
        goals: row.try_get::<Option<i32>, _>("goals")?.unwrap_or(0),
        assists: row.try_get::<Option<i32>, _>("assists")?.unwrap_or(0),
        nationality: row.try_get("nationality")?,
        position: row.try_get("position")?,
    })
}

fn player_from_row(row: &PgRow) -> Result<Player> {
    Ok(Player {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        date_of_birth: row.try_get("date_of_birth")?,
        nationality: row.try_get("nationality")?,
        position: row.try_get("position")?,
    })
}

#[async_trait]
impl StatsProvider for PostgresStore {
    #[instrument(skip(self))]
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_seasons(&self) -> Result<Vec<Season>> {
        let rows = sqlx::query(&format!("{SEASON_COLUMNS} ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(season_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn get_season(&self, season_id: i32) -> Result<Option<Season>> {
        let row = sqlx::query(&format!("{SEASON_COLUMNS} WHERE id = $1"))
            .bind(season_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(season_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn list_available_seasons(&self) -> Result<Vec<Season>> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.name, s.year, s.created_at::timestamptz AS created_at
            FROM seasons s
            WHERE EXISTS (
                SELECT 1 FROM matches m
                WHERE m.season_id = s.id
                  AND m.home_score IS NOT NULL
                  AND m.away_score IS NOT NULL
            )
            ORDER BY s.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(season_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn list_teams(&self) -> Result<Vec<Team>> {
        let rows = sqlx::query(&format!("{TEAM_COLUMNS} ORDER BY name ASC"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(team_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn get_team(&self, team_id: i32) -> Result<Option<Team>> {
        let row = sqlx::query(&format!("{TEAM_COLUMNS} WHERE id = $1"))
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(team_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn list_teams_in_season(&self, season_id: i32) -> Result<Vec<Team>> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT t.id, t.name, t.short_name, t.stadium, t.founded
            FROM teams t
            JOIN matches m ON (t.id = m.home_team_id OR t.id = m.away_team_id)
            WHERE m.season_id = $1
            ORDER BY t.name ASC
            "#,
        )
        .bind(season_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(team_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn list_matches(&self, filter: MatchFilter) -> Result<Vec<MatchFact>> {
        let mut qb = QueryBuilder::<Postgres>::new(MATCH_COLUMNS);
        qb.push(" WHERE 1=1");
        if let Some(season_id) = filter.season_id {
            qb.push(" AND m.season_id = ").push_bind(season_id);
        }
        if let Some(team_id) = filter.team_id {
            qb.push(" AND (m.home_team_id = ")
                .push_bind(team_id)
                .push(" OR m.away_team_id = ")
                .push_bind(team_id)
                .push(")");
        }
        qb.push(match filter.order {
            MatchOrder::Newest => " ORDER BY m.match_date DESC, m.id DESC",
            MatchOrder::Oldest => " ORDER BY m.match_date ASC, m.id ASC",
        });
        if let Some(limit) = filter.limit.filter(|l| *l > 0) {
            qb.push(" LIMIT ").push_bind(limit);
        }
        if let Some(offset) = filter.offset.filter(|o| *o > 0) {
            qb.push(" OFFSET ").push_bind(offset);
        }

        let rows = qb.build().fetch_all(&self.pool).await?;
        debug!("Fetched {} matches", rows.len());
        rows.iter().map(match_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn get_match(&self, match_id: i32) -> Result<Option<MatchFact>> {
        let row = sqlx::query(&format!("{MATCH_COLUMNS} WHERE m.id = $1"))
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(match_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn list_goal_events(&self, season_id: Option<i32>) -> Result<Vec<GoalEvent>> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT g.id::bigint AS id, g.match_id, g.player_id,
                   g.created_at::timestamptz AS created_at
            FROM goals g
            JOIN matches m ON g.match_id = m.id
            "#,
        );
        if let Some(season_id) = season_id {
            qb.push(" WHERE m.season_id = ").push_bind(season_id);
        }

        let rows = qb.build().fetch_all(&self.pool).await?;
        debug!("Fetched {} goal events", rows.len());
        rows.iter().map(goal_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn list_match_goals(&self, match_id: i32) -> Result<Vec<GoalEvent>> {
        let rows = sqlx::query(
            r#"
            SELECT id::bigint AS id, match_id, player_id,
                   created_at::timestamptz AS created_at
            FROM goals
            WHERE match_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(goal_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn list_players(&self, filter: PlayerFilter) -> Result<Vec<Player>> {
        let mut qb = QueryBuilder::<Postgres>::new(PLAYER_COLUMNS);
        qb.push(" WHERE 1=1");
        if let Some(ref search) = filter.search {
            qb.push(" AND name ILIKE ").push_bind(format!("%{search}%"));
        }
        if let Some(ref position) = filter.position {
            qb.push(" AND position ILIKE ").push_bind(position.clone());
        }
        if let Some(ref nationality) = filter.nationality {
            qb.push(" AND nationality ILIKE ").push_bind(nationality.clone());
        }
        qb.push(" ORDER BY name");
        if let Some(limit) = filter.limit.filter(|l| *l > 0) {
            qb.push(" LIMIT ").push_bind(limit);
        }
        if let Some(offset) = filter.offset.filter(|o| *o > 0) {
            qb.push(" OFFSET ").push_bind(offset);
        }

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(player_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn get_player(&self, player_id: i32) -> Result<Option<Player>> {
        let row = sqlx::query(&format!("{PLAYER_COLUMNS} WHERE id = $1"))
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(player_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn list_player_positions(&self) -> Result<Vec<String>> {
        self.distinct_player_column("position").await
    }

    #[instrument(skip(self))]
    async fn list_player_nationalities(&self) -> Result<Vec<String>> {
        self.distinct_player_column("nationality").await
    }

    #[instrument(skip(self))]
    async fn list_player_season_stats(&self, season_id: i32) -> Result<Vec<PlayerSeasonStats>> {
        let rows = sqlx::query(
            r#"
            SELECT ps.player_id, p.name AS player_name, ps.season_id,
                   ps.team_id, t.name AS team_name,
                   ps.appearances, ps.goals, ps.assists,
                   p.nationality, p.position
            FROM player_stats ps
            JOIN players p ON ps.player_id = p.id
            JOIN teams t ON ps.team_id = t.id
            WHERE ps.season_id = $1
            ORDER BY ps.player_id
            "#,
        )
        .bind(season_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(player_stats_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn list_player_stats(
        &self,
        player_id: i32,
        season_id: Option<i32>,
    ) -> Result<Vec<PlayerSeasonStats>> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT ps.player_id, p.name AS player_name, ps.season_id,
                   ps.team_id, t.name AS team_name,
                   ps.appearances, ps.goals, ps.assists,
                   p.nationality, p.position
            FROM player_stats ps
            JOIN players p ON ps.player_id = p.id
            JOIN teams t ON ps.team_id = t.id
            WHERE ps.player_id = "#,
        );
        qb.push_bind(player_id);
        if let Some(season_id) = season_id {
            qb.push(" AND ps.season_id = ").push_bind(season_id);
        }
        qb.push(" ORDER BY ps.season_id DESC");

        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(player_stats_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn search(&self, term: &str, limit: i64) -> Result<Vec<SearchHit>> {
        let rows = sqlx::query(
            r#"
            (
                SELECT 'player' AS kind, p.id, p.name, p.position AS subtitle
                FROM players p
                WHERE p.name ILIKE $1
                ORDER BY p.name
                LIMIT $2
            )
            UNION ALL
            (
                SELECT 'team' AS kind, t.id, t.name, t.stadium AS subtitle
                FROM teams t
                WHERE t.name ILIKE $1
                ORDER BY t.name
                LIMIT $2
            )
            ORDER BY kind, name
            LIMIT $2
            "#,
        )
        .bind(format!("%{}%", term.trim()))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<SearchHit> {
                let kind = match row.try_get::<String, _>("kind")?.as_str() {
                    "team" => SearchKind::Team,
                    _ => SearchKind::Player,
                };
                Ok(SearchHit {
                    kind,
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    subtitle: row.try_get("subtitle")?,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn recent_activity(&self, since: DateTime<Utc>, limit: i64) -> Result<Vec<ActivityLog>> {
        let rows = sqlx::query(
            r#"
            SELECT
                g.created_at::timestamptz AS date,
                'Goal Import' AS activity,
                s.name AS season,
                'Goals added to ' || ht.name || ' vs ' || at.name AS details,
                COUNT(*)::bigint AS goals_added,
                'Data Import' AS source
            FROM goals g
            JOIN matches m ON g.match_id = m.id
            JOIN seasons s ON m.season_id = s.id
            JOIN teams ht ON m.home_team_id = ht.id
            JOIN teams at ON m.away_team_id = at.id
            WHERE g.created_at >= $1
            GROUP BY g.created_at, s.name, ht.name, at.name
            ORDER BY g.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(since)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<ActivityLog> {
                Ok(ActivityLog {
                    date: row.try_get("date")?,
                    activity: row.try_get("activity")?,
                    season: row.try_get("season")?,
                    details: row.try_get("details")?,
                    goals_added: row.try_get("goals_added")?,
                    source: row.try_get("source")?,
                })
            })
            .collect()
    }
}
