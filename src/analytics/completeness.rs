//! Data-completeness reporting.
//!
//! Measures, per season, how much of the expected match and goal data is
//! actually present, classifies each season, and rolls the results up into
//! overall totals, historical eras and best/worst rankings.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::domain::{ActivityLog, GoalEvent, MatchFact, Season};

/// Seasons returned in each of the best and worst lists
pub const RANKING_SIZE: usize = 5;

/// Matches a season is expected to contain, by starting year.
///
/// 22-team era (1992-1994): 462. 20-team era (1995 onward): 380.
/// Before 1992 there is no league expectation: 0.
pub fn expected_matches(year: i32) -> u32 {
    match year {
        1992..=1994 => 462,
        y if y >= 1995 => 380,
        _ => 0,
    }
}

/// `numerator / denominator * 100`, or 0 for an empty denominator
fn percentage(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64 * 100.0
}

/// Quality label derived from goal completeness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QualityLevel {
    Excellent,
    Good,
    Partial,
    Minimal,
    #[serde(rename = "No Data")]
    NoData,
}

impl QualityLevel {
    /// Classify a goal-completeness percentage. First matching band wins:
    /// >= 95, >= 80, >= 50, > 0, otherwise no data.
    pub fn classify(goal_completeness: f64) -> Self {
        if goal_completeness >= 95.0 {
            QualityLevel::Excellent
        } else if goal_completeness >= 80.0 {
            QualityLevel::Good
        } else if goal_completeness >= 50.0 {
            QualityLevel::Partial
        } else if goal_completeness > 0.0 {
            QualityLevel::Minimal
        } else {
            QualityLevel::NoData
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLevel::Excellent => "Excellent",
            QualityLevel::Good => "Good",
            QualityLevel::Partial => "Partial",
            QualityLevel::Minimal => "Minimal",
            QualityLevel::NoData => "No Data",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            QualityLevel::Excellent => "🌟",
            QualityLevel::Good => "✅",
            QualityLevel::Partial => "🔄",
            QualityLevel::Minimal => "⚠️",
            QualityLevel::NoData => "❌",
        }
    }
}

impl std::fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw facts for one season, as handed over by the provider
#[derive(Debug, Clone)]
pub struct SeasonFacts {
    pub season: Season,
    pub matches: Vec<MatchFact>,
    pub goals: Vec<GoalEvent>,
}

/// Per-season completeness snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonCompleteness {
    pub id: i32,
    pub year: i32,
    pub name: String,
    pub total_matches: usize,
    pub matches_with_scores: usize,
    pub matches_with_goals: usize,
    pub total_goals: usize,
    pub unique_players: usize,
    pub teams_count: usize,
    pub expected_matches: u32,
    pub match_completeness: f64,
    pub goal_completeness: f64,
    pub season_progress: f64,
    pub quality_level: QualityLevel,
    pub quality_icon: &'static str,
    pub season_start: Option<DateTime<Utc>>,
    pub season_end: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl SeasonCompleteness {
    pub fn has_data(&self) -> bool {
        self.total_matches > 0
    }
}

/// Compute the completeness snapshot for one season.
///
/// Only goal events on scored matches of the season count, so
/// `matches_with_goals` never exceeds `matches_with_scores`. Season progress
/// is capped at 100 when a season holds more fixtures than expected.
pub fn season_completeness(facts: &SeasonFacts) -> SeasonCompleteness {
    let season = &facts.season;
    let match_ids: HashSet<i32> = facts.matches.iter().map(|m| m.id).collect();
    let scored_ids: HashSet<i32> = facts
        .matches
        .iter()
        .filter(|m| m.is_scored())
        .map(|m| m.id)
        .collect();
    let goals: Vec<&GoalEvent> = facts
        .goals
        .iter()
        .filter(|g| scored_ids.contains(&g.match_id))
        .collect();

    let total_matches = match_ids.len();
    let matches_with_scores = scored_ids.len();
    let matches_with_goals = goals.iter().map(|g| g.match_id).collect::<HashSet<_>>().len();
    let unique_players = goals
        .iter()
        .filter_map(|g| g.player_id)
        .collect::<HashSet<_>>()
        .len();
    let teams_count = facts
        .matches
        .iter()
        .flat_map(|m| [m.home_team_id, m.away_team_id])
        .collect::<HashSet<_>>()
        .len();

    let expected = expected_matches(season.year);
    let match_completeness = percentage(matches_with_scores, total_matches);
    let goal_completeness = percentage(matches_with_goals, total_matches);
    let season_progress = percentage(total_matches, expected as usize).min(100.0);
    let quality_level = QualityLevel::classify(goal_completeness);

    let season_start = facts.matches.iter().map(|m| m.match_date).min();
    let season_end = facts.matches.iter().map(|m| m.match_date).max();
    let last_updated = goals
        .iter()
        .filter_map(|g| g.created_at)
        .chain(facts.matches.iter().filter_map(|m| m.created_at))
        .chain(season.created_at)
        .max();

    SeasonCompleteness {
        id: season.id,
        year: season.year,
        name: season.name.clone(),
        total_matches,
        matches_with_scores,
        matches_with_goals,
        total_goals: goals.len(),
        unique_players,
        teams_count,
        expected_matches: expected,
        match_completeness,
        goal_completeness,
        season_progress,
        quality_level,
        quality_icon: quality_level.icon(),
        season_start,
        season_end,
        last_updated,
    }
}

/// Completeness totals across every season
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_seasons: usize,
    pub seasons_with_data: usize,
    pub total_matches: usize,
    pub total_goals: usize,
    pub total_players: usize,
    pub excellent_seasons: usize,
    pub good_seasons: usize,
    pub partial_seasons: usize,
    pub minimal_seasons: usize,
    pub no_data_seasons: usize,
    pub avg_match_completeness: f64,
    pub avg_goal_completeness: f64,
}

pub fn overall_stats(seasons: &[SeasonCompleteness]) -> OverallStats {
    let mut stats = OverallStats {
        total_seasons: seasons.len(),
        ..Default::default()
    };
    let mut match_sum = 0.0;
    let mut goal_sum = 0.0;

    for season in seasons {
        stats.total_matches += season.total_matches;
        stats.total_goals += season.total_goals;
        stats.total_players += season.unique_players;

        if season.has_data() {
            stats.seasons_with_data += 1;
            match_sum += season.match_completeness;
            goal_sum += season.goal_completeness;
        }

        match season.quality_level {
            QualityLevel::Excellent => stats.excellent_seasons += 1,
            QualityLevel::Good => stats.good_seasons += 1,
            QualityLevel::Partial => stats.partial_seasons += 1,
            QualityLevel::Minimal => stats.minimal_seasons += 1,
            QualityLevel::NoData => stats.no_data_seasons += 1,
        }
    }

    if stats.seasons_with_data > 0 {
        stats.avg_match_completeness = match_sum / stats.seasons_with_data as f64;
        stats.avg_goal_completeness = goal_sum / stats.seasons_with_data as f64;
    }

    stats
}

/// A fixed historical year range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Era {
    pub name: &'static str,
    pub start_year: i32,
    pub end_year: i32,
}

impl Era {
    pub fn contains(&self, year: i32) -> bool {
        (self.start_year..=self.end_year).contains(&year)
    }
}

/// Non-overlapping, inclusive. Seasons outside every range belong to no era.
pub const ERAS: [Era; 4] = [
    Era {
        name: "Early Premier League",
        start_year: 1992,
        end_year: 1999,
    },
    Era {
        name: "Golden Era",
        start_year: 2000,
        end_year: 2009,
    },
    Era {
        name: "Modern Era",
        start_year: 2010,
        end_year: 2019,
    },
    Era {
        name: "Recent Era",
        start_year: 2020,
        end_year: 2025,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EraStats {
    pub name: String,
    pub year_range: String,
    pub seasons_total: usize,
    pub seasons_with_data: usize,
    pub avg_goal_completeness: f64,
    pub total_goals: usize,
    pub total_matches: usize,
}

pub fn era_stats(seasons: &[SeasonCompleteness]) -> Vec<EraStats> {
    ERAS.iter()
        .map(|era| {
            let members: Vec<&SeasonCompleteness> =
                seasons.iter().filter(|s| era.contains(s.year)).collect();
            let with_data: Vec<&&SeasonCompleteness> =
                members.iter().filter(|s| s.has_data()).collect();

            let avg_goal_completeness = if with_data.is_empty() {
                0.0
            } else {
                with_data.iter().map(|s| s.goal_completeness).sum::<f64>() / with_data.len() as f64
            };

            EraStats {
                name: era.name.to_string(),
                year_range: format!("{}-{}", era.start_year, era.end_year),
                seasons_total: members.len(),
                seasons_with_data: with_data.len(),
                avg_goal_completeness,
                total_goals: members.iter().map(|s| s.total_goals).sum(),
                total_matches: members.iter().map(|s| s.total_matches).sum(),
            }
        })
        .collect()
}

/// Top and bottom seasons by goal completeness, among seasons with matches.
///
/// Candidates are first put in (year, id) order so the result does not
/// depend on input order; the sorts are stable, so exact ties keep that order.
pub fn best_and_worst(
    seasons: &[SeasonCompleteness],
) -> (Vec<SeasonCompleteness>, Vec<SeasonCompleteness>) {
    let mut candidates: Vec<SeasonCompleteness> =
        seasons.iter().filter(|s| s.has_data()).cloned().collect();
    candidates.sort_by_key(|s| (s.year, s.id));

    let mut best = candidates.clone();
    best.sort_by(|a, b| b.goal_completeness.total_cmp(&a.goal_completeness));
    best.truncate(RANKING_SIZE);

    let mut worst = candidates;
    worst.sort_by(|a, b| a.goal_completeness.total_cmp(&b.goal_completeness));
    worst.truncate(RANKING_SIZE);

    (best, worst)
}

/// The full completeness report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessReport {
    pub overall_stats: OverallStats,
    pub season_data: Vec<SeasonCompleteness>,
    pub era_stats: Vec<EraStats>,
    pub best_seasons: Vec<SeasonCompleteness>,
    pub worst_seasons: Vec<SeasonCompleteness>,
    pub recent_activity: Vec<ActivityLog>,
    pub generated_at: DateTime<Utc>,
}

/// Assemble the report from per-season facts.
///
/// `recent_activity` is an optional, independently loaded section; callers
/// pass an empty list when it could not be fetched.
pub fn build_report(
    facts: &[SeasonFacts],
    recent_activity: Vec<ActivityLog>,
    generated_at: DateTime<Utc>,
) -> CompletenessReport {
    let mut season_data: Vec<SeasonCompleteness> = facts.iter().map(season_completeness).collect();
    season_data.sort_by_key(|s| (s.year, s.id));

    let overall_stats = overall_stats(&season_data);
    let era_stats = era_stats(&season_data);
    let (best_seasons, worst_seasons) = best_and_worst(&season_data);

    CompletenessReport {
        overall_stats,
        season_data,
        era_stats,
        best_seasons,
        worst_seasons,
        recent_activity,
        generated_at,
    }
}
