//! Derived analytics over match facts.
//!
//! Everything here is synchronous and free of I/O: callers fetch facts
//! through a [`crate::provider::StatsProvider`] and hand owned snapshots in.

pub mod completeness;
pub mod scorers;
pub mod season_summary;
pub mod standings;
pub mod team_stats;

pub use completeness::{
    best_and_worst, build_report, era_stats, expected_matches, overall_stats,
    season_completeness, CompletenessReport, EraStats, OverallStats, QualityLevel,
    SeasonCompleteness, SeasonFacts,
};
pub use scorers::{rank_top_scorers, TopScorer};
pub use season_summary::{summarize, SeasonSummary, RELEGATION_MATCH_THRESHOLD};
pub use standings::{aggregate, StandingsEntry, StandingsTable, TeamRecord};
pub use team_stats::{team_season_stats, TeamSeasonStats};
