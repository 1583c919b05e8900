//! Command-line surface and terminal output.
//!
//! Supports two output modes: human-readable tables (default) and JSON (--json).

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tabled::{Table, Tabled};

use crate::analytics::{CompletenessReport, SeasonCompleteness, StandingsEntry};
use crate::services::Standings;

#[derive(Parser)]
#[command(name = "premstats")]
#[command(author = "PremStats Team")]
#[command(version)]
#[command(about = "Premier League statistics service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config directory
    #[arg(short, long, default_value = "config")]
    pub config: PathBuf,

    /// Read league data from a JSON dataset instead of PostgreSQL
    #[arg(long, env = "PREMSTATS_FIXTURE")]
    pub fixture: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the league table for a season
    Standings {
        /// Season ID
        #[arg(short, long)]
        season: i32,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the data-completeness report
    Report {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

#[derive(Debug, Clone, Tabled)]
pub struct StandingsRow {
    #[tabled(rename = "Pos")]
    pub position: u32,
    #[tabled(rename = "Team")]
    pub team: String,
    #[tabled(rename = "P")]
    pub played: i32,
    #[tabled(rename = "W")]
    pub won: i32,
    #[tabled(rename = "D")]
    pub drawn: i32,
    #[tabled(rename = "L")]
    pub lost: i32,
    #[tabled(rename = "GF")]
    pub goals_for: i32,
    #[tabled(rename = "GA")]
    pub goals_against: i32,
    #[tabled(rename = "GD")]
    pub goal_difference: i32,
    #[tabled(rename = "Pts")]
    pub points: i32,
}

impl From<&StandingsEntry> for StandingsRow {
    fn from(entry: &StandingsEntry) -> Self {
        Self {
            position: entry.position,
            team: entry.record.team_name.clone(),
            played: entry.record.played,
            won: entry.record.won,
            drawn: entry.record.drawn,
            lost: entry.record.lost,
            goals_for: entry.record.goals_for,
            goals_against: entry.record.goals_against,
            goal_difference: entry.goal_difference,
            points: entry.points,
        }
    }
}

#[derive(Debug, Clone, Tabled)]
pub struct CompletenessRow {
    #[tabled(rename = "Season")]
    pub season: String,
    #[tabled(rename = "Matches")]
    pub matches: String,
    #[tabled(rename = "Scores %")]
    pub match_completeness: String,
    #[tabled(rename = "Goals %")]
    pub goal_completeness: String,
    #[tabled(rename = "Goals")]
    pub goals: usize,
    #[tabled(rename = "Quality")]
    pub quality: String,
}

impl From<&SeasonCompleteness> for CompletenessRow {
    fn from(s: &SeasonCompleteness) -> Self {
        Self {
            season: s.name.clone(),
            matches: format!("{}/{}", s.total_matches, s.expected_matches),
            match_completeness: format!("{:.1}", s.match_completeness),
            goal_completeness: format!("{:.1}", s.goal_completeness),
            goals: s.total_goals,
            quality: format!("{} {}", s.quality_icon, s.quality_level),
        }
    }
}

/// Print a vec of Tabled rows, or the serializable source as JSON.
pub fn print_rows<R: Tabled, S: Serialize + ?Sized>(
    rows: &[R],
    source: &S,
    mode: OutputMode,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Table => {
            if rows.is_empty() {
                println!("(no results)");
            } else {
                println!("{}", Table::new(rows));
            }
        }
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(source)?);
        }
    }
    Ok(())
}

pub fn print_standings(standings: &Standings, mode: OutputMode) -> anyhow::Result<()> {
    if mode == OutputMode::Table {
        println!("{} (season {})", standings.season, standings.season_id);
    }
    let rows: Vec<StandingsRow> = standings.table.entries().iter().map(Into::into).collect();
    print_rows(&rows, standings, mode)
}

pub fn print_report(report: &CompletenessReport, mode: OutputMode) -> anyhow::Result<()> {
    let rows: Vec<CompletenessRow> = report.season_data.iter().map(Into::into).collect();
    print_rows(&rows, report, mode)?;

    if mode == OutputMode::Table {
        let o = &report.overall_stats;
        println!(
            "{} seasons, {} with data; {} matches, {} goals, {} players",
            o.total_seasons, o.seasons_with_data, o.total_matches, o.total_goals, o.total_players
        );
        println!(
            "Average completeness: scores {:.1}%, goals {:.1}%",
            o.avg_match_completeness, o.avg_goal_completeness
        );
    }
    Ok(())
}
