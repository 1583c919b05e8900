//! League table aggregation.
//!
//! Converts one season's match facts into a ranked table. Only scored
//! matches contribute; every participating team still gets a row, so a
//! club whose fixtures are all unplayed shows up with a zeroed record.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{MatchFact, MatchOutcome, Team};

/// Points awarded for a win. A draw is worth one.
pub const POINTS_FOR_WIN: i32 = 3;

/// Accumulated statistics for one team in one season
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub team_id: i32,
    #[serde(rename = "team")]
    pub team_name: String,
    pub played: i32,
    pub won: i32,
    pub drawn: i32,
    pub lost: i32,
    pub goals_for: i32,
    pub goals_against: i32,
}

impl TeamRecord {
    pub fn new(team_id: i32, team_name: impl Into<String>) -> Self {
        Self {
            team_id,
            team_name: team_name.into(),
            ..Default::default()
        }
    }

    /// Apply one match to this team's record.
    ///
    /// Returns `false` (and leaves the record untouched) when the match is
    /// unscored or the team did not take part.
    pub fn record(&mut self, fixture: &MatchFact) -> bool {
        let (Some((home, away)), Some(outcome)) = (fixture.score(), fixture.outcome()) else {
            return false;
        };

        let (scored, conceded, won, lost) = if fixture.home_team_id == self.team_id {
            (
                home,
                away,
                outcome == MatchOutcome::HomeWin,
                outcome == MatchOutcome::AwayWin,
            )
        } else if fixture.away_team_id == self.team_id {
            (
                away,
                home,
                outcome == MatchOutcome::AwayWin,
                outcome == MatchOutcome::HomeWin,
            )
        } else {
            return false;
        };

        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        if won {
            self.won += 1;
        } else if lost {
            self.lost += 1;
        } else {
            self.drawn += 1;
        }
        true
    }

    pub fn goal_difference(&self) -> i32 {
        self.goals_for - self.goals_against
    }

    pub fn points(&self) -> i32 {
        self.won * POINTS_FOR_WIN + self.drawn
    }

    /// Wins as a percentage of matches played, 0 when nothing was played
    pub fn win_percentage(&self) -> f64 {
        if self.played == 0 {
            return 0.0;
        }
        f64::from(self.won) / f64::from(self.played) * 100.0
    }

    pub fn points_per_game(&self) -> f64 {
        if self.played == 0 {
            return 0.0;
        }
        f64::from(self.points()) / f64::from(self.played)
    }
}

/// Table ordering: points, goal difference, goals scored (all descending),
/// then team name ascending. Team id is the last resort so two clubs sharing
/// a name still order deterministically.
pub fn compare_records(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.points()
        .cmp(&a.points())
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.team_name.cmp(&b.team_name))
        .then_with(|| a.team_id.cmp(&b.team_id))
}

/// One row of the league table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsEntry {
    pub position: u32,
    #[serde(flatten)]
    pub record: TeamRecord,
    pub goal_difference: i32,
    pub points: i32,
}

/// Ranked league table. Positions run 1..=N with no gaps or shared places.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StandingsTable {
    entries: Vec<StandingsEntry>,
}

impl StandingsTable {
    pub fn entries(&self) -> &[StandingsEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The team in first place
    pub fn leader(&self) -> Option<&StandingsEntry> {
        self.entries.first()
    }

    /// The last `n` teams, worst first
    pub fn bottom(&self, n: usize) -> Vec<&StandingsEntry> {
        self.entries.iter().rev().take(n).collect()
    }
}

/// Build the league table for one season.
///
/// `teams` seeds a zeroed record for every club known to be in the season;
/// any further club that appears in `matches` is added using the name carried
/// on the match fact. Input order does not affect the result.
pub fn aggregate(teams: &[Team], matches: &[MatchFact]) -> StandingsTable {
    let mut records: BTreeMap<i32, TeamRecord> = teams
        .iter()
        .map(|t| (t.id, TeamRecord::new(t.id, t.name.clone())))
        .collect();

    for fixture in matches {
        records
            .entry(fixture.home_team_id)
            .or_insert_with(|| TeamRecord::new(fixture.home_team_id, fixture.home_team.clone()));
        records
            .entry(fixture.away_team_id)
            .or_insert_with(|| TeamRecord::new(fixture.away_team_id, fixture.away_team.clone()));

        if !fixture.is_scored() {
            continue;
        }
        if let Some(home) = records.get_mut(&fixture.home_team_id) {
            home.record(fixture);
        }
        if fixture.away_team_id != fixture.home_team_id {
            if let Some(away) = records.get_mut(&fixture.away_team_id) {
                away.record(fixture);
            }
        }
    }

    let mut ranked: Vec<TeamRecord> = records.into_values().collect();
    ranked.sort_by(compare_records);

    let entries = ranked
        .into_iter()
        .zip(1u32..)
        .map(|(record, position)| StandingsEntry {
            position,
            goal_difference: record.goal_difference(),
            points: record.points(),
            record,
        })
        .collect();

    StandingsTable { entries }
}
