use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derived status of a fixture. Never stored; see [`MatchFact::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Completed,
    Pending,
    Scheduled,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Completed => "completed",
            MatchStatus::Pending => "pending",
            MatchStatus::Scheduled => "scheduled",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a scored match from the home side's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    HomeWin,
    Draw,
    AwayWin,
}

/// One completed or scheduled fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFact {
    pub id: i32,
    pub season_id: i32,
    pub home_team_id: i32,
    pub away_team_id: i32,
    #[serde(default)]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_time_home: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_time_away: Option<i32>,
    #[serde(rename = "date")]
    pub match_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referee: Option<String>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
}

impl MatchFact {
    /// Both final scores, if the match is scored
    pub fn score(&self) -> Option<(i32, i32)> {
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }

    /// A match is scored iff both scores are present
    pub fn is_scored(&self) -> bool {
        self.score().is_some()
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.score().map(|(home, away)| match home.cmp(&away) {
            std::cmp::Ordering::Greater => MatchOutcome::HomeWin,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
            std::cmp::Ordering::Less => MatchOutcome::AwayWin,
        })
    }

    /// Total goals for a scored match
    pub fn total_goals(&self) -> Option<i32> {
        self.score().map(|(home, away)| home + away)
    }

    pub fn involves(&self, team_id: i32) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Status relative to `now`: scored ⇒ completed, otherwise pending if the
    /// kick-off has passed and scheduled if it has not.
    pub fn status(&self, now: DateTime<Utc>) -> MatchStatus {
        if self.is_scored() {
            MatchStatus::Completed
        } else if self.match_date < now {
            MatchStatus::Pending
        } else {
            MatchStatus::Scheduled
        }
    }
}

/// A single recorded goal, used only for data-completeness reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalEvent {
    pub id: i64,
    pub match_id: i32,
    pub player_id: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
}
