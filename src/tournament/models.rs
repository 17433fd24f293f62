//! Tournament administration data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bracket::models::TournamentId;

/// Tournament state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentState {
    /// Accepting entrant registrations
    Registering,
    /// Bracket play in progress
    Running,
    /// Champion recorded
    Finished,
}

impl TournamentState {
    pub fn as_str(self) -> &'static str {
        match self {
            TournamentState::Registering => "registering",
            TournamentState::Running => "running",
            TournamentState::Finished => "finished",
        }
    }

    /// Parse a persisted state string; unknown values fall back to
    /// `Registering`.
    pub fn parse(s: &str) -> Self {
        match s {
            "running" => TournamentState::Running,
            "finished" => TournamentState::Finished,
            _ => TournamentState::Registering,
        }
    }
}

impl std::fmt::Display for TournamentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Free-form tournament presentation settings, stored as a JSON column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSettings {
    /// Game the bracket is played on (e.g. "Blackjack")
    pub game: Option<String>,
    /// Prize description shown on the tournament page
    pub prize: Option<String>,
}

/// Tournament record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub settings: TournamentSettings,
    pub state: TournamentState,
    /// Registered entrant count
    pub entrant_count: usize,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// A recorded tournament champion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Champion {
    pub tournament_id: TournamentId,
    pub user_id: i64,
    pub username: String,
    pub casino_username: String,
    pub recorded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_string_round_trip() {
        for state in [
            TournamentState::Registering,
            TournamentState::Running,
            TournamentState::Finished,
        ] {
            assert_eq!(TournamentState::parse(state.as_str()), state);
        }
    }

    #[test]
    fn test_state_parse_unknown_defaults_to_registering() {
        assert_eq!(
            TournamentState::parse("paused"),
            TournamentState::Registering
        );
    }

    #[test]
    fn test_settings_default_is_empty() {
        let settings = TournamentSettings::default();
        assert_eq!(settings.game, None);
        assert_eq!(settings.prize, None);
    }
}
