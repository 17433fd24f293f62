//! Bracket data models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tournament ID type
pub type TournamentId = i64;

/// Entrant (user) ID type
pub type EntrantId = i64;

/// Match ID type
pub type MatchId = Uuid;

/// A registered tournament entrant.
///
/// Entrants are owned by the registration side table; the bracket engine
/// only reads them for seeding input and display-handle lookup. Identity is
/// never edited once a bracket has been generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrant {
    pub user_id: EntrantId,
    /// Site handle.
    pub username: String,
    /// Handle on the referred casino.
    pub casino_username: String,
}

/// Match status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// No scores entered yet
    Pending,
    /// Scores entered, winner not yet assigned
    Live,
    /// Winner assigned; terminal
    Completed,
}

impl MatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Live => "live",
            MatchStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side of a match an entrant occupies, and which slot of the next
/// match a winner advances into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    A,
    B,
}

impl Slot {
    /// The opposing slot of the same match.
    pub fn other(self) -> Self {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::A => "a",
            Slot::B => "b",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single match in a tournament bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// Zero-based round number; round 0 is the first round.
    pub round: u32,
    /// Zero-based index within the round.
    pub position: u32,
    pub slot_a: Option<EntrantId>,
    pub slot_b: Option<EntrantId>,
    pub winner: Option<EntrantId>,
    pub score_a: i32,
    pub score_b: i32,
    pub status: MatchStatus,
    /// Match the winner advances into; `None` for the final.
    pub next_match: Option<MatchId>,
    /// Slot of `next_match` the winner occupies.
    pub next_slot: Option<Slot>,
}

impl BracketMatch {
    pub fn slot(&self, slot: Slot) -> Option<EntrantId> {
        match slot {
            Slot::A => self.slot_a,
            Slot::B => self.slot_b,
        }
    }

    pub fn set_slot(&mut self, slot: Slot, entrant: EntrantId) {
        match slot {
            Slot::A => self.slot_a = Some(entrant),
            Slot::B => self.slot_b = Some(entrant),
        }
    }

    /// Whether this is the bracket's final match.
    pub fn is_final(&self) -> bool {
        self.next_match.is_none()
    }

    /// Whether `entrant` occupies either slot.
    pub fn contains(&self, entrant: EntrantId) -> bool {
        self.slot_a == Some(entrant) || self.slot_b == Some(entrant)
    }

    /// The single populated slot's entrant, if exactly one side is filled.
    pub fn lone_entrant(&self) -> Option<EntrantId> {
        match (self.slot_a, self.slot_b) {
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match() -> BracketMatch {
        BracketMatch {
            id: Uuid::new_v4(),
            tournament_id: 1,
            round: 0,
            position: 0,
            slot_a: Some(10),
            slot_b: None,
            winner: None,
            score_a: 0,
            score_b: 0,
            status: MatchStatus::Pending,
            next_match: Some(Uuid::new_v4()),
            next_slot: Some(Slot::A),
        }
    }

    #[test]
    fn test_slot_accessors() {
        let mut m = sample_match();
        assert_eq!(m.slot(Slot::A), Some(10));
        assert_eq!(m.slot(Slot::B), None);

        m.set_slot(Slot::B, 20);
        assert_eq!(m.slot(Slot::B), Some(20));
        assert!(m.contains(10));
        assert!(m.contains(20));
        assert!(!m.contains(30));
    }

    #[test]
    fn test_lone_entrant() {
        let mut m = sample_match();
        assert_eq!(m.lone_entrant(), Some(10));

        m.set_slot(Slot::B, 20);
        assert_eq!(m.lone_entrant(), None);

        m.slot_a = None;
        assert_eq!(m.lone_entrant(), Some(20));

        m.slot_b = None;
        assert_eq!(m.lone_entrant(), None);
    }

    #[test]
    fn test_slot_other() {
        assert_eq!(Slot::A.other(), Slot::B);
        assert_eq!(Slot::B.other(), Slot::A);
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(MatchStatus::Pending.as_str(), "pending");
        assert_eq!(MatchStatus::Live.as_str(), "live");
        assert_eq!(MatchStatus::Completed.as_str(), "completed");
        assert_eq!(Slot::A.as_str(), "a");
        assert_eq!(Slot::B.as_str(), "b");
    }

    #[test]
    fn test_is_final() {
        let mut m = sample_match();
        assert!(!m.is_final());

        m.next_match = None;
        m.next_slot = None;
        assert!(m.is_final());
    }
}
