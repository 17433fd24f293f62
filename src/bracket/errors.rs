//! Bracket error types.

use thiserror::Error;

use super::models::{EntrantId, MatchId, TournamentId};

/// Bracket errors
#[derive(Debug, Error)]
pub enum BracketError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Fewer than two entrants registered
    #[error("Need at least {min} entrants to generate a bracket, got {count}")]
    NotEnoughEntrants { count: usize, min: usize },

    /// More entrants than the bracket supports
    #[error("Bracket supports at most {max} entrants, got {count}")]
    TooManyEntrants { count: usize, max: usize },

    /// The same entrant appears twice in the seed list
    #[error("Duplicate entrant {0} in seed list")]
    DuplicateEntrant(EntrantId),

    /// Match id not present in the tournament's bracket
    #[error("Match not found: {0}")]
    MatchNotFound(MatchId),

    /// Winner id does not occupy either slot of the match
    #[error("Entrant {winner} is not in either slot of match {match_id}")]
    WinnerNotInMatch { match_id: MatchId, winner: EntrantId },

    /// The match already has a different winner; completed is terminal
    #[error("Match {0} is already completed")]
    MatchAlreadyCompleted(MatchId),

    /// The persisted match tree violates a structural invariant; the
    /// affected operation is aborted rather than guessed through
    #[error("Bracket for tournament {tournament_id} is inconsistent: {reason}")]
    CorruptBracket {
        tournament_id: TournamentId,
        reason: String,
    },
}

/// Result type for bracket operations
pub type BracketResult<T> = Result<T, BracketError>;
