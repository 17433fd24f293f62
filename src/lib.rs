//! # R2K2 Tournaments
//!
//! Backend core for the R2K2 gambling-referral community site: the
//! single-elimination tournament bracket engine plus the admin-panel record
//! keeping (tournaments, entrant registration, champions, reward claims)
//! that surrounds it.
//!
//! The bracket engine builds a balanced bracket from 2-20 entrants, resolves
//! automatic byes, records scores and winners, and propagates winners
//! round-to-round until a champion is determined. All bracket state lives in
//! an arena of matches keyed by match id; liveness (whether a slot can still
//! be filled by a surviving entrant) is recomputed from the persisted match
//! set on every operation rather than cached.
//!
//! ## Core Modules
//!
//! - [`bracket`]: Bracket generation, bye resolution, winner propagation
//! - [`tournament`]: Tournament records, entrant registration, champions
//! - [`claims`]: Loss-back and wager-reward claim management
//! - [`db`]: Connection pooling and the repository collaborators
//!
//! ## Example
//!
//! ```
//! use r2k2_tournaments::bracket::Bracket;
//!
//! // Three entrants round up to a four-slot bracket: three matches, one of
//! // which is a first-round bye that resolves during generation.
//! let bracket = Bracket::generate(1, &[101, 102, 103]).expect("valid entrant count");
//! assert_eq!(bracket.matches().count(), 3);
//! ```

/// Bracket generation, score entry, and winner propagation.
pub mod bracket;
pub use bracket::{
    Bracket, BracketError, BracketManager, BracketMatch, BracketResult, Entrant, MatchStatus, Slot,
    MAX_ENTRANTS, MIN_ENTRANTS,
};

/// Loss-back and wager-reward claim management.
pub mod claims;
pub use claims::{Claim, ClaimError, ClaimKind, ClaimStatus, ClaimsManager};

/// Database connection pooling and repository collaborators.
pub mod db;
pub use db::{Database, DatabaseConfig};

/// Tournament records, entrant registration, and champion history.
pub mod tournament;
pub use tournament::{Tournament, TournamentError, TournamentManager, TournamentState};
