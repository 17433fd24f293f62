//! Single-elimination bracket engine.
//!
//! This module provides the algorithmic core of the site:
//! - Balanced bracket generation from a shuffled entrant list
//! - Canonical seed placement (top seeds meet only in later rounds)
//! - Automatic bye resolution, recursively through the tree
//! - Score entry and explicit winner assignment
//! - Winner propagation until a champion is determined
//!
//! Bracket state is an arena of matches keyed by match id. Whether a slot
//! can still be filled ("liveness") is always derived from the arena as
//! loaded from the match store; no caches survive across operations.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use r2k2_tournaments::bracket::BracketManager;
//! use r2k2_tournaments::db::{Database, DatabaseConfig, PgEntrantSource, PgMatchStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     let manager = BracketManager::new(
//!         Arc::new(PgMatchStore::new(db.pool().clone())),
//!         Arc::new(PgEntrantSource::new(db.pool().clone())),
//!     );
//!
//!     manager.generate(42).await?;
//!     let matches = manager.bracket(42).await?;
//!     println!("bracket has {} matches", matches.len());
//!
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod errors;
pub mod manager;
pub mod models;
pub mod seeding;

pub use engine::{Bracket, MAX_ENTRANTS, MIN_ENTRANTS};
pub use errors::{BracketError, BracketResult};
pub use manager::BracketManager;
pub use models::{BracketMatch, Entrant, EntrantId, MatchId, MatchStatus, Slot, TournamentId};
