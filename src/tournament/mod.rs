//! Tournament administration.
//!
//! The records behind the admin panel: tournament rows, the entrant
//! registration side table the bracket engine seeds from, and the champion
//! history written when a final completes.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use r2k2_tournaments::db::{Database, DatabaseConfig};
//! use r2k2_tournaments::tournament::{TournamentManager, TournamentSettings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     let manager = TournamentManager::new(Arc::new(db.pool().clone()));
//!
//!     let id = manager
//!         .create_tournament("Friday Blackjack Bracket", TournamentSettings::default())
//!         .await?;
//!     println!("Created tournament: {id}");
//!
//!     Ok(())
//! }
//! ```

pub mod manager;
pub mod models;

pub use manager::{TournamentError, TournamentManager, TournamentResult};
pub use models::{Champion, Tournament, TournamentSettings, TournamentState};
