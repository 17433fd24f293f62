//! Loss-back and wager-reward claim management.
//!
//! Members submit claims against the site's bonus programs; admins review
//! them from the panel. Plain record keeping, no payout logic here.

pub mod manager;
pub mod models;

pub use manager::{ClaimError, ClaimResult, ClaimsManager};
pub use models::{Claim, ClaimId, ClaimKind, ClaimStatus};
