//! Claim data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claim ID type
pub type ClaimId = i64;

/// Which bonus program a claim is made against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    /// Partial refund of net losses over the qualifying period
    LossBack,
    /// Reward tier reached through wagered volume
    WagerReward,
}

impl ClaimKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ClaimKind::LossBack => "loss_back",
            ClaimKind::WagerReward => "wager_reward",
        }
    }

    /// Parse a persisted kind string; unknown values fall back to
    /// `LossBack`.
    pub fn parse(s: &str) -> Self {
        match s {
            "wager_reward" => ClaimKind::WagerReward,
            _ => ClaimKind::LossBack,
        }
    }
}

impl std::fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Claim review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Denied,
}

impl ClaimStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Denied => "denied",
        }
    }

    /// Parse a persisted status string; unknown values fall back to
    /// `Pending`.
    pub fn parse(s: &str) -> Self {
        match s {
            "approved" => ClaimStatus::Approved,
            "denied" => ClaimStatus::Denied,
            _ => ClaimStatus::Pending,
        }
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A submitted claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub user_id: i64,
    pub kind: ClaimKind,
    /// Claimed amount in cents
    pub amount: i64,
    pub status: ClaimStatus,
    /// Reviewer note, set when the claim is approved or denied
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_string_round_trip() {
        for kind in [ClaimKind::LossBack, ClaimKind::WagerReward] {
            assert_eq!(ClaimKind::parse(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in [
            ClaimStatus::Pending,
            ClaimStatus::Approved,
            ClaimStatus::Denied,
        ] {
            assert_eq!(ClaimStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn test_unknown_strings_fall_back() {
        assert_eq!(ClaimKind::parse("rakeback"), ClaimKind::LossBack);
        assert_eq!(ClaimStatus::parse("escalated"), ClaimStatus::Pending);
    }
}
