//! Claims manager for submitting and reviewing bonus-program claims.

use std::sync::Arc;

use sqlx::{PgPool, Row};
use thiserror::Error;

use super::models::{Claim, ClaimId, ClaimKind, ClaimStatus};

/// Claim errors
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    NotFound(ClaimId),

    #[error("Invalid claim amount: {0}")]
    InvalidAmount(i64),

    #[error("Claim {id} was already reviewed ({status})")]
    AlreadyReviewed { id: ClaimId, status: ClaimStatus },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type ClaimResult<T> = Result<T, ClaimError>;

/// Claims manager
#[derive(Clone)]
pub struct ClaimsManager {
    pool: Arc<PgPool>,
}

impl ClaimsManager {
    /// Create a new claims manager
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Submit a claim; amounts are in cents and must be positive
    pub async fn submit_claim(
        &self,
        user_id: i64,
        kind: ClaimKind,
        amount: i64,
    ) -> ClaimResult<ClaimId> {
        if amount <= 0 {
            return Err(ClaimError::InvalidAmount(amount));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO reward_claims (user_id, kind, amount, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(amount)
        .bind(ClaimStatus::Pending.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        let id: ClaimId = row.get("id");
        log::info!("User {user_id} submitted {kind} claim {id} for {amount} cents");
        Ok(id)
    }

    /// Get a claim by id
    pub async fn get_claim(&self, claim_id: ClaimId) -> ClaimResult<Claim> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, kind, amount, status, note, created_at, reviewed_at
            FROM reward_claims
            WHERE id = $1
            "#,
        )
        .bind(claim_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(ClaimError::NotFound(claim_id))?;

        Ok(Self::claim_from_row(&row))
    }

    /// List claims, newest first, optionally filtered by status
    pub async fn list_claims(&self, status_filter: Option<ClaimStatus>) -> ClaimResult<Vec<Claim>> {
        let query = if let Some(status) = status_filter {
            sqlx::query(
                r#"
                SELECT id, user_id, kind, amount, status, note, created_at, reviewed_at
                FROM reward_claims
                WHERE status = $1
                ORDER BY created_at DESC
                "#,
            )
            .bind(status.as_str())
        } else {
            sqlx::query(
                r#"
                SELECT id, user_id, kind, amount, status, note, created_at, reviewed_at
                FROM reward_claims
                ORDER BY created_at DESC
                "#,
            )
        };

        let rows = query.fetch_all(self.pool.as_ref()).await?;
        Ok(rows.iter().map(Self::claim_from_row).collect())
    }

    /// Claims submitted by one user, newest first
    pub async fn claims_for_user(&self, user_id: i64) -> ClaimResult<Vec<Claim>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, kind, amount, status, note, created_at, reviewed_at
            FROM reward_claims
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.iter().map(Self::claim_from_row).collect())
    }

    /// Approve or deny a pending claim
    pub async fn review_claim(
        &self,
        claim_id: ClaimId,
        approve: bool,
        note: Option<&str>,
    ) -> ClaimResult<()> {
        let claim = self.get_claim(claim_id).await?;
        if claim.status != ClaimStatus::Pending {
            return Err(ClaimError::AlreadyReviewed {
                id: claim_id,
                status: claim.status,
            });
        }

        let status = if approve {
            ClaimStatus::Approved
        } else {
            ClaimStatus::Denied
        };

        sqlx::query(
            "UPDATE reward_claims SET status = $1, note = $2, reviewed_at = NOW() WHERE id = $3",
        )
        .bind(status.as_str())
        .bind(note)
        .bind(claim_id)
        .execute(self.pool.as_ref())
        .await?;

        log::info!("Claim {claim_id} {status}");
        Ok(())
    }

    fn claim_from_row(row: &sqlx::postgres::PgRow) -> Claim {
        let kind: String = row.get("kind");
        let status: String = row.get("status");

        Claim {
            id: row.get("id"),
            user_id: row.get("user_id"),
            kind: ClaimKind::parse(&kind),
            amount: row.get("amount"),
            status: ClaimStatus::parse(&status),
            note: row.get("note"),
            created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
            reviewed_at: row
                .get::<Option<chrono::NaiveDateTime>, _>("reviewed_at")
                .map(|dt| dt.and_utc()),
        }
    }
}
