//! Repository trait definitions for the bracket engine's collaborators.
//!
//! The engine never talks to PostgreSQL directly; it goes through these
//! traits, which enables in-memory doubles in tests and keeps the match
//! tree's consistency rules independent of the storage backend.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::bracket::errors::BracketResult;
use crate::bracket::models::{BracketMatch, Entrant, MatchStatus, Slot, TournamentId};

/// Durable store for bracket match records.
///
/// `replace_bracket` and `update_matches` must apply their whole batch as a
/// unit: either every row commits or none does. A generation or propagation
/// cascade that fails mid-write would otherwise leave a half-advanced tree.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Delete any existing bracket for the tournament and insert `matches`
    /// as the new one, atomically.
    async fn replace_bracket(
        &self,
        tournament_id: TournamentId,
        matches: &[BracketMatch],
    ) -> BracketResult<()>;

    /// Update existing match rows by id, atomically.
    ///
    /// Forward links are fixed at generation time and are not part of the
    /// update.
    async fn update_matches(&self, matches: &[BracketMatch]) -> BracketResult<()>;

    /// Delete all match rows for a tournament.
    async fn delete_bracket(&self, tournament_id: TournamentId) -> BracketResult<()>;

    /// Fetch all match rows for a tournament, ordered by round then
    /// position.
    async fn fetch_bracket(&self, tournament_id: TournamentId)
        -> BracketResult<Vec<BracketMatch>>;
}

/// Read-only source of a tournament's registered entrants.
///
/// Registration itself is owned by the tournament manager; the engine only
/// consumes the list for seeding and display-handle lookup.
#[async_trait]
pub trait EntrantSource: Send + Sync {
    async fn entrants(&self, tournament_id: TournamentId) -> BracketResult<Vec<Entrant>>;
}

/// Default PostgreSQL implementation of `MatchStore`
pub struct PgMatchStore {
    pool: PgPool,
}

impl PgMatchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn match_from_row(row: &PgRow) -> BracketMatch {
    let status: String = row.get("status");
    let status = match status.as_str() {
        "live" => MatchStatus::Live,
        "completed" => MatchStatus::Completed,
        _ => MatchStatus::Pending,
    };
    let next_slot = row
        .get::<Option<String>, _>("next_slot")
        .map(|s| if s == "b" { Slot::B } else { Slot::A });

    BracketMatch {
        id: row.get("id"),
        tournament_id: row.get("tournament_id"),
        round: row.get::<i32, _>("round") as u32,
        position: row.get::<i32, _>("match_index") as u32,
        slot_a: row.get("slot_a"),
        slot_b: row.get("slot_b"),
        winner: row.get("winner"),
        score_a: row.get("score_a"),
        score_b: row.get("score_b"),
        status,
        next_match: row.get("next_match"),
        next_slot,
    }
}

#[async_trait]
impl MatchStore for PgMatchStore {
    async fn replace_bracket(
        &self,
        tournament_id: TournamentId,
        matches: &[BracketMatch],
    ) -> BracketResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM tournament_matches WHERE tournament_id = $1")
            .bind(tournament_id)
            .execute(&mut *tx)
            .await?;

        for m in matches {
            sqlx::query(
                r#"
                INSERT INTO tournament_matches
                    (id, tournament_id, round, match_index, slot_a, slot_b,
                     winner, score_a, score_b, status, next_match, next_slot)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                "#,
            )
            .bind(m.id)
            .bind(m.tournament_id)
            .bind(m.round as i32)
            .bind(m.position as i32)
            .bind(m.slot_a)
            .bind(m.slot_b)
            .bind(m.winner)
            .bind(m.score_a)
            .bind(m.score_b)
            .bind(m.status.as_str())
            .bind(m.next_match)
            .bind(m.next_slot.map(Slot::as_str))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn update_matches(&self, matches: &[BracketMatch]) -> BracketResult<()> {
        let mut tx = self.pool.begin().await?;

        for m in matches {
            sqlx::query(
                r#"
                UPDATE tournament_matches
                SET slot_a = $1, slot_b = $2, winner = $3,
                    score_a = $4, score_b = $5, status = $6
                WHERE id = $7
                "#,
            )
            .bind(m.slot_a)
            .bind(m.slot_b)
            .bind(m.winner)
            .bind(m.score_a)
            .bind(m.score_b)
            .bind(m.status.as_str())
            .bind(m.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_bracket(&self, tournament_id: TournamentId) -> BracketResult<()> {
        sqlx::query("DELETE FROM tournament_matches WHERE tournament_id = $1")
            .bind(tournament_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn fetch_bracket(
        &self,
        tournament_id: TournamentId,
    ) -> BracketResult<Vec<BracketMatch>> {
        let rows = sqlx::query(
            r#"
            SELECT id, tournament_id, round, match_index, slot_a, slot_b,
                   winner, score_a, score_b, status, next_match, next_slot
            FROM tournament_matches
            WHERE tournament_id = $1
            ORDER BY round, match_index
            "#,
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(match_from_row).collect())
    }
}

/// Default PostgreSQL implementation of `EntrantSource` over the
/// registration side table
pub struct PgEntrantSource {
    pool: PgPool,
}

impl PgEntrantSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntrantSource for PgEntrantSource {
    async fn entrants(&self, tournament_id: TournamentId) -> BracketResult<Vec<Entrant>> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, username, casino_username
            FROM tournament_entrants
            WHERE tournament_id = $1
            ORDER BY registered_at
            "#,
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Entrant {
                user_id: row.get("user_id"),
                username: row.get("username"),
                casino_username: row.get("casino_username"),
            })
            .collect())
    }
}
