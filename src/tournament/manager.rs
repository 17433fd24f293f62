//! Tournament administration manager.

use std::sync::Arc;

use sqlx::{PgPool, Row};
use thiserror::Error;

use crate::bracket::models::{Entrant, TournamentId};

use super::models::{Champion, Tournament, TournamentSettings, TournamentState};

/// Tournament errors
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("Tournament not found: {0}")]
    NotFound(TournamentId),

    #[error("Registration is closed (tournament is {0})")]
    RegistrationClosed(TournamentState),

    #[error("Entrant {user_id} is already registered")]
    AlreadyRegistered { user_id: i64 },

    #[error("Entrant {user_id} is not registered for tournament {tournament_id}")]
    EntrantNotFound {
        tournament_id: TournamentId,
        user_id: i64,
    },

    #[error("Tournament not in correct state: expected {expected}, got {actual}")]
    InvalidState {
        expected: TournamentState,
        actual: TournamentState,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type TournamentResult<T> = Result<T, TournamentError>;

/// Tournament manager
#[derive(Clone)]
pub struct TournamentManager {
    pool: Arc<PgPool>,
}

impl TournamentManager {
    /// Create a new tournament manager
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Create a new tournament in the `Registering` state
    pub async fn create_tournament(
        &self,
        name: &str,
        settings: TournamentSettings,
    ) -> TournamentResult<TournamentId> {
        let settings_json = serde_json::to_value(&settings)?;

        let row = sqlx::query(
            r#"
            INSERT INTO tournaments (name, settings, state)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(settings_json)
        .bind(TournamentState::Registering.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        let id: TournamentId = row.get("id");
        log::info!("Created tournament {id} '{name}'");
        Ok(id)
    }

    /// Get a tournament by id
    pub async fn get_tournament(&self, tournament_id: TournamentId) -> TournamentResult<Tournament> {
        let row = sqlx::query(
            r#"
            SELECT t.id, t.name, t.settings, t.state,
                   t.created_at, t.started_at, t.finished_at,
                   (SELECT COUNT(*) FROM tournament_entrants e
                    WHERE e.tournament_id = t.id) AS entrant_count
            FROM tournaments t
            WHERE t.id = $1
            "#,
        )
        .bind(tournament_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(TournamentError::NotFound(tournament_id))?;

        Self::tournament_from_row(&row)
    }

    /// List tournaments, newest first, optionally filtered by state
    pub async fn list_tournaments(
        &self,
        state_filter: Option<TournamentState>,
    ) -> TournamentResult<Vec<Tournament>> {
        let query = if let Some(state) = state_filter {
            sqlx::query(
                r#"
                SELECT t.id, t.name, t.settings, t.state,
                       t.created_at, t.started_at, t.finished_at,
                       (SELECT COUNT(*) FROM tournament_entrants e
                        WHERE e.tournament_id = t.id) AS entrant_count
                FROM tournaments t
                WHERE t.state = $1
                ORDER BY t.created_at DESC
                "#,
            )
            .bind(state.as_str())
        } else {
            sqlx::query(
                r#"
                SELECT t.id, t.name, t.settings, t.state,
                       t.created_at, t.started_at, t.finished_at,
                       (SELECT COUNT(*) FROM tournament_entrants e
                        WHERE e.tournament_id = t.id) AS entrant_count
                FROM tournaments t
                ORDER BY t.created_at DESC
                "#,
            )
        };

        let rows = query.fetch_all(self.pool.as_ref()).await?;
        rows.iter().map(Self::tournament_from_row).collect()
    }

    /// Close registration and mark the tournament running
    pub async fn start_tournament(&self, tournament_id: TournamentId) -> TournamentResult<()> {
        let tournament = self.get_tournament(tournament_id).await?;
        if tournament.state != TournamentState::Registering {
            return Err(TournamentError::InvalidState {
                expected: TournamentState::Registering,
                actual: tournament.state,
            });
        }

        sqlx::query("UPDATE tournaments SET state = $1, started_at = NOW() WHERE id = $2")
            .bind(TournamentState::Running.as_str())
            .bind(tournament_id)
            .execute(self.pool.as_ref())
            .await?;

        log::info!("Tournament {tournament_id} started");
        Ok(())
    }

    /// Delete a tournament and its entrant registrations
    ///
    /// The bracket is cleared separately through the bracket manager.
    pub async fn delete_tournament(&self, tournament_id: TournamentId) -> TournamentResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM tournament_entrants WHERE tournament_id = $1")
            .bind(tournament_id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM tournaments WHERE id = $1")
            .bind(tournament_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TournamentError::NotFound(tournament_id));
        }

        tx.commit().await?;
        log::info!("Deleted tournament {tournament_id}");
        Ok(())
    }

    /// Register an entrant while the tournament is accepting registrations
    pub async fn register_entrant(
        &self,
        tournament_id: TournamentId,
        entrant: &Entrant,
    ) -> TournamentResult<()> {
        let tournament = self.get_tournament(tournament_id).await?;
        if tournament.state != TournamentState::Registering {
            return Err(TournamentError::RegistrationClosed(tournament.state));
        }

        let existing = sqlx::query(
            "SELECT user_id FROM tournament_entrants WHERE tournament_id = $1 AND user_id = $2",
        )
        .bind(tournament_id)
        .bind(entrant.user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        if existing.is_some() {
            return Err(TournamentError::AlreadyRegistered {
                user_id: entrant.user_id,
            });
        }

        sqlx::query(
            r#"
            INSERT INTO tournament_entrants (tournament_id, user_id, username, casino_username)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(tournament_id)
        .bind(entrant.user_id)
        .bind(&entrant.username)
        .bind(&entrant.casino_username)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    /// Remove an entrant while the tournament is accepting registrations
    pub async fn unregister_entrant(
        &self,
        tournament_id: TournamentId,
        user_id: i64,
    ) -> TournamentResult<()> {
        let tournament = self.get_tournament(tournament_id).await?;
        if tournament.state != TournamentState::Registering {
            return Err(TournamentError::RegistrationClosed(tournament.state));
        }

        let result = sqlx::query(
            "DELETE FROM tournament_entrants WHERE tournament_id = $1 AND user_id = $2",
        )
        .bind(tournament_id)
        .bind(user_id)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(TournamentError::EntrantNotFound {
                tournament_id,
                user_id,
            });
        }

        Ok(())
    }

    /// Registered entrants in registration order
    pub async fn entrants(&self, tournament_id: TournamentId) -> TournamentResult<Vec<Entrant>> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, username, casino_username
            FROM tournament_entrants
            WHERE tournament_id = $1
            ORDER BY registered_at
            "#,
        )
        .bind(tournament_id)
        .fetch_all(self.pool.as_ref())
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

    /// Write the champion record for a finished bracket and mark the
    /// tournament finished
    ///
    /// The bracket engine reports the champion when the final match
    /// completes; this is the corresponding durable record, written by the
    /// caller rather than the engine itself.
    pub async fn record_champion(
        &self,
        tournament_id: TournamentId,
        champion: &Entrant,
    ) -> TournamentResult<()> {
        let tournament = self.get_tournament(tournament_id).await?;
        if tournament.state != TournamentState::Running {
            return Err(TournamentError::InvalidState {
                expected: TournamentState::Running,
                actual: tournament.state,
            });
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO tournament_winners (tournament_id, user_id, username, casino_username)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(tournament_id)
        .bind(champion.user_id)
        .bind(&champion.username)
        .bind(&champion.casino_username)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE tournaments SET state = $1, finished_at = NOW() WHERE id = $2")
            .bind(TournamentState::Finished.as_str())
            .bind(tournament_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        log::info!(
            "Tournament {} won by {} ({})",
            tournament_id,
            champion.username,
            champion.user_id
        );
        Ok(())
    }

    /// Past champions, most recent first
    pub async fn champions(&self, limit: i64) -> TournamentResult<Vec<Champion>> {
        let rows = sqlx::query(
            r#"
            SELECT tournament_id, user_id, username, casino_username, recorded_at
            FROM tournament_winners
            ORDER BY recorded_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Champion {
                tournament_id: row.get("tournament_id"),
                user_id: row.get("user_id"),
                username: row.get("username"),
                casino_username: row.get("casino_username"),
                recorded_at: row
                    .get::<chrono::NaiveDateTime, _>("recorded_at")
                    .and_utc(),
            })
            .collect())
    }

    fn tournament_from_row(row: &sqlx::postgres::PgRow) -> TournamentResult<Tournament> {
        let settings: TournamentSettings = serde_json::from_value(row.get("settings"))?;
        let state: String = row.get("state");
        let entrant_count: i64 = row.get("entrant_count");

        Ok(Tournament {
            id: row.get("id"),
            name: row.get("name"),
            settings,
            state: TournamentState::parse(&state),
            entrant_count: entrant_count as usize,
            created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
            started_at: row
                .get::<Option<chrono::NaiveDateTime>, _>("started_at")
                .map(|dt| dt.and_utc()),
            finished_at: row
                .get::<Option<chrono::NaiveDateTime>, _>("finished_at")
                .map(|dt| dt.and_utc()),
        })
    }
}
