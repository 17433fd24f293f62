//! Bracket manager wiring the engine to its collaborators.

use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::db::repository::{EntrantSource, MatchStore};

use super::engine::Bracket;
use super::errors::{BracketError, BracketResult};
use super::models::{BracketMatch, Entrant, EntrantId, MatchId, TournamentId};

/// Bracket manager
///
/// One instance serves every tournament. Each operation loads the bracket
/// from the match store, mutates it in memory, and persists the touched
/// matches as a single batch; no bracket state is held between calls.
#[derive(Clone)]
pub struct BracketManager {
    matches: Arc<dyn MatchStore>,
    entrants: Arc<dyn EntrantSource>,
}

impl BracketManager {
    /// Create a new bracket manager
    pub fn new(matches: Arc<dyn MatchStore>, entrants: Arc<dyn EntrantSource>) -> Self {
        Self { matches, entrants }
    }

    /// Generate (or regenerate) the bracket for a tournament.
    ///
    /// Entrants come from the registration table; seed numbers are assigned
    /// by uniform shuffle. Any previous bracket for the tournament is
    /// deleted in the same write, so generation replaces rather than
    /// appends. Nothing is persisted if validation or the write fails.
    pub async fn generate(&self, tournament_id: TournamentId) -> BracketResult<()> {
        let entrants = self.entrants.entrants(tournament_id).await?;
        let mut seeds: Vec<EntrantId> = entrants.iter().map(|e| e.user_id).collect();
        seeds.shuffle(&mut rand::rng());

        let bracket = Bracket::generate(tournament_id, &seeds)?;
        let matches = bracket.into_matches();
        self.matches.replace_bracket(tournament_id, &matches).await?;
        log::info!(
            "Generated bracket for tournament {} ({} entrants, {} matches)",
            tournament_id,
            seeds.len(),
            matches.len()
        );
        Ok(())
    }

    /// Record both scores for a match and mark it live.
    ///
    /// Winner assignment stays a separate explicit step; equal or unequal
    /// scores never advance the match by themselves.
    pub async fn submit_score(
        &self,
        tournament_id: TournamentId,
        match_id: MatchId,
        score_a: i32,
        score_b: i32,
    ) -> BracketResult<()> {
        let mut bracket = self.load(tournament_id).await?;
        bracket.apply_scores(match_id, score_a, score_b)?;
        let updated = vec![bracket.get(match_id)?.clone()];
        self.matches.update_matches(&updated).await?;
        log::debug!(
            "Tournament {tournament_id}: match {match_id} scores {score_a}-{score_b}"
        );
        Ok(())
    }

    /// Assign the winner of a match and advance them through the tree.
    ///
    /// The whole cascade (the match itself, slot insertions, and any
    /// secondary byes it resolves) is persisted as one batch. Returns the
    /// champion's entrant id once the final match is complete, so the
    /// caller can write the tournament's champion record.
    pub async fn set_winner(
        &self,
        tournament_id: TournamentId,
        match_id: MatchId,
        winner: EntrantId,
    ) -> BracketResult<Option<EntrantId>> {
        let mut bracket = self.load(tournament_id).await?;
        let touched = bracket.apply_winner(match_id, winner)?;
        if touched.is_empty() {
            // Idempotent repeat; nothing to persist and no re-propagation.
            return Ok(bracket.champion());
        }
        let updated = touched
            .iter()
            .map(|id| bracket.get(*id).cloned())
            .collect::<BracketResult<Vec<BracketMatch>>>()?;
        self.matches.update_matches(&updated).await?;
        log::info!(
            "Tournament {}: match {} won by {} ({} matches updated)",
            tournament_id,
            match_id,
            winner,
            updated.len()
        );
        Ok(bracket.champion())
    }

    /// Delete all matches for a tournament.
    ///
    /// Clearing an already-empty bracket succeeds with no effect.
    pub async fn clear(&self, tournament_id: TournamentId) -> BracketResult<()> {
        self.matches.delete_bracket(tournament_id).await?;
        log::info!("Cleared bracket for tournament {tournament_id}");
        Ok(())
    }

    /// All matches for a tournament, ordered by round then position.
    pub async fn bracket(&self, tournament_id: TournamentId) -> BracketResult<Vec<BracketMatch>> {
        self.matches.fetch_bracket(tournament_id).await
    }

    /// The tournament champion with display handles resolved, once the
    /// final match is complete.
    pub async fn champion(&self, tournament_id: TournamentId) -> BracketResult<Option<Entrant>> {
        let bracket = self.load(tournament_id).await?;
        let Some(winner) = bracket.champion() else {
            return Ok(None);
        };
        let entrants = self.entrants.entrants(tournament_id).await?;
        entrants
            .into_iter()
            .find(|e| e.user_id == winner)
            .map(Some)
            .ok_or_else(|| BracketError::CorruptBracket {
                tournament_id,
                reason: format!("champion {winner} is not a registered entrant"),
            })
    }

    async fn load(&self, tournament_id: TournamentId) -> BracketResult<Bracket> {
        let matches = self.matches.fetch_bracket(tournament_id).await?;
        Ok(Bracket::from_matches(tournament_id, matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::models::MatchStatus;
    use crate::db::repository::mock::{MemoryEntrantSource, MemoryMatchStore};

    fn manager_with_entrants(n: usize) -> (BracketManager, Arc<MemoryMatchStore>) {
        let store = Arc::new(MemoryMatchStore::new());
        let entrants: Vec<Entrant> = (1..=n as i64)
            .map(|id| Entrant {
                user_id: id,
                username: format!("user{id}"),
                casino_username: format!("casino{id}"),
            })
            .collect();
        let source = Arc::new(MemoryEntrantSource::new().with_entrants(1, entrants));
        (BracketManager::new(store.clone(), source), store)
    }

    #[tokio::test]
    async fn test_generate_persists_full_bracket() {
        let (manager, _store) = manager_with_entrants(5);
        manager.generate(1).await.expect("generate");

        let matches = manager.bracket(1).await.expect("fetch");
        assert_eq!(matches.len(), 7);
        assert_eq!(matches.iter().filter(|m| m.is_final()).count(), 1);
        // Ordered by round then position.
        assert!(matches.windows(2).all(|w| {
            (w[0].round, w[0].position) < (w[1].round, w[1].position)
        }));
    }

    #[tokio::test]
    async fn test_generate_requires_registered_entrants() {
        let (manager, _store) = manager_with_entrants(1);
        assert!(matches!(
            manager.generate(1).await,
            Err(BracketError::NotEnoughEntrants { count: 1, .. })
        ));
        assert!(manager.bracket(1).await.expect("fetch").is_empty());
    }

    #[tokio::test]
    async fn test_set_winner_persists_cascade() {
        let (manager, _store) = manager_with_entrants(2);
        manager.generate(1).await.expect("generate");

        let matches = manager.bracket(1).await.expect("fetch");
        let final_match = &matches[0];
        let winner = final_match.slot_b.expect("slot b populated");

        let champion = manager
            .set_winner(1, final_match.id, winner)
            .await
            .expect("set winner");
        assert_eq!(champion, Some(winner));

        let reloaded = manager.bracket(1).await.expect("fetch");
        assert_eq!(reloaded[0].status, MatchStatus::Completed);
        assert_eq!(reloaded[0].winner, Some(winner));
    }

    #[tokio::test]
    async fn test_write_failure_leaves_store_untouched() {
        let (manager, store) = manager_with_entrants(4);
        manager.generate(1).await.expect("generate");
        let before = manager.bracket(1).await.expect("fetch");

        store.fail_writes(true);
        let opener = before[0].clone();
        let winner = opener.slot_a.expect("slot a populated");
        assert!(matches!(
            manager.set_winner(1, opener.id, winner).await,
            Err(BracketError::Database(_))
        ));

        store.fail_writes(false);
        assert_eq!(manager.bracket(1).await.expect("fetch"), before);
    }

    #[tokio::test]
    async fn test_champion_resolves_display_handles() {
        let (manager, _store) = manager_with_entrants(2);
        manager.generate(1).await.expect("generate");
        assert_eq!(manager.champion(1).await.expect("no champion yet"), None);

        let matches = manager.bracket(1).await.expect("fetch");
        let winner = matches[0].slot_a.expect("slot a populated");
        manager
            .set_winner(1, matches[0].id, winner)
            .await
            .expect("set winner");

        let champion = manager
            .champion(1)
            .await
            .expect("champion")
            .expect("final complete");
        assert_eq!(champion.user_id, winner);
        assert_eq!(champion.username, format!("user{winner}"));
    }
}
