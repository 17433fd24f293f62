//! In-memory bracket arena, bye resolution, and winner propagation.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use super::errors::{BracketError, BracketResult};
use super::models::{BracketMatch, EntrantId, MatchId, MatchStatus, Slot, TournamentId};
use super::seeding::{bracket_size, round_count, seed_order};

/// Minimum entrants a bracket can be generated from.
pub const MIN_ENTRANTS: usize = 2;

/// Maximum entrants a bracket supports. Larger fields are rejected outright.
pub const MAX_ENTRANTS: usize = 20;

/// Full match tree for one tournament, indexed by match id.
///
/// The arena is rebuilt from the match store for every operation. Liveness
/// (whether a slot can still be filled by a surviving entrant) is derived
/// from the matches currently in the arena; nothing is cached across loads.
#[derive(Debug, Clone)]
pub struct Bracket {
    tournament_id: TournamentId,
    matches: HashMap<MatchId, BracketMatch>,
}

impl Bracket {
    /// Build a fresh bracket from a seeded entrant list, resolving initial
    /// byes.
    ///
    /// `seeds` must already be in seed order: index 0 is seed 1. Positions
    /// beyond the entrant count in the canonical placement order are byes,
    /// which complete (and propagate) before this returns.
    pub fn generate(tournament_id: TournamentId, seeds: &[EntrantId]) -> BracketResult<Self> {
        if seeds.len() < MIN_ENTRANTS {
            return Err(BracketError::NotEnoughEntrants {
                count: seeds.len(),
                min: MIN_ENTRANTS,
            });
        }
        if seeds.len() > MAX_ENTRANTS {
            return Err(BracketError::TooManyEntrants {
                count: seeds.len(),
                max: MAX_ENTRANTS,
            });
        }
        let mut seen = HashSet::new();
        for &entrant in seeds {
            if !seen.insert(entrant) {
                return Err(BracketError::DuplicateEntrant(entrant));
            }
        }

        let size = bracket_size(seeds.len());
        let rounds = round_count(size);

        // Bracket position i holds the entrant seeded order[i], or a bye
        // when that seed number exceeds the entrant count.
        let placement: Vec<Option<EntrantId>> = seed_order(size)
            .iter()
            .map(|&seed| seeds.get(seed - 1).copied())
            .collect();

        // Ids are assigned up front so each round can wire its forward
        // links to the round above.
        let ids: Vec<Vec<MatchId>> = (0..rounds)
            .map(|round| (0..size >> (round + 1)).map(|_| Uuid::new_v4()).collect())
            .collect();

        let mut matches = HashMap::new();
        for round in 0..rounds {
            let count = size >> (round + 1);
            for position in 0..count {
                let next_match = ids
                    .get(round as usize + 1)
                    .map(|parents| parents[position / 2]);
                let next_slot = next_match.map(|_| {
                    if position % 2 == 0 {
                        Slot::A
                    } else {
                        Slot::B
                    }
                });
                let (slot_a, slot_b) = if round == 0 {
                    (placement[2 * position], placement[2 * position + 1])
                } else {
                    (None, None)
                };
                let id = ids[round as usize][position];
                matches.insert(
                    id,
                    BracketMatch {
                        id,
                        tournament_id,
                        round,
                        position: position as u32,
                        slot_a,
                        slot_b,
                        winner: None,
                        score_a: 0,
                        score_b: 0,
                        status: MatchStatus::Pending,
                        next_match,
                        next_slot,
                    },
                );
            }
        }

        let mut bracket = Self {
            tournament_id,
            matches,
        };
        bracket.resolve_initial_byes()?;
        Ok(bracket)
    }

    /// Rebuild the arena from matches loaded out of the store.
    pub fn from_matches(tournament_id: TournamentId, matches: Vec<BracketMatch>) -> Self {
        Self {
            tournament_id,
            matches: matches.into_iter().map(|m| (m.id, m)).collect(),
        }
    }

    pub fn tournament_id(&self) -> TournamentId {
        self.tournament_id
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn get(&self, id: MatchId) -> BracketResult<&BracketMatch> {
        self.matches.get(&id).ok_or(BracketError::MatchNotFound(id))
    }

    pub fn matches(&self) -> impl Iterator<Item = &BracketMatch> {
        self.matches.values()
    }

    /// All matches ordered by round then position, ready for bulk insert.
    pub fn into_matches(self) -> Vec<BracketMatch> {
        let mut matches: Vec<BracketMatch> = self.matches.into_values().collect();
        matches.sort_by_key(|m| (m.round, m.position));
        matches
    }

    /// The match with no forward link. Generation guarantees exactly one.
    pub fn final_match(&self) -> Option<&BracketMatch> {
        self.matches.values().find(|m| m.is_final())
    }

    /// The champion's entrant id, once the final match is complete.
    pub fn champion(&self) -> Option<EntrantId> {
        self.final_match().and_then(|m| m.winner)
    }

    /// Record both scores for a match and mark it live.
    ///
    /// Never assigns a winner; ties and score-based advancement are resolved
    /// through [`Bracket::apply_winner`] only.
    pub fn apply_scores(
        &mut self,
        match_id: MatchId,
        score_a: i32,
        score_b: i32,
    ) -> BracketResult<()> {
        let m = self
            .matches
            .get_mut(&match_id)
            .ok_or(BracketError::MatchNotFound(match_id))?;
        if m.status == MatchStatus::Completed {
            return Err(BracketError::MatchAlreadyCompleted(match_id));
        }
        m.score_a = score_a;
        m.score_b = score_b;
        m.status = MatchStatus::Live;
        Ok(())
    }

    /// Record `winner` for `match_id` and advance them through the tree.
    ///
    /// Returns the ids of every match the cascade mutated, in cascade order;
    /// an empty list means the call was an idempotent repeat and nothing
    /// needs persisting. Errors leave the arena untouched except for
    /// [`BracketError::CorruptBracket`], whose partial arena must be
    /// discarded by the caller rather than written back.
    pub fn apply_winner(
        &mut self,
        match_id: MatchId,
        winner: EntrantId,
    ) -> BracketResult<Vec<MatchId>> {
        let m = self.get(match_id)?;
        if m.status == MatchStatus::Completed {
            if m.winner == Some(winner) {
                // Repeat of a recorded result; propagation already ran.
                return Ok(Vec::new());
            }
            return Err(BracketError::MatchAlreadyCompleted(match_id));
        }
        if !m.contains(winner) {
            return Err(BracketError::WinnerNotInMatch { match_id, winner });
        }

        let mut touched = Vec::new();
        self.complete(match_id, winner, &mut touched)?;
        touched.dedup();
        Ok(touched)
    }

    /// Complete `match_id` with `winner`, write the winner into the next
    /// match's slot, and keep resolving while the opposing branch is dead.
    fn complete(
        &mut self,
        match_id: MatchId,
        winner: EntrantId,
        touched: &mut Vec<MatchId>,
    ) -> BracketResult<()> {
        let (next_match, next_slot) = {
            let m = self
                .matches
                .get_mut(&match_id)
                .ok_or(BracketError::MatchNotFound(match_id))?;
            m.winner = Some(winner);
            m.status = MatchStatus::Completed;
            (m.next_match, m.next_slot)
        };
        touched.push(match_id);

        let (Some(next_id), Some(slot)) = (next_match, next_slot) else {
            // The final: tournament complete.
            return Ok(());
        };

        let Some(next) = self.matches.get_mut(&next_id) else {
            return Err(self.corrupt(format!(
                "match {match_id} links to missing match {next_id}"
            )));
        };
        match next.slot(slot) {
            None => {
                next.set_slot(slot, winner);
                touched.push(next_id);
            }
            Some(occupant) if occupant == winner => {}
            Some(occupant) => {
                // Populated slots are never overwritten outside regeneration.
                return Err(self.corrupt(format!(
                    "slot {slot} of match {next_id} already holds {occupant}"
                )));
            }
        }

        let next = &self.matches[&next_id];
        if next.status == MatchStatus::Completed {
            // Propagation past an already-completed match is a no-op.
            return Ok(());
        }
        if next.slot(slot.other()).is_some() {
            // Two populated slots always require an explicit winner.
            return Ok(());
        }
        if self.slot_alive(next_id, slot.other())? {
            // An opponent can still arrive from the other branch.
            return Ok(());
        }
        // Secondary bye: the opposing branch cannot produce an entrant.
        self.complete(next_id, winner, touched)
    }

    /// Whether `slot` of `match_id` is populated or can still be filled by
    /// a surviving entrant somewhere in its feeding subtree.
    ///
    /// Leaves (round 0) are alive iff populated; an internal slot is alive
    /// iff its feeder has a determined winner or either of the feeder's own
    /// slots is alive.
    fn slot_alive(&self, match_id: MatchId, slot: Slot) -> BracketResult<bool> {
        let m = self.get(match_id)?;
        if m.slot(slot).is_some() {
            return Ok(true);
        }
        if m.round == 0 {
            return Ok(false);
        }
        let feeder_position = 2 * m.position + if slot == Slot::A { 0 } else { 1 };
        let Some(feeder) = self.by_coords(m.round - 1, feeder_position) else {
            return Err(self.corrupt(format!(
                "match {match_id} has no feeder at round {} position {feeder_position}",
                m.round - 1
            )));
        };
        if feeder.winner.is_some() {
            return Ok(true);
        }
        let feeder_id = feeder.id;
        Ok(self.slot_alive(feeder_id, Slot::A)? || self.slot_alive(feeder_id, Slot::B)?)
    }

    /// Round-0 matches with exactly one populated slot complete immediately
    /// and propagate, which can chain further when a whole branch is empty.
    fn resolve_initial_byes(&mut self) -> BracketResult<()> {
        let byes: Vec<(MatchId, EntrantId)> = self
            .matches
            .values()
            .filter(|m| m.round == 0 && m.status == MatchStatus::Pending)
            .filter_map(|m| m.lone_entrant().map(|entrant| (m.id, entrant)))
            .collect();
        let mut touched = Vec::new();
        for (id, entrant) in byes {
            // A previous bye's cascade may have reached this match already.
            if self.get(id)?.status == MatchStatus::Completed {
                continue;
            }
            self.complete(id, entrant, &mut touched)?;
        }
        Ok(())
    }

    fn by_coords(&self, round: u32, position: u32) -> Option<&BracketMatch> {
        self.matches
            .values()
            .find(|m| m.round == round && m.position == position)
    }

    fn corrupt(&self, reason: String) -> BracketError {
        BracketError::CorruptBracket {
            tournament_id: self.tournament_id,
            reason,
        }
    }
}
