//! Property-based tests for bracket generation.
//!
//! Generation must hold its structural invariants for every entrant count
//! in the supported range and for every seed ordering the shuffle can
//! produce, so these drive `Bracket::generate` with arbitrary permutations.

use proptest::prelude::*;

use r2k2_tournaments::bracket::seeding::{bracket_size, round_count, seed_order};
use r2k2_tournaments::bracket::{Bracket, MatchStatus};

/// Arbitrary entrant count in [2, 20] with an arbitrary seed ordering.
fn shuffled_seeds() -> impl Strategy<Value = Vec<i64>> {
    (2usize..=20)
        .prop_flat_map(|n| Just((1..=n as i64).collect::<Vec<i64>>()).prop_shuffle())
}

proptest! {
    #[test]
    fn generation_invariants_hold(seeds in shuffled_seeds()) {
        let n = seeds.len();
        let size = bracket_size(n);
        let bracket = Bracket::generate(1, &seeds).expect("valid entrant count");

        // Standard single-elimination match count, exactly one final.
        prop_assert_eq!(bracket.matches().count(), size - 1);
        prop_assert_eq!(bracket.matches().filter(|m| m.is_final()).count(), 1);

        // Rounds halve in size up to the final.
        let rounds = round_count(size);
        for round in 0..rounds {
            let count = bracket.matches().filter(|m| m.round == round).count();
            prop_assert_eq!(count, size >> (round + 1));
        }

        // A match is completed iff it has a winner, and every round-0 bye
        // emerged from generation already decided in the lone entrant's
        // favor.
        for m in bracket.matches() {
            prop_assert_eq!(m.status == MatchStatus::Completed, m.winner.is_some());
            if m.round == 0 {
                if let Some(lone) = m.lone_entrant() {
                    prop_assert_eq!(m.winner, Some(lone));
                } else if m.slot_a.is_some() {
                    prop_assert_eq!(m.status, MatchStatus::Pending);
                }
            }
        }

        // No champion straight out of generation: at least two entrants
        // always have to meet somewhere.
        prop_assert!(bracket.champion().is_none());

        // Byes equal the unfilled slot count and never pair with each
        // other.
        let byes = bracket
            .matches()
            .filter(|m| m.round == 0 && m.lone_entrant().is_some())
            .count();
        prop_assert_eq!(byes, size - n);
        prop_assert!(bracket
            .matches()
            .filter(|m| m.round == 0)
            .all(|m| m.slot_a.is_some() || m.slot_b.is_some()));
    }

    #[test]
    fn every_entrant_appears_exactly_once_in_round_0(seeds in shuffled_seeds()) {
        let bracket = Bracket::generate(1, &seeds).expect("valid entrant count");

        let mut placed: Vec<i64> = bracket
            .matches()
            .filter(|m| m.round == 0)
            .flat_map(|m| [m.slot_a, m.slot_b])
            .flatten()
            .collect();
        placed.sort_unstable();

        let mut expected = seeds.clone();
        expected.sort_unstable();
        prop_assert_eq!(placed, expected);
    }
}

#[test]
fn top_two_seeds_meet_only_in_the_final() {
    // Fairness by construction: for every supported bracket size, seeds 1
    // and 2 sit in opposite halves of the placement order, so the earliest
    // they can meet is the final.
    for size in [2, 4, 8, 16] {
        let order = seed_order(size);
        let half = size / 2;
        let pos_1 = order.iter().position(|&s| s == 1).unwrap();
        let pos_2 = order.iter().position(|&s| s == 2).unwrap();
        assert_ne!(pos_1 < half, pos_2 < half, "size {size}");

        // Seeds 3 and 4 are split across the remaining quarters, so they
        // cannot meet seed 1 or 2 before the semifinal either.
        if size >= 4 {
            let pos_3 = order.iter().position(|&s| s == 3).unwrap();
            let pos_4 = order.iter().position(|&s| s == 4).unwrap();
            assert_ne!(pos_3 < half, pos_4 < half, "size {size}");
        }
    }
}
