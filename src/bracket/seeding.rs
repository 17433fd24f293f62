//! Seed placement for balanced single-elimination brackets.

/// Smallest power of two that holds `n` entrants.
pub fn bracket_size(n: usize) -> usize {
    n.next_power_of_two()
}

/// Number of rounds in a bracket of `size` slots.
pub fn round_count(size: usize) -> u32 {
    debug_assert!(size.is_power_of_two());
    size.trailing_zeros()
}

/// Canonical seed placement order for a bracket of `size` slots.
///
/// `order(2) = [1, 2]`; each doubling interleaves every seed with its
/// complement `size + 1 - seed`. Position `i` of the bracket is occupied by
/// seed `order[i]`, which puts seeds 1 and 2 in opposite halves so they can
/// only meet in the final, seeds 3 and 4 a round earlier, and so on.
pub fn seed_order(size: usize) -> Vec<usize> {
    debug_assert!(size.is_power_of_two() && size >= 2);
    let mut order = vec![1, 2];
    let mut current = 2;
    while current < size {
        current *= 2;
        order = order
            .iter()
            .flat_map(|&seed| [seed, current + 1 - seed])
            .collect();
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_size() {
        assert_eq!(bracket_size(2), 2);
        assert_eq!(bracket_size(3), 4);
        assert_eq!(bracket_size(4), 4);
        assert_eq!(bracket_size(5), 8);
        assert_eq!(bracket_size(8), 8);
        assert_eq!(bracket_size(9), 16);
        assert_eq!(bracket_size(16), 16);
        assert_eq!(bracket_size(17), 32);
        assert_eq!(bracket_size(20), 32);
    }

    #[test]
    fn test_round_count() {
        assert_eq!(round_count(2), 1);
        assert_eq!(round_count(4), 2);
        assert_eq!(round_count(8), 3);
        assert_eq!(round_count(32), 5);
    }

    #[test]
    fn test_seed_order_small_sizes() {
        assert_eq!(seed_order(2), vec![1, 2]);
        assert_eq!(seed_order(4), vec![1, 4, 2, 3]);
        assert_eq!(seed_order(8), vec![1, 8, 4, 5, 2, 7, 3, 6]);
    }

    #[test]
    fn test_seed_order_is_permutation() {
        for size in [2, 4, 8, 16, 32] {
            let mut order = seed_order(size);
            order.sort_unstable();
            let expected: Vec<usize> = (1..=size).collect();
            assert_eq!(order, expected, "size {size}");
        }
    }

    #[test]
    fn test_first_round_pairs_sum_to_complement() {
        // Every first-round pairing is seed s vs seed size+1-s.
        for size in [2, 4, 8, 16, 32] {
            let order = seed_order(size);
            for pair in order.chunks(2) {
                assert_eq!(pair[0] + pair[1], size + 1, "size {size}");
            }
        }
    }

    #[test]
    fn test_top_seeds_in_opposite_halves() {
        // Seeds 1 and 2 can only meet in the final.
        for size in [2, 4, 8, 16] {
            let order = seed_order(size);
            let pos_1 = order.iter().position(|&s| s == 1).unwrap();
            let pos_2 = order.iter().position(|&s| s == 2).unwrap();
            assert!(
                (pos_1 < size / 2) != (pos_2 < size / 2),
                "seeds 1 and 2 share a half at size {size}"
            );
        }
    }
}
