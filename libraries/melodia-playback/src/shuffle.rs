//! Shuffle order generation
//!
//! Shuffle never touches the track list itself; it produces a permutation
//! of indices that the queue walks instead of the natural order.

use rand::seq::SliceRandom;
use rand::Rng;

/// Random play order over `len` tracks (Fisher-Yates).
///
/// When `first` is a valid index it is moved to the front, so enabling
/// shuffle mid-track keeps the current track playing and shuffles only
/// what comes after it.
pub fn shuffled_order<R: Rng + ?Sized>(len: usize, first: Option<usize>, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(rng);

    if let Some(first) = first.filter(|&i| i < len) {
        if let Some(pos) = order.iter().position(|&i| i == first) {
            order.swap(0, pos);
        }
    }

    order
}

/// Sequence order over `len` tracks
pub fn natural_order(len: usize) -> Vec<usize> {
    (0..len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn order_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut order = shuffled_order(20, None, &mut rng);
        order.sort_unstable();
        assert_eq!(order, natural_order(20));
    }

    #[test]
    fn requested_track_goes_first() {
        let mut rng = StdRng::seed_from_u64(42);
        for first in 0..10 {
            let order = shuffled_order(10, Some(first), &mut rng);
            assert_eq!(order[0], first);
            assert_eq!(order.len(), 10);
        }
    }

    #[test]
    fn out_of_range_first_is_ignored() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut order = shuffled_order(3, Some(9), &mut rng);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn empty_queue() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffled_order(0, Some(0), &mut rng).is_empty());
    }

    #[test]
    fn shuffle_actually_reorders() {
        // 50 tracks: the chance of a seeded shuffle landing on identity is nil.
        let mut rng = StdRng::seed_from_u64(3);
        assert_ne!(shuffled_order(50, None, &mut rng), natural_order(50));
    }
}
