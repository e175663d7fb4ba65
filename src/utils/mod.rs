//! Utility functions and helpers.

pub mod clock;
pub mod http;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub use clock::{Clock, FixedClock, SystemClock};

/// Shuffle `items` in place with a generator seeded from `seed`.
///
/// The same seed always yields the same permutation for a given length.
pub fn seeded_shuffle<T>(items: &mut [T], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    items.shuffle(&mut rng);
}

/// Drop repeated strings, keeping first occurrences, and stop at `limit`.
pub fn dedup_bounded<I>(items: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    let mut deduped = Vec::new();
    for item in items {
        if deduped.len() >= limit {
            break;
        }
        if seen.insert(item.clone()) {
            deduped.push(item);
        }
    }
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_shuffle_is_deterministic() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        seeded_shuffle(&mut a, 42);
        seeded_shuffle(&mut b, 42);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_seeded_shuffle_empty() {
        let mut empty: Vec<u32> = Vec::new();
        seeded_shuffle(&mut empty, 42);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_dedup_bounded() {
        let merged = ["a", "b", "a", "c", "b"].map(String::from);
        assert_eq!(dedup_bounded(merged, 3), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_dedup_bounded_truncates() {
        let merged = ["a", "a", "b", "c", "d"].map(String::from);
        assert_eq!(dedup_bounded(merged, 2), vec!["a", "b"]);
        assert!(dedup_bounded(["a".to_string()], 0).is_empty());
    }
}
