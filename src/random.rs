use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_SEED: u64 = 3819201;

/// Source of randomness threaded through selection tie-breaks and rollouts.
pub trait RandomGenerator: Default {
    /// Returns a uniformly distributed value in `from..to`. `to` must be greater than `from`.
    fn next_range(&mut self, from: usize, to: usize) -> usize;

    /// Picks a uniformly random element of `items`, or `None` if it is empty.
    fn choose<'a, K>(&mut self, items: &'a [K]) -> Option<&'a K> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_range(0, items.len()))
    }

    /// Takes a uniformly random element out of `items`, or `None` if it is empty.
    fn take_random<K>(&mut self, mut items: Vec<K>) -> Option<K> {
        if items.is_empty() {
            return None;
        }
        let index = self.next_range(0, items.len());
        Some(items.swap_remove(index))
    }
}

/// Draws from the thread-local generator of `rand`. Not reproducible.
#[derive(Debug, Default)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next_range(&mut self, from: usize, to: usize) -> usize {
        rand::rng().random_range(from..to)
    }
}

/// A reproducible generator: two instances built from the same seed yield the same sequence.
#[derive(Debug, Clone)]
pub struct SeededRandomGenerator {
    rng: StdRng,
}

impl SeededRandomGenerator {
    /// Creates a generator whose sequence is fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededRandomGenerator {
    fn default() -> Self {
        SeededRandomGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for SeededRandomGenerator {
    fn next_range(&mut self, from: usize, to: usize) -> usize {
        self.rng.random_range(from..to)
    }
}

#[cfg(test)]
mod tests {
    use crate::random::{RandomGenerator, SeededRandomGenerator, StandardRandomGenerator};

    #[test]
    fn same_seed_outputs_same_numbers() {
        let mut first = SeededRandomGenerator::new(42);
        let mut second = SeededRandomGenerator::new(42);
        let a: Vec<usize> = (0..32).map(|_| first.next_range(0, 10)).collect();
        let b: Vec<usize> = (0..32).map(|_| second.next_range(0, 10)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn next_range_stays_in_bounds() {
        let mut random = SeededRandomGenerator::default();
        for _ in 0..1000 {
            let value = random.next_range(3, 7);
            assert!((3..7).contains(&value));
        }

        let mut standard = StandardRandomGenerator;
        for _ in 0..1000 {
            assert!(standard.next_range(0, 2) < 2);
        }
    }

    #[test]
    fn choose_from_empty_is_none() {
        let mut random = SeededRandomGenerator::default();
        let empty: Vec<u8> = vec![];
        assert_eq!(random.choose(&empty), None);
        assert_eq!(random.take_random(empty), None);
    }

    #[test]
    fn choose_eventually_covers_every_element() {
        let vec = vec![432, 6542, 534, 6, 13];
        let mut random = SeededRandomGenerator::default();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(*random.choose(&vec).unwrap());
        }
        assert_eq!(seen.len(), vec.len());
    }

    #[test]
    fn take_random_returns_an_element() {
        let mut random = SeededRandomGenerator::new(7);
        let taken = random.take_random(vec![1, 2, 3]).unwrap();
        assert!([1, 2, 3].contains(&taken));
    }
}
