use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SEQUENCE_MIN: u32 = 1_000_000;
pub const SEQUENCE_MAX: u32 = 9_999_999;

/// Source of CDM message sequence numbers (7 digits).
///
/// Shared across concurrently processed events, hence `Send + Sync`.
pub trait SequenceSource: Send + Sync {
    fn next_sequence(&self) -> u32;
}

/// Thread-local RNG backed generator used in production
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSequence;

impl SequenceSource for RandomSequence {
    fn next_sequence(&self) -> u32 {
        rand::thread_rng().gen_range(SEQUENCE_MIN..=SEQUENCE_MAX)
    }
}

/// Deterministic generator for tests and replays
pub struct SeededSequence {
    rng: Mutex<StdRng>,
}

impl SeededSequence {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl SequenceSource for SeededSequence {
    fn next_sequence(&self) -> u32 {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rng.gen_range(SEQUENCE_MIN..=SEQUENCE_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_sequence_stays_in_range() {
        let source = RandomSequence;
        for _ in 0..1_000 {
            let n = source.next_sequence();
            assert!((SEQUENCE_MIN..=SEQUENCE_MAX).contains(&n));
            assert_eq!(n.to_string().len(), 7);
        }
    }

    #[test]
    fn test_random_sequence_does_not_repeat_consecutively() {
        let source = RandomSequence;
        let values: Vec<u32> = (0..50).map(|_| source.next_sequence()).collect();
        let repeats = values.windows(2).filter(|w| w[0] == w[1]).count();
        assert_eq!(repeats, 0);
    }

    #[test]
    fn test_seeded_sequence_is_reproducible() {
        let a = SeededSequence::new(42);
        let b = SeededSequence::new(42);
        for _ in 0..10 {
            assert_eq!(a.next_sequence(), b.next_sequence());
        }
    }
}
