//! RNG module - bag randomizer with an anti-repeat fallback
//!
//! Shapes are dealt from a sliding history window as long as the set size:
//! a shape is only dealt again once it has left the window. When the window
//! leaves nothing to pick from, any shape may be dealt except one that was
//! just dealt twice in a row, so no shape ever comes three times running.
//!
//! Also provides a simple LCG so games are reproducible from a seed.

use arrayvec::ArrayVec;

use crate::types::ShapeKind;

/// Largest shape set the randomizer handles
pub const MAX_BAG: usize = 7;

/// Previously dealt indices, oldest first
pub type History = ArrayVec<u8, MAX_BAG>;

type Pool = ArrayVec<u8, MAX_BAG>;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits, the low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max <= 1 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Deal the next index from a set of `set_len` shapes.
///
/// `history` is updated in place: its oldest entry is dropped once it holds
/// `set_len` entries, then the pick is appended.
pub fn deal(set_len: usize, history: &mut History, rng: &mut SimpleRng) -> usize {
    let n = set_len.clamp(1, MAX_BAG);
    while history.len() >= n {
        history.remove(0);
    }

    let mut pool: Pool = (0..n as u8).filter(|i| !history.contains(i)).collect();
    if pool.is_empty() {
        pool = fallback_pool(n, history);
    }

    let pick = pool[rng.next_range(pool.len() as u32) as usize];
    history.push(pick);
    pick as usize
}

/// Every index, minus the last one dealt if it was dealt twice in a row
fn fallback_pool(n: usize, history: &History) -> Pool {
    let repeated = match history.as_slice() {
        [.., a, b] if a == b => Some(*b),
        _ => None,
    };
    let pool: Pool = (0..n as u8).filter(|&i| Some(i) != repeated).collect();
    if pool.is_empty() {
        (0..n as u8).collect()
    } else {
        pool
    }
}

/// Shape source for a session, with a one-shape preview
#[derive(Debug, Clone)]
pub struct Randomizer {
    history: History,
    rng: SimpleRng,
    preview: ShapeKind,
}

impl Randomizer {
    pub fn new(seed: u32) -> Self {
        let mut history = History::new();
        let mut rng = SimpleRng::new(seed);
        let preview = Self::draw(&mut history, &mut rng);
        Self {
            history,
            rng,
            preview,
        }
    }

    fn draw(history: &mut History, rng: &mut SimpleRng) -> ShapeKind {
        let index = deal(ShapeKind::ALL.len(), history, rng);
        ShapeKind::ALL[index]
    }

    /// The shape the next call to [`Randomizer::next`] returns
    pub fn peek(&self) -> ShapeKind {
        self.preview
    }

    pub fn next(&mut self) -> ShapeKind {
        let out = self.preview;
        self.preview = Self::draw(&mut self.history, &mut self.rng);
        out
    }

    /// Current RNG state, usable as the seed of a follow-up game
    pub fn state(&self) -> u32 {
        self.rng.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..10 {
            for _ in 0..50 {
                assert!(rng.next_range(max) < max);
            }
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_deal_first_pass_covers_every_index() {
        let mut rng = SimpleRng::new(99);
        let mut history = History::new();
        let mut seen = [false; 7];
        for _ in 0..7 {
            seen[deal(7, &mut history, &mut rng)] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(history.len(), 7);
    }

    #[test]
    fn test_deal_drops_oldest_when_full() {
        let mut rng = SimpleRng::new(5);
        let mut history: History = [0u8, 1, 2].into_iter().collect();
        let pick = deal(3, &mut history, &mut rng);
        // 0 left the window, so it is the only candidate.
        assert_eq!(pick, 0);
        assert_eq!(history.as_slice(), &[1, 2, 0]);
    }

    #[test]
    fn test_fallback_excludes_double_repeat() {
        let history: History = [3u8, 1, 1].into_iter().collect();
        let pool = fallback_pool(4, &history);
        assert_eq!(pool.as_slice(), &[0, 2, 3]);

        let history: History = [1u8, 2].into_iter().collect();
        let pool = fallback_pool(4, &history);
        assert_eq!(pool.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_fallback_single_shape_set() {
        let history: History = [0u8, 0].into_iter().collect();
        assert_eq!(fallback_pool(1, &history).as_slice(), &[0]);
    }

    #[test]
    fn test_randomizer_peek_matches_next() {
        let mut r = Randomizer::new(42);
        for _ in 0..20 {
            let peeked = r.peek();
            assert_eq!(r.next(), peeked);
        }
    }

    #[test]
    fn test_randomizer_same_seed_same_sequence() {
        let mut a = Randomizer::new(2024);
        let mut b = Randomizer::new(2024);
        for _ in 0..50 {
            assert_eq!(a.next(), b.next());
        }
    }
}
