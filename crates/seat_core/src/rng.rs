// crates/seat_core/src/rng.rs
//
// Seedable, integer-only RNG for tie-breaking.
// Focus: unbiased range generation, stable seeding, draw accounting.
//
// • Randomness enters apportionment only through an explicit `&mut TieRng`.
// • Unbiased ranges via rejection sampling; no floating point.
// • Cross-platform determinism: explicit seeding and word-index accounting.

use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

/// Deterministic RNG for ties.
///
/// Internally uses ChaCha20 with an explicit 32-byte seed derived from the
/// 64-bit tie seed (little-endian bytes in the first 8 positions; the rest 0).
/// This avoids endianness ambiguity and keeps mapping stable across platforms.
#[derive(Debug, Clone)]
pub struct TieRng {
    rng: ChaCha20Rng,
    words_consumed: u128,
}

impl TieRng {
    /// Construct from a 64-bit seed. `seed.to_le_bytes()` fills the first
    /// 8 bytes of the ChaCha20 seed; the remaining 24 bytes are zero.
    #[inline]
    pub fn from_seed_u64(seed: u64) -> Self {
        let mut seed32 = [0u8; 32];
        seed32[..8].copy_from_slice(&seed.to_le_bytes());
        Self {
            rng: ChaCha20Rng::from_seed(seed32),
            words_consumed: 0,
        }
    }

    /// Seed from OS entropy (process-local, non-reproducible).
    #[cfg(feature = "entropy")]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
            words_consumed: 0,
        }
    }

    /// Total number of 64-bit words consumed so far (saturating at `u128::MAX`).
    #[inline]
    pub fn words_consumed(&self) -> u128 {
        self.words_consumed
    }

    /// The only place where the counter is advanced.
    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.words_consumed = self.words_consumed.saturating_add(1);
        self.rng.next_u64()
    }

    /// Unbiased integer in [0, n) using rejection sampling with the standard
    /// PCG "threshold" trick. Returns `None` if `n == 0`.
    ///
    /// Let `threshold = 2^64 mod n` (computed via `wrapping_neg() % n`).
    /// Accept `x` if `x >= threshold`; then `x % n` is uniformly distributed.
    #[inline]
    pub fn gen_range(&mut self, n: u64) -> Option<u64> {
        if n == 0 {
            return None;
        }
        let threshold = n.wrapping_neg() % n;
        loop {
            let x = self.next_u64();
            if x >= threshold {
                return Some(x % n);
            }
        }
    }

    /// Choose a single index in `[0, n)`; returns `None` if `n == 0`.
    #[inline]
    pub fn choose_index(&mut self, n: usize) -> Option<usize> {
        self.gen_range(n as u64).map(|v| v as usize)
    }

    /// Draw `k` distinct elements of `items` uniformly (partial Fisher–Yates).
    /// Returns every element when `k >= items.len()`. Output order is draw order.
    pub fn choose_k<T: Copy>(&mut self, items: &[T], k: usize) -> Vec<T> {
        let mut pool = items.to_vec();
        let k = k.min(pool.len());
        for i in 0..k {
            if let Some(off) = self.choose_index(pool.len() - i) {
                pool.swap(i, i + off);
            }
        }
        pool.truncate(k);
        pool
    }
}

impl Default for TieRng {
    fn default() -> Self {
        Self::from_seed_u64(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen_range_zero_none() {
        let mut rng = TieRng::from_seed_u64(0xDEADBEEFCAFEBABE);
        assert_eq!(rng.gen_range(0), None);
        assert_eq!(rng.words_consumed(), 0);
    }

    #[test]
    fn gen_range_is_deterministic_per_seed() {
        let mut a = TieRng::from_seed_u64(123456789);
        let mut b = TieRng::from_seed_u64(123456789);
        let seq_a: Vec<u64> = (0..16).map(|_| a.gen_range(10).unwrap()).collect();
        let seq_b: Vec<u64> = (0..16).map(|_| b.gen_range(10).unwrap()).collect();
        assert_eq!(seq_a, seq_b);
        assert!(seq_a.iter().all(|&v| v < 10));
    }

    #[test]
    fn choose_k_draws_distinct_members() {
        let mut rng = TieRng::from_seed_u64(7);
        let items = [3usize, 5, 8, 13, 21];
        for k in 0..=items.len() {
            let mut picked = rng.choose_k(&items, k);
            assert_eq!(picked.len(), k);
            picked.sort_unstable();
            picked.dedup();
            assert_eq!(picked.len(), k);
            assert!(picked.iter().all(|p| items.contains(p)));
        }
        assert_eq!(rng.choose_k(&items, 99).len(), items.len());
    }

    #[test]
    fn choose_k_reaches_every_member() {
        let mut rng = TieRng::from_seed_u64(11);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[rng.choose_k(&[0usize, 1, 2], 1)[0]] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
