//! Match random source
//!
//! The one and only generator of a match. `MatchContext` owns it and lends it
//! out as `&mut MatchRng`; no component keeps its own generator.
//!
//! No `Default`, `Clone` or reseed API: a second instance or a reset would
//! restart the sequence and desynchronise every later roll.

use fxhash::FxHasher;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

#[derive(Debug)]
pub struct MatchRng {
    inner: ChaCha8Rng,
    seed: u64,
    draws: u64,
}

impl MatchRng {
    pub fn new(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed), seed, draws: 0 }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_float(&mut self) -> f32 {
        self.draws += 1;
        self.inner.gen::<f32>()
    }

    /// Uniform in `[min, max_exclusive)`. Returns `min` for an empty range.
    #[inline]
    pub fn next_int(&mut self, min: i32, max_exclusive: i32) -> i32 {
        if max_exclusive <= min {
            return min;
        }
        self.draws += 1;
        self.inner.gen_range(min..max_exclusive)
    }

    /// Bernoulli trial with probability `p` (clamped to `[0, 1]`).
    #[inline]
    pub fn roll(&mut self, p: f32) -> bool {
        self.next_float() < p.clamp(0.0, 1.0)
    }

    /// Uniform in `[lo, hi)`.
    #[inline]
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.next_float()
    }

    /// Index into a collection of `len` items. `len` must be non-zero.
    #[inline]
    pub fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.next_int(0, len.min(i32::MAX as usize) as i32) as usize
    }
}

/// Derive an independent match seed from a round seed and fixture identity.
///
/// FxHasher is stable across Rust releases, unlike `DefaultHasher`.
pub fn derive_fixture_seed(round_seed: u64, match_id: u32, home_id: u32, away_id: u32) -> u64 {
    let mut hasher = FxHasher::default();
    round_seed.hash(&mut hasher);
    match_id.hash(&mut hasher);
    home_id.hash(&mut hasher);
    away_id.hash(&mut hasher);
    hasher.finish()
}
