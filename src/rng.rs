//! Seeded random source shared by every stage of one render cycle.
//!
//! A `TrendRng` is created from a refresh token at the start of a render and
//! handed down by `&mut` to the generator, the headline cards and the detail
//! synthesizer. Draw order is part of the contract: the same token and the
//! same sequence of calls always produce the same values.

use rand::seq::SliceRandom as _;
use rand::{Rng as _, SeedableRng as _};
use rand_chacha::ChaCha8Rng;

pub struct TrendRng {
    inner: ChaCha8Rng,
}

impl TrendRng {
    pub fn from_token(token: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(token),
        }
    }

    /// Uniform integer in `lo..=hi`.
    pub fn int_inclusive(&mut self, lo: u64, hi: u64) -> u64 {
        self.inner.gen_range(lo..=hi)
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    /// `amount` distinct indices into a slice of length `len`, in draw order.
    ///
    /// Returns `None` when `amount > len`; callers decide how to report that.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Option<Vec<usize>> {
        if amount > len {
            return None;
        }
        Some(rand::seq::index::sample(&mut self.inner, len, amount).into_vec())
    }

    /// Normal deviate via the Box-Muller transform.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        // u1 in (0, 1] keeps ln() finite.
        let u1: f64 = 1.0 - self.inner.r#gen::<f64>();
        let u2: f64 = self.inner.r#gen::<f64>();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mean + std_dev * z
    }
}
