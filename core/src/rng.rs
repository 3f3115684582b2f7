//! Deterministic random number generation.
//!
//! RULE: Nothing in the engine may call any platform RNG.
//! All randomness flows through StreamRng instances derived
//! from the single master seed stored on the Simulation record.
//!
//! Each draw phase gets its own RNG stream, seeded deterministically
//! from (master_seed XOR slot_index * golden ratio). This means:
//!   - Adding a new stream never changes existing streams' draws.
//!   - Each stream is fully reproducible in isolation.

use crate::types::Seed;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single draw phase.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream RNG from the master seed and a stable
    /// slot index. The index must never change once assigned.
    pub fn new(master_seed: Seed, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform float in [min, max). Returns `min` when the range is empty.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.next_f64() * (max - min) + min
    }

    /// Symmetric noise in [-magnitude, magnitude).
    pub fn symmetric(&mut self, magnitude: f64) -> f64 {
        self.range(-magnitude, magnitude)
    }
}

/// All stream RNGs for a single run, indexed by stable slot.
pub struct RngBank {
    master_seed: Seed,
}

impl RngBank {
    pub fn new(master_seed: Seed) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> Seed {
        self.master_seed
    }

    pub fn for_stream(&self, slot: StreamSlot) -> StreamRng {
        StreamRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }

    /// Draw a fresh master seed from the OS. Only the runner calls this,
    /// once per interactive run; the seed is then recorded on the run.
    pub fn entropy_seed() -> Seed {
        rand::random()
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries, only append.
/// Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Volatility = 0,
    Trajectory = 1,
    Competitors = 2,
    // Add new streams here. Append only.
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Volatility => "volatility",
            Self::Trajectory => "trajectory",
            Self::Competitors => "competitors",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let bank_a = RngBank::new(12345);
        let bank_b = RngBank::new(12345);
        let mut a = bank_a.for_stream(StreamSlot::Trajectory);
        let mut b = bank_b.for_stream(StreamSlot::Trajectory);

        for _ in 0..32 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn slots_are_independent_streams() {
        let bank = RngBank::new(12345);
        let mut vol = bank.for_stream(StreamSlot::Volatility);
        let mut comp = bank.for_stream(StreamSlot::Competitors);

        let a: Vec<u64> = (0..8).map(|_| vol.next_f64().to_bits()).collect();
        let b: Vec<u64> = (0..8).map(|_| comp.next_f64().to_bits()).collect();
        assert_ne!(a, b, "Distinct slots should not share a stream");
    }

    #[test]
    fn range_stays_inside_bounds() {
        let mut rng = RngBank::new(7).for_stream(StreamSlot::Volatility);

        for _ in 0..1_000 {
            let x = rng.range(15.0, 30.0);
            assert!((15.0..30.0).contains(&x), "{x} escaped [15, 30)");

            let n = rng.symmetric(50.0);
            assert!((-50.0..50.0).contains(&n), "{n} escaped [-50, 50)");
        }
    }

    #[test]
    fn empty_range_returns_min() {
        let mut rng = RngBank::new(7).for_stream(StreamSlot::Trajectory);
        assert_eq!(rng.range(0.0, 0.0), 0.0);
        assert_eq!(rng.symmetric(0.0), 0.0);
    }
}
