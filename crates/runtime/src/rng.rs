//! `rand`-backed random source for live play.
use clash_core::RandomSource;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Adapts any [`RngCore`] to the engine's [`RandomSource`] seam.
#[derive(Clone, Debug)]
pub struct RandSource<R: RngCore> {
    inner: R,
}

impl<R: RngCore> RandSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl RandSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Seeded when a seed is given, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: RngCore> RandomSource for RandSource<R> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_draws() {
        let mut a = RandSource::seeded(42);
        let mut b = RandSource::seeded(42);
        let rolls_a: Vec<u32> = (0..16).map(|_| a.roll_die(6)).collect();
        let rolls_b: Vec<u32> = (0..16).map(|_| b.roll_die(6)).collect();
        assert_eq!(rolls_a, rolls_b);
        assert!(rolls_a.iter().all(|roll| (1..=6).contains(roll)));
    }
}
