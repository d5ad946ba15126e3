use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the random percentage move applied to an instrument after a trade.
///
/// Implementations return a percentage in `[-max_pct, +max_pct]`.
/// The ledger owns one boxed drift, so tests can swap in a fixed or seeded one.
pub trait PriceDrift {
    fn change_pct(&mut self, max_pct: f64) -> f64;
}

/// Uniformly distributed drift backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct UniformDrift {
    rng: StdRng,
}

impl UniformDrift {
    /// Entropy-seeded: every run produces different prices.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible drift for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for UniformDrift {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceDrift for UniformDrift {
    fn change_pct(&mut self, max_pct: f64) -> f64 {
        let max = max_pct.abs();
        self.rng.gen_range(-max..=max)
    }
}

/// New price after moving `price` by `change_pct` percent.
pub fn apply_change(price: f64, change_pct: f64) -> f64 {
    price * (1.0 + change_pct / 100.0)
}
