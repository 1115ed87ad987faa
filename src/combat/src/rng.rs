//src/combat/src/rng.rs
use rand::{
    Rng, SeedableRng,
    distr::uniform,
};
use rand_pcg::Pcg32;

/// Deterministic RNG shared by everything that rolls dice during a session.
///
/// Owned by the session and lent out by `&mut`; tests seed it to get
/// reproducible battles.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: Pcg32,
    seed: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn reseed(&mut self, new_seed: u64) {
        *self = Self::new(new_seed);
    }

    /// Bernoulli trial; probabilities outside `0..=1` are clamped
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: uniform::SampleUniform,
        R: uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    /// Uniform pick from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            let idx = self.random_range(0..items.len());
            Some(&items[idx])
        }
    }

    /// Scale `value` by a uniform factor in `[1 - spread, 1 + spread]`, rounded
    pub fn vary(&mut self, value: u32, spread: f64) -> u32 {
        if value == 0 || spread <= 0.0 {
            return value;
        }
        let factor = self.random_range((1.0 - spread)..=(1.0 + spread));
        (value as f64 * factor).round().max(0.0) as u32
    }
}
