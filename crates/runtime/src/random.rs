//! Thread-local random source backed by `rand`.

use meal_core::RandomSource;
use rand::Rng;

/// Uniform draws from the thread-local `rand` generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}
