//! Source of randomness for the simulation.
//!
//! Every stochastic decision (wander jitter, fight noise and rolls, infection
//! rolls, trait mutation, sex and name picks) goes through [`Noise`], so tests
//! can pin outcomes with [`FixedNoise`] instead of relying on seeded streams.

use rand::rngs::ThreadRng;
use rand::Rng;

/// Random draws used by the simulation.
pub trait Noise {
    /// Uniform value in `[-magnitude, magnitude]`.
    fn spread(&mut self, magnitude: f32) -> f32;

    /// Uniform value in `[0, 1)`.
    fn roll(&mut self) -> f32;

    /// Uniform value in `[low, high]`.
    fn between(&mut self, low: f32, high: f32) -> f32;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Fair coin flip.
    fn coin(&mut self) -> bool {
        self.roll() < 0.5
    }
}

/// [`Noise`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngNoise<R: Rng = ThreadRng> {
    rng: R,
}

impl RngNoise<ThreadRng> {
    /// Uses the thread-local generator.
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RngNoise<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RngNoise<R> {
    /// Wraps an existing generator, e.g. a seeded `StdRng`.
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Noise for RngNoise<R> {
    fn spread(&mut self, magnitude: f32) -> f32 {
        let magnitude = magnitude.abs();
        if magnitude == 0.0 {
            return 0.0;
        }
        self.rng.random_range(-magnitude..=magnitude)
    }

    fn roll(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    fn between(&mut self, low: f32, high: f32) -> f32 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Deterministic [`Noise`]: no spread, a constant roll.
///
/// With the default roll of `0.0` every probability check succeeds, fights
/// are won by the initiator whenever their win probability is positive, and
/// [`Noise::between`] returns the midpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedNoise {
    /// Value returned by every [`Noise::roll`].
    pub roll: f32,
}

impl FixedNoise {
    /// Fixed noise returning `roll` for every probability draw.
    pub fn with_roll(roll: f32) -> Self {
        Self { roll }
    }
}

impl Noise for FixedNoise {
    fn spread(&mut self, _magnitude: f32) -> f32 {
        0.0
    }

    fn roll(&mut self) -> f32 {
        self.roll
    }

    fn between(&mut self, low: f32, high: f32) -> f32 {
        (low + high) / 2.0
    }

    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}
