//! Randomness source threaded through generation, population and combat.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform integers over closed ranges.
pub trait Dice {
    /// Draw a uniform integer in `[min, max]`.
    fn roll(&mut self, min: i32, max: i32) -> i32;
}

/// Production dice backed by a seedable standard RNG.
#[derive(Debug, Clone)]
pub struct GameRng {
    inner: StdRng,
}

impl GameRng {
    /// Create dice seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    /// Create dice with a fixed seed, for reproducible dungeons.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl Dice for GameRng {
    fn roll(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.inner.gen_range(min..=max)
    }
}

/// Dice that replay a fixed script of values.
///
/// The script cycles when exhausted and every value is clamped into the
/// requested range. An empty script always yields `min`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: Vec<i32>,
    cursor: usize,
}

impl ScriptedDice {
    /// Create scripted dice from a sequence of values.
    pub fn new(rolls: impl Into<Vec<i32>>) -> Self {
        Self {
            rolls: rolls.into(),
            cursor: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, min: i32, max: i32) -> i32 {
        if self.rolls.is_empty() {
            return min;
        }
        let value = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        value.clamp(min, max.max(min))
    }
}
