//! Random source
//!
//! Every random draw in the game goes through a [`Dice`] so that combat,
//! encounters and loot can be replayed from a seed or from a script.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform random draws
pub trait Dice {
    /// Uniform integer in `[low, high]`, both bounds inclusive
    fn roll(&mut self, low: i32, high: i32) -> i32;

    /// Uniform float in `[0, 1)`
    fn chance(&mut self) -> f64;
}

/// Dice backed by the standard seedable RNG
#[derive(Debug, Clone)]
pub struct StdDice {
    rng: StdRng,
}

impl StdDice {
    /// Reproducible dice for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Dice for StdDice {
    fn roll(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    fn chance(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Dice that replay queued values, for tests and scripted harnesses.
///
/// Rolls are clamped into the requested range. Once a queue runs dry,
/// `roll` yields the lower bound and `chance` yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<i32>,
    chances: VecDeque<f64>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(rolls: impl IntoIterator<Item = i32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            chances: VecDeque::new(),
        }
    }

    pub fn push_roll(&mut self, value: i32) -> &mut Self {
        self.rolls.push_back(value);
        self
    }

    pub fn push_chance(&mut self, value: f64) -> &mut Self {
        self.chances.push_back(value);
        self
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, low: i32, high: i32) -> i32 {
        match self.rolls.pop_front() {
            Some(value) => value.clamp(low, high.max(low)),
            None => low,
        }
    }

    fn chance(&mut self) -> f64 {
        self.chances
            .pop_front()
            .map(|c| c.clamp(0.0, 1.0 - f64::EPSILON))
            .unwrap_or(0.0)
    }
}
