//! Decision sources for combat. Uses SplitMix64 for the seeded stream.
//! Deterministic: same seed produces the same sequence. Not cryptographically secure.
//!
//! Every combat roll goes through one [DecisionSource]; the number and order of
//! draws is part of the observable result of a match.

use std::collections::VecDeque;

use tracing::trace;

const SPLITMIX64_GOLDEN: u64 = 0x9e3779b97f4a7c15;
const SPLITMIX64_M1: u64 = 0xbf58476d1ce4e5b9;
const SPLITMIX64_M2: u64 = 0x94d049bb133111eb;

pub const DEFAULT_SEED: u64 = 56;

#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
        z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)` from the top 53 bits.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Boolean outcome source: `draw(p)` is true with probability `p` percent.
pub trait DecisionSource {
    fn draw(&mut self, probability: f64) -> bool;
}

/// Seeded sequential stream used for real matches.
#[derive(Debug, Clone)]
pub struct SeededDecisions {
    rng: Rng,
    draws: u64,
}

impl SeededDecisions {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng::new(seed),
            draws: 0,
        }
    }

    /// Number of draws consumed so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl Default for SeededDecisions {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl DecisionSource for SeededDecisions {
    fn draw(&mut self, probability: f64) -> bool {
        let roll = self.rng.next_f64();
        self.draws += 1;
        let hit = roll < probability / 100.0;
        trace!(draw = self.draws, probability, roll, hit, "decision drawn");
        hit
    }
}

/// Replays a fixed list of outcomes and records every requested probability.
/// Draws past the end of the script return `false`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    outcomes: VecDeque<bool>,
    requested: Vec<f64>,
}

impl ScriptedDecisions {
    pub fn new(outcomes: impl IntoIterator<Item = bool>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
            requested: Vec::new(),
        }
    }

    /// Probabilities passed to [DecisionSource::draw], in call order.
    pub fn requested(&self) -> &[f64] {
        &self.requested
    }

    pub fn remaining(&self) -> usize {
        self.outcomes.len()
    }
}

impl DecisionSource for ScriptedDecisions {
    fn draw(&mut self, probability: f64) -> bool {
        self.requested.push(probability);
        self.outcomes.pop_front().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splitmix64_deterministic() {
        let mut a = Rng::new(7);
        let mut b = Rng::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn splitmix64_different_seeds_differ() {
        let mut a = Rng::new(1);
        let mut b = Rng::new(2);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn next_f64_stays_in_unit_interval() {
        let mut rng = Rng::new(DEFAULT_SEED);
        for _ in 0..10_000 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn seeded_draws_respect_probability_bounds() {
        let mut decisions = SeededDecisions::new(11);
        for _ in 0..1_000 {
            assert!(!decisions.draw(0.0));
            assert!(decisions.draw(100.0));
        }
        assert_eq!(decisions.draws(), 2_000);
    }

    #[test]
    fn seeded_draw_rate_tracks_probability() {
        let mut decisions = SeededDecisions::new(3);
        let hits = (0..20_000).filter(|_| decisions.draw(25.0)).count();
        let rate = hits as f64 / 20_000.0;
        assert!((rate - 0.25).abs() < 0.02, "rate {rate}");
    }

    #[test]
    fn scripted_replays_and_records() {
        let mut decisions = ScriptedDecisions::new([true, false]);
        assert!(decisions.draw(40.0));
        assert!(!decisions.draw(2.5));
        assert!(!decisions.draw(100.0));
        assert_eq!(decisions.requested(), &[40.0, 2.5, 100.0]);
        assert_eq!(decisions.remaining(), 0);
    }
}
