//! Seed sweeps: the same pairings played under many seeds in parallel.
//!
//! Each seed gets its own [SeededDecisions] stream and its own copy of the
//! rosters, so matches never share state and results are independent of the
//! worker count. Outcomes are returned in seed order.

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::combat::{play_match, CombatError, CombatRules, RoundPairing, SeededDecisions, Side};
use crate::parallel::pool::WorkerPool;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("match with seed {seed} failed: {source}")]
    Match {
        seed: u64,
        #[source]
        source: CombatError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeedOutcome {
    pub seed: u64,
    pub winner: Option<Side>,
    pub your_points: u32,
    pub opponent_points: u32,
    pub turns: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepSummary {
    pub matches: usize,
    pub wins: usize,
    pub losses: usize,
    pub ties: usize,
    pub win_rate: f64,
    pub avg_turns: f64,
    pub outcomes: Vec<SeedOutcome>,
}

impl SweepSummary {
    fn from_outcomes(outcomes: Vec<SeedOutcome>) -> Self {
        let matches = outcomes.len();
        let count = |side: Option<Side>| outcomes.iter().filter(|o| o.winner == side).count();
        let wins = count(Some(Side::Yours));
        let losses = count(Some(Side::Opponent));
        let ties = count(None);
        let total_turns: usize = outcomes.iter().map(|o| o.turns).sum();
        let (win_rate, avg_turns) = if matches == 0 {
            (0.0, 0.0)
        } else {
            (wins as f64 / matches as f64, total_turns as f64 / matches as f64)
        };
        Self {
            matches,
            wins,
            losses,
            ties,
            win_rate,
            avg_turns,
            outcomes,
        }
    }
}

fn play_seed(
    pairings: &[RoundPairing],
    seed: u64,
    rules: &CombatRules,
) -> Result<SeedOutcome, SweepError> {
    let mut decisions = SeededDecisions::new(seed);
    let report = play_match(pairings.to_vec(), &mut decisions, rules)
        .map_err(|source| SweepError::Match { seed, source })?;
    Ok(SeedOutcome {
        seed,
        winner: report.winner(),
        your_points: report.your_points,
        opponent_points: report.opponent_points,
        turns: report.events().count(),
    })
}

/// Play `count` matches with seeds `start_seed, start_seed + 1, ...`.
pub fn run_sweep(
    pairings: &[RoundPairing],
    start_seed: u64,
    count: u64,
    rules: &CombatRules,
    pool: &WorkerPool,
) -> Result<SweepSummary, SweepError> {
    debug!(start_seed, count, workers = ?pool.threads(), "sweep started");
    let outcomes = pool.install(|| {
        (0..count)
            .into_par_iter()
            .map(|offset| play_seed(pairings, start_seed.wrapping_add(offset), rules))
            .collect::<Result<Vec<_>, _>>()
    })??;
    Ok(SweepSummary::from_outcomes(outcomes))
}
