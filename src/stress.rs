//! Parallel stress checking using Rayon.
//!
//! Every sort invocation owns its array and log, so independent trials can run
//! on all cores at once. Each trial draws its input from its own `StdRng`
//! seeded with `seed + trial`, which keeps the outcome identical no matter how
//! Rayon schedules the work. A failing trial can be reproduced on its own from
//! the seed in its [`TrialFailure`].

use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::algorithm::Algorithm;
use crate::validation::{verify, ValidationError};

/// Parameters of a stress run.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of random arrays to generate.
    pub trials: usize,
    /// Largest array length; each trial picks a length in `0..=max_len`.
    pub max_len: usize,
    /// Values are drawn from `0..=max_value`. Small ranges force duplicates.
    pub max_value: u32,
    /// Base seed; trial `i` uses `seed + i`.
    pub seed: u64,
}

impl Default for StressConfig {
    fn default() -> Self {
        StressConfig {
            trials: 1000,
            max_len: 64,
            max_value: 9,
            seed: 0,
        }
    }
}

/// A trial whose result violated an invariant.
#[derive(Debug, Clone)]
pub struct TrialFailure {
    pub algorithm: Algorithm,
    pub seed: u64,
    pub input: Vec<u32>,
    pub error: ValidationError,
}

/// Aggregate outcome of [`run_trials`].
#[derive(Debug, Clone, Default)]
pub struct StressSummary {
    pub trials: usize,
    /// Total recorded steps per algorithm, in [`Algorithm::ALL`] order.
    pub total_steps: [usize; 4],
    pub failures: Vec<TrialFailure>,
}

impl StressSummary {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total steps recorded by `algorithm` across all trials.
    pub fn steps_for(&self, algorithm: Algorithm) -> usize {
        Algorithm::ALL
            .iter()
            .position(|&a| a == algorithm)
            .map_or(0, |i| self.total_steps[i])
    }

    fn merge(mut self, other: StressSummary) -> StressSummary {
        self.trials += other.trials;
        for (total, steps) in self.total_steps.iter_mut().zip(other.total_steps) {
            *total += steps;
        }
        self.failures.extend(other.failures);
        self
    }
}

/// Generate the input array for trial seed `seed`.
pub fn trial_input(config: &StressConfig, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let len = rng.gen_range(0..=config.max_len);
    (0..len).map(|_| rng.gen_range(0..=config.max_value)).collect()
}

fn run_trial(config: &StressConfig, seed: u64) -> StressSummary {
    let input = trial_input(config, seed);
    let mut summary = StressSummary {
        trials: 1,
        ..StressSummary::default()
    };

    for (slot, algorithm) in Algorithm::ALL.into_iter().enumerate() {
        let result = algorithm.sort(&input);
        summary.total_steps[slot] += result.steps();
        if let Err(error) = verify(&input, &result) {
            warn!("{} failed on seed {}: {}", algorithm, seed, error);
            summary.failures.push(TrialFailure {
                algorithm,
                seed,
                input: input.clone(),
                error,
            });
        }
    }

    summary
}

/// Run `config.trials` random trials in parallel, verifying every algorithm.
pub fn run_trials(config: &StressConfig) -> StressSummary {
    let mut summary = (0..config.trials as u64)
        .into_par_iter()
        .map(|trial| run_trial(config, config.seed.wrapping_add(trial)))
        .reduce(StressSummary::default, StressSummary::merge);

    // Reduction order is not fixed; report failures by seed.
    summary.failures.sort_by_key(|f| (f.seed, f.algorithm.id()));
    summary
}
