//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the evolutionary process:
//! initialization → (selection → crossover → mutation → replacement →
//! statistics) per generation.

use super::config::GaConfig;
use super::error::Result;
use super::population::Population;
use super::stats::FitnessStats;
use super::types::Evaluator;
use crate::random::rng_from_seed;
use log::{debug, info};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Statistics for one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation number; 0 is the initial population.
    pub generation: usize,

    /// Fitness statistics of the live population after replacement.
    pub fitness: FitnessStats,

    /// Pairs crossed in this generation.
    pub crossovers: usize,

    /// Genes resampled by mutation in this generation.
    pub mutations: usize,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Genes of the best chromosome seen during the run.
    pub best_genes: Vec<f64>,

    /// Fitness of `best_genes`.
    pub best_fitness: f64,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run was terminated due to stagnation.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Statistics of the initial population and of each generation.
    pub history: Vec<GenerationStats>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_evolve::ga::{GaConfig, GaRunner};
///
/// // Maximize the sum of five genes in [0, 1].
/// let config = GaConfig::uniform_bounds(5, 0.0, 1.0)
///     .with_population_size(30)
///     .with_max_generations(20)
///     .with_seed(42);
/// let result = GaRunner::run(|genes: &[f64]| genes.iter().sum::<f64>(), &config).unwrap();
/// assert!(result.best_fitness > 2.5);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    pub fn run<E: Evaluator + 'static>(evaluator: E, config: &GaConfig) -> Result<GaResult> {
        Self::run_with_cancel(evaluator, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA will
    /// stop before the next generation and return the best solution found
    /// so far.
    pub fn run_with_cancel<E: Evaluator + 'static>(
        evaluator: E,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        let mut rng = rng_from_seed(config.seed);

        // 1. Initialize and evaluate
        let mut population = Population::from_config(config)?;
        population.set_evaluator(evaluator);
        population.init(&mut rng)?;

        let initial = population.evaluate()?;
        let mut history = Vec::with_capacity(config.max_generations + 1);
        history.push(GenerationStats {
            generation: 0,
            fitness: initial,
            crossovers: 0,
            mutations: 0,
        });

        // 2. Track best
        let mut best_genes = population.best_fit().unwrap_or_default().to_vec();
        let mut best_fitness = initial.max;
        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;

        // 3. Evolutionary loop
        for gen in 1..=config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let stats = Self::step(&mut population, config, &mut rng)?;
            history.push(GenerationStats {
                generation: gen,
                ..stats
            });

            if stats.fitness.max > best_fitness {
                best_fitness = stats.fitness.max;
                best_genes = population.best_fit().unwrap_or_default().to_vec();
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            debug!(
                "generation {gen}: max={:.6} avg={:.6} min={:.6} crossovers={} mutations={}",
                stats.fitness.max,
                stats.fitness.average,
                stats.fitness.min,
                stats.crossovers,
                stats.mutations
            );

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        let generations = history.len() - 1;
        info!(
            "GA finished after {generations} generations: best fitness {best_fitness} \
             (stagnated={stagnated}, cancelled={cancelled})"
        );

        Ok(GaResult {
            best_genes,
            best_fitness,
            generations,
            stagnated,
            cancelled,
            history,
        })
    }

    /// Runs one generation on an initialized population.
    ///
    /// Selection, crossover, mutation and replacement run in strict order,
    /// then the live population is evaluated. The returned `generation`
    /// field is 0; callers that count generations fill it in.
    pub fn step<R: Rng>(
        population: &mut Population,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GenerationStats> {
        population.select(config.selection, config.effective_offspring_count(), rng)?;
        let crossovers = population.crossover(config.crossover, config.crossover_rate, rng);
        let mutations = population.mutate(config.mutation_rate, rng);
        population.replace(config.replacement)?;
        let fitness = population.evaluate()?;

        Ok(GenerationStats {
            generation: 0,
            fitness,
            crossovers,
            mutations,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
