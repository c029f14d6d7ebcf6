//! Evolutionary search over bounded numeric chromosomes.
//!
//! Provides the core of a classic genetic algorithm:
//!
//! - **Population**: fixed-size generation of fixed-length chromosomes with
//!   per-gene `[min, max]` bounds, optional descending-fitness ordering, and
//!   a staging buffer for the next generation.
//! - **Operators**: roulette and ranked selection, one-point and uniform
//!   crossover, per-gene uniform-reset mutation.
//! - **Replacement**: generational, steady-state, and steady-state without
//!   duplicate fitness values.
//! - **Driver**: single-step and full-run execution with fitness statistics.
//!
//! # Architecture
//!
//! Everything randomized takes an explicit `&mut impl rand::Rng`, so runs are
//! reproducible from a seed (see [`random::create_rng`]). Fitness evaluation
//! is the only phase that may run in parallel (`parallel` feature, rayon);
//! selection, crossover, mutation and replacement are sequential.
//!
//! # Example
//!
//! ```
//! use u_evolve::ga::{GaConfig, GaRunner, Replacement, Selection};
//!
//! let config = GaConfig::uniform_bounds(4, -5.0, 5.0)
//!     .with_population_size(40)
//!     .with_selection(Selection::Ranked)
//!     .with_replacement(Replacement::SteadyState)
//!     .with_sorted(true)
//!     .with_offspring_count(10)
//!     .with_max_generations(30)
//!     .with_seed(42);
//!
//! let result = GaRunner::run(
//!     |x: &[f64]| -x.iter().map(|v| v * v).sum::<f64>(),
//!     &config,
//! )
//! .unwrap();
//! assert!(result.best_fitness <= 0.0);
//! ```

pub mod ga;
pub mod random;
