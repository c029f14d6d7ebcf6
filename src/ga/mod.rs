//! Genetic Algorithm core for bounded numeric chromosomes.
//!
//! A population of fixed-length chromosomes, each gene a real or integer
//! value inside a per-position inclusive bound, is evolved toward **higher**
//! fitness under a caller-supplied [`Evaluator`].
//!
//! # Key Types
//!
//! - [`Population`]: live generation, staging buffer, sort-order invariant
//! - [`Chromosome`] / [`Fragment`]: genes, cached fitness, lineage, cross-site
//! - [`Selection`], [`Crossover`], [`Replacement`]: closed strategy sets
//! - [`GaConfig`]: algorithm parameters (builder, presets, validation)
//! - [`GaRunner`]: one generational step or a full run
//!
//! # Submodules
//!
//! - [`crossover`]: one-point and uniform crossover
//! - [`mutation`]: per-gene uniform-reset mutation
//! - [`text`]: whitespace-delimited population save/load
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Whitley (1989), "The GENITOR Algorithm and Selection Pressure" (steady-state)

mod chromosome;
mod config;
pub mod crossover;
mod error;
pub mod mutation;
mod population;
mod replacement;
mod runner;
mod selection;
mod stats;
pub mod text;
mod types;

pub use chromosome::{Chromosome, Fragment};
pub use config::GaConfig;
pub use crossover::Crossover;
pub use error::{GaError, Result};
pub use population::Population;
pub use replacement::Replacement;
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use selection::Selection;
pub use stats::FitnessStats;
pub use types::{Evaluator, GeneBound, GeneMode};
