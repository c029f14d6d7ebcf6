//! Error type for the GA core.

use thiserror::Error;

/// Failures reported by population setup, replacement, selection and the
/// text codec.
///
/// Every operation that returns a `GaError` leaves the population it was
/// called on unchanged.
#[derive(Debug, Error)]
pub enum GaError {
    #[error("expected {expected} gene bounds, got {actual}")]
    BoundsLengthMismatch { expected: usize, actual: usize },

    #[error("gene bound {index} is inverted: min {min} > max {max}")]
    InvalidBound { index: usize, min: f64, max: f64 },

    #[error("gene bound {index} [{min}, {max}] contains no integer")]
    EmptyIntegerBound { index: usize, min: f64, max: f64 },

    #[error("chromosome {index} has {actual} genes, expected {expected}")]
    ChromosomeLengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("evaluation function has not been set")]
    MissingEvaluator,

    #[error("{strategy} replacement requires a sort-ordered population")]
    UnsortedPopulation { strategy: &'static str },

    #[error("generational replacement needs {required} offspring, only {staged} staged")]
    InsufficientOffspring { required: usize, staged: usize },

    #[error("roulette selection requires a positive finite fitness sum, got {0}")]
    DegenerateFitnessSum(f64),

    #[error("fitness of member {index} is stale")]
    StaleFitness { index: usize },

    #[error("population is empty")]
    EmptyPopulation,

    #[error("gene index {index} out of range for chromosome of length {len}")]
    GeneIndexOutOfRange { index: usize, len: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed population text at token {token}: {message}")]
    Parse { token: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the GA core.
pub type Result<T> = std::result::Result<T, GaError>;
