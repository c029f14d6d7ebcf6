//! Aggregate fitness statistics over a live population.

use super::chromosome::Chromosome;
use super::error::{GaError, Result};

/// Sum, average, minimum and maximum fitness of one generation.
///
/// Derived by an explicit evaluation pass; never maintained incrementally.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessStats {
    pub sum: f64,
    /// `sum / member count`.
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl FitnessStats {
    /// Computes statistics over evaluated members.
    pub fn from_members(members: &[Chromosome]) -> Result<Self> {
        if members.is_empty() {
            return Err(GaError::EmptyPopulation);
        }

        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (index, c) in members.iter().enumerate() {
            let f = c.fitness().ok_or(GaError::StaleFitness { index })?;
            sum += f;
            min = min.min(f);
            max = max.max(f);
        }

        Ok(Self {
            sum,
            average: sum / members.len() as f64,
            min,
            max,
        })
    }
}
