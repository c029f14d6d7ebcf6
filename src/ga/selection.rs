//! Selection strategies for the GA.
//!
//! Selection determines which members of the live population become
//! parents. Both strategies sample with replacement: the same member may be
//! picked any number of times in one generation.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel)
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use super::chromosome::Chromosome;
use super::error::{GaError, Result};
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// All strategies assume **maximization** (higher fitness = better).
///
/// # Examples
///
/// ```
/// use u_evolve::ga::Selection;
///
/// let sel = Selection::Roulette;
/// assert_eq!(Selection::default(), sel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Probability of selection is `f_i / Σf`. Fitness values must be
    /// non-negative and their sum positive; otherwise selection fails with
    /// [`GaError::DegenerateFitnessSum`].
    ///
    /// # Complexity
    /// O(n) per selection
    #[default]
    Roulette,

    /// Linear rank selection.
    ///
    /// Members are ordered by descending fitness (ties keep population
    /// order). The member at 0-based position `p` gets weight `S - p`, so the
    /// best of `S` members has weight `S` and the worst has weight `1`.
    /// Selection probability is `(S - p) / (S(S + 1) / 2)`.
    ///
    /// # Complexity
    /// O(n) per selection on a sorted population, O(n log n) otherwise
    Ranked,
}

impl Selection {
    /// Selects a parent index from the population.
    ///
    /// Every member must carry an evaluated fitness.
    pub fn select<R: Rng>(&self, population: &[Chromosome], rng: &mut R) -> Result<usize> {
        if population.is_empty() {
            return Err(GaError::EmptyPopulation);
        }
        let fitnesses = fitness_values(population)?;

        match self {
            Selection::Roulette => roulette(&fitnesses, rng),
            Selection::Ranked => Ok(ranked(&fitnesses, rng)),
        }
    }

    /// Short lowercase name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Selection::Roulette => "roulette",
            Selection::Ranked => "ranked",
        }
    }
}

fn fitness_values(population: &[Chromosome]) -> Result<Vec<f64>> {
    population
        .iter()
        .enumerate()
        .map(|(index, c)| c.fitness().ok_or(GaError::StaleFitness { index }))
        .collect()
}

/// Roulette wheel: walk the cumulative fitness until it reaches the draw.
fn roulette<R: Rng>(fitnesses: &[f64], rng: &mut R) -> Result<usize> {
    let total: f64 = fitnesses.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(GaError::DegenerateFitnessSum(total));
    }

    let last = fitnesses.len() - 1;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &f) in fitnesses.iter().enumerate() {
        cumulative += f;
        if cumulative >= threshold || i == last {
            return Ok(i);
        }
    }

    Ok(last)
}

/// Linear rank selection with weight `S - position`.
fn ranked<R: Rng>(fitnesses: &[f64], rng: &mut R) -> usize {
    let n = fitnesses.len();
    if n == 1 {
        return 0;
    }

    // Positions in descending-fitness order; stable so ties keep population order.
    let mut order: Vec<usize> = (0..n).collect();
    if !fitnesses.windows(2).all(|w| w[0] >= w[1]) {
        order.sort_by(|&a, &b| fitnesses[b].total_cmp(&fitnesses[a]));
    }

    let total = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (position, &index) in order.iter().enumerate() {
        cumulative += (n - position) as f64;
        if cumulative >= threshold {
            return index;
        }
    }

    order[n - 1]
}
