//! GA configuration.
//!
//! [`GaConfig`] holds every parameter of the evolutionary loop: the shape
//! of the population, the operator choices and rates, and termination.

use super::crossover::Crossover;
use super::error::{GaError, Result};
use super::replacement::Replacement;
use super::selection::Selection;
use super::types::{validate_bounds, GeneBound, GeneMode};

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_evolve::ga::{GaConfig, GeneBound};
///
/// let config = GaConfig::new(vec![GeneBound::new(0.0, 1.0); 8]);
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.chromosome_length, 8);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_evolve::ga::{Crossover, GaConfig, Replacement, Selection};
///
/// let config = GaConfig::uniform_bounds(10, -5.0, 5.0)
///     .with_population_size(60)
///     .with_selection(Selection::Ranked)
///     .with_crossover(Crossover::Uniform)
///     .with_replacement(Replacement::SteadyState)
///     .with_sorted(true)
///     .with_offspring_count(10)
///     .with_mutation_rate(0.05);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of live chromosomes `S`.
    pub population_size: usize,

    /// Genes per chromosome `N`. Must equal `bounds.len()`.
    pub chromosome_length: usize,

    /// Inclusive range of each gene position.
    pub bounds: Vec<GeneBound>,

    /// Real or integer gene sampling.
    pub gene_mode: GeneMode,

    /// Keep live members in descending fitness order.
    ///
    /// Required by the steady-state replacement strategies.
    pub sorted: bool,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Crossover operator applied to selected pairs.
    pub crossover: Crossover,

    /// Probability of crossing a selected pair (0.0–1.0).
    pub crossover_rate: f64,

    /// Per-gene probability of resampling a staged gene (0.0–1.0).
    pub mutation_rate: f64,

    /// How staged offspring are merged into the live population.
    pub replacement: Replacement,

    /// Offspring produced per generation.
    ///
    /// `None` produces one full population's worth. Always rounded up to an
    /// even number. Generational replacement needs at least
    /// `population_size`.
    pub offspring_count: Option<usize>,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Generations without a new best fitness before stopping.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Whether to evaluate chromosomes in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    /// A configuration without bounds; set them before use.
    fn default() -> Self {
        Self {
            population_size: 100,
            chromosome_length: 0,
            bounds: Vec::new(),
            gene_mode: GeneMode::Real,
            sorted: false,
            selection: Selection::default(),
            crossover: Crossover::default(),
            crossover_rate: 0.9,
            mutation_rate: 0.01,
            replacement: Replacement::default(),
            offspring_count: None,
            max_generations: 500,
            stagnation_limit: 50,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Creates a default configuration for the given gene bounds.
    pub fn new(bounds: Vec<GeneBound>) -> Self {
        Self::default().with_bounds(bounds)
    }

    /// Creates a default configuration with `len` genes sharing one bound.
    pub fn uniform_bounds(len: usize, min: f64, max: f64) -> Self {
        Self::new(vec![GeneBound::new(min, max); len])
    }

    /// Sets the gene bounds and the chromosome length to match.
    pub fn with_bounds(mut self, bounds: Vec<GeneBound>) -> Self {
        self.chromosome_length = bounds.len();
        self.bounds = bounds;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets real or integer gene sampling.
    pub fn with_gene_mode(mut self, mode: GeneMode) -> Self {
        self.gene_mode = mode;
        self
    }

    /// Enables or disables descending-fitness order of live members.
    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the replacement strategy.
    ///
    /// Steady-state strategies also need [`with_sorted(true)`](Self::with_sorted).
    pub fn with_replacement(mut self, replacement: Replacement) -> Self {
        self.replacement = replacement;
        self
    }

    /// Sets the number of offspring per generation.
    pub fn with_offspring_count(mut self, n: usize) -> Self {
        self.offspring_count = Some(n);
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Offspring staged per generation after defaulting and rounding up to
    /// whole pairs.
    pub fn effective_offspring_count(&self) -> usize {
        self.offspring_count
            .unwrap_or(self.population_size)
            .div_ceil(2)
            * 2
    }

    /// Preset for fast optimization: small population, few generations.
    ///
    /// - Population: 50, Generations: 100, Stagnation limit: 20
    pub fn fast(bounds: Vec<GeneBound>) -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            stagnation_limit: 20,
            ..Self::new(bounds)
        }
    }

    /// Preset for balanced optimization.
    ///
    /// - Population: 100, Generations: 300, Stagnation limit: 50
    pub fn balanced(bounds: Vec<GeneBound>) -> Self {
        Self {
            population_size: 100,
            max_generations: 300,
            stagnation_limit: 50,
            ..Self::new(bounds)
        }
    }

    /// Preset for quality optimization: large sorted population kept by
    /// steady-state replacement, many generations.
    ///
    /// - Population: 150, Generations: 500, Stagnation limit: 80
    /// - Sorted, steady-state without duplicates, 30 offspring per generation
    pub fn quality(bounds: Vec<GeneBound>) -> Self {
        Self {
            population_size: 150,
            max_generations: 500,
            stagnation_limit: 80,
            sorted: true,
            replacement: Replacement::SteadyStateNoDuplicates,
            offspring_count: Some(30),
            ..Self::new(bounds)
        }
    }

    /// Automatically selects a preset based on chromosome length.
    ///
    /// - `len < 10` → [`fast()`](Self::fast)
    /// - `10 ≤ len < 50` → [`balanced()`](Self::balanced)
    /// - `len ≥ 50` → [`quality()`](Self::quality)
    pub fn auto_select(bounds: Vec<GeneBound>) -> Self {
        match bounds.len() {
            0..=9 => Self::fast(bounds),
            10..=49 => Self::balanced(bounds),
            _ => Self::quality(bounds),
        }
    }

    /// Validates the configuration.
    ///
    /// Bound problems are reported with the same errors as
    /// [`Population::init`](super::Population::init); everything else as
    /// [`GaError::InvalidConfig`].
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(invalid("population_size must be at least 2"));
        }
        if self.chromosome_length == 0 {
            return Err(invalid("chromosome_length must be at least 1"));
        }
        validate_bounds(&self.bounds, self.chromosome_length, self.gene_mode)?;
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(invalid("crossover_rate must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid("mutation_rate must be within [0, 1]"));
        }
        if self.max_generations == 0 {
            return Err(invalid("max_generations must be at least 1"));
        }
        if self.offspring_count == Some(0) {
            return Err(invalid("offspring_count must be positive or None"));
        }
        if self.replacement.requires_sorted() && !self.sorted {
            return Err(GaError::InvalidConfig(format!(
                "{} replacement requires sorted = true",
                self.replacement.name()
            )));
        }
        if self.replacement == Replacement::Generational
            && self.effective_offspring_count() < self.population_size
        {
            return Err(invalid(
                "generational replacement needs offspring_count >= population_size",
            ));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> GaError {
    GaError::InvalidConfig(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(n: usize) -> Vec<GeneBound> {
        vec![GeneBound::new(0.0, 1.0); n]
    }

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 500);
        assert_eq!(config.selection, Selection::Roulette);
        assert_eq!(config.crossover, Crossover::OnePoint);
        assert_eq!(config.replacement, Replacement::Generational);
        assert!((config.crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.mutation_rate - 0.01).abs() < 1e-10);
        assert_eq!(config.stagnation_limit, 50);
        assert!(!config.sorted);
        assert!(config.seed.is_none());
        // No bounds yet.
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::new(bounds(4))
            .with_population_size(200)
            .with_max_generations(1000)
            .with_selection(Selection::Ranked)
            .with_crossover(Crossover::Uniform)
            .with_crossover_rate(0.8)
            .with_mutation_rate(0.05)
            .with_gene_mode(GeneMode::Integer)
            .with_stagnation_limit(100)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.chromosome_length, 4);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.selection, Selection::Ranked);
        assert_eq!(config.crossover, Crossover::Uniform);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.gene_mode, GeneMode::Integer);
        assert_eq!(config.stagnation_limit, 100);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_clamp_rates() {
        let config = GaConfig::new(bounds(1))
            .with_crossover_rate(-0.5)
            .with_mutation_rate(2.0);
        assert!((config.crossover_rate - 0.0).abs() < 1e-10);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_validate_rejects_direct_field_errors() {
        let mut config = GaConfig::new(bounds(2));
        config.mutation_rate = 1.5;
        assert!(matches!(config.validate(), Err(GaError::InvalidConfig(_))));

        let mut config = GaConfig::new(bounds(2));
        config.chromosome_length = 3;
        assert!(matches!(
            config.validate(),
            Err(GaError::BoundsLengthMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = GaConfig::new(bounds(2)).with_population_size(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = GaConfig::new(bounds(2)).with_max_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_steady_state_needs_sorted() {
        let config = GaConfig::new(bounds(2))
            .with_replacement(Replacement::SteadyState)
            .with_offspring_count(4);
        assert!(config.validate().is_err());
        assert!(config.with_sorted(true).validate().is_ok());
    }

    #[test]
    fn test_validate_generational_offspring() {
        let config = GaConfig::new(bounds(2))
            .with_population_size(10)
            .with_offspring_count(6);
        assert!(config.validate().is_err());
        // 9 rounds up to 10.
        let config = config.with_offspring_count(9);
        assert!(config.validate().is_ok());
        assert_eq!(config.effective_offspring_count(), 10);
    }

    #[test]
    fn test_validate_integer_bounds() {
        let config = GaConfig::uniform_bounds(3, 0.1, 0.9).with_gene_mode(GeneMode::Integer);
        assert!(matches!(
            config.validate(),
            Err(GaError::EmptyIntegerBound { index: 0, .. })
        ));
    }

    #[test]
    fn test_effective_offspring_count_default() {
        let config = GaConfig::new(bounds(1)).with_population_size(7);
        assert_eq!(config.effective_offspring_count(), 8);
    }

    // ---- Presets ----

    #[test]
    fn test_preset_fast() {
        let config = GaConfig::fast(bounds(5));
        assert_eq!(config.population_size, 50);
        assert_eq!(config.max_generations, 100);
        assert_eq!(config.stagnation_limit, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_balanced() {
        let config = GaConfig::balanced(bounds(5));
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_quality() {
        let config = GaConfig::quality(bounds(5));
        assert_eq!(config.population_size, 150);
        assert!(config.sorted);
        assert_eq!(config.replacement, Replacement::SteadyStateNoDuplicates);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_chainable() {
        let config = GaConfig::fast(bounds(3)).with_population_size(75).with_seed(42);
        assert_eq!(config.population_size, 75);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.stagnation_limit, 20);
    }

    #[test]
    fn test_auto_select_boundaries() {
        assert_eq!(GaConfig::auto_select(bounds(9)).population_size, 50);
        assert_eq!(GaConfig::auto_select(bounds(10)).population_size, 100);
        assert_eq!(GaConfig::auto_select(bounds(49)).population_size, 100);
        assert_eq!(GaConfig::auto_select(bounds(50)).population_size, 150);
    }
}
