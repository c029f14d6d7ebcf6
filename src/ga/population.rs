//! The population container.
//!
//! A [`Population`] owns the live generation, the staging buffer for the
//! next one, the gene bounds shared by every member and the evaluation
//! function. The generational phases are exposed as separate methods, each
//! completing before the next starts:
//!
//! 1. [`select`](Population::select) fills the staging buffer with copies of
//!    selected members,
//! 2. [`crossover`](Population::crossover) recombines staged pairs,
//! 3. [`mutate`](Population::mutate) perturbs staged genes,
//! 4. [`replace`](Population::replace) evaluates the staged members and
//!    merges them into the live generation.
//!
//! When the population is sort-ordered, the live members are kept in
//! descending fitness order after every insertion and replacement.

use super::chromosome::Chromosome;
use super::config::GaConfig;
use super::crossover::Crossover;
use super::error::{GaError, Result};
use super::mutation::uniform_reset;
use super::replacement::Replacement;
use super::selection::Selection;
use super::stats::FitnessStats;
use super::types::{validate_bounds, Evaluator, GeneBound, GeneMode};
use log::debug;
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A generation of fixed-length chromosomes under evolution.
///
/// # Usage
///
/// ```
/// use u_evolve::ga::{GeneBound, Population};
/// use u_evolve::random::create_rng;
///
/// let mut pop = Population::new(10, 3);
/// pop.set_bounds(vec![GeneBound::new(0.0, 10.0); 3]).unwrap();
/// pop.set_evaluator(|genes: &[f64]| genes.iter().sum::<f64>());
/// pop.set_sorted(true);
/// pop.init(&mut create_rng(42)).unwrap();
///
/// assert_eq!(pop.members().len(), 10);
/// assert!(pop.is_fitness_ordered());
/// ```
pub struct Population {
    size: usize,
    chromosome_len: usize,
    bounds: Vec<GeneBound>,
    gene_mode: GeneMode,
    sorted: bool,
    parallel: bool,
    evaluator: Option<Arc<dyn Evaluator>>,
    members: Vec<Chromosome>,
    next_gen: Vec<Chromosome>,
    stats: Option<FitnessStats>,
    crossover_count: usize,
    mutation_count: usize,
}

impl fmt::Debug for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Population")
            .field("size", &self.size)
            .field("chromosome_len", &self.chromosome_len)
            .field("bounds", &self.bounds)
            .field("gene_mode", &self.gene_mode)
            .field("sorted", &self.sorted)
            .field("parallel", &self.parallel)
            .field("has_evaluator", &self.evaluator.is_some())
            .field("members", &self.members.len())
            .field("staged", &self.next_gen.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl Population {
    /// Creates an empty population of logical size `size` whose chromosomes
    /// have `chromosome_len` genes.
    ///
    /// Bounds and an evaluator must be set before [`init`](Self::init).
    pub fn new(size: usize, chromosome_len: usize) -> Self {
        Self {
            size,
            chromosome_len,
            bounds: Vec::new(),
            gene_mode: GeneMode::Real,
            sorted: false,
            parallel: false,
            evaluator: None,
            members: Vec::with_capacity(2 * size),
            next_gen: Vec::with_capacity(size),
            stats: None,
            crossover_count: 0,
            mutation_count: 0,
        }
    }

    /// Creates an uninitialized population from a validated configuration.
    ///
    /// Replacement and operator settings stay in the config; they are passed
    /// to the phase methods by [`GaRunner`](super::GaRunner).
    pub fn from_config(config: &GaConfig) -> Result<Self> {
        config.validate()?;
        let mut pop = Self::new(config.population_size, config.chromosome_length);
        pop.bounds = config.bounds.clone();
        pop.gene_mode = config.gene_mode;
        pop.sorted = config.sorted;
        pop.parallel = config.parallel;
        Ok(pop)
    }

    /// Rebuilds a population from saved parts.
    ///
    /// The logical size is `members.len()` and the chromosome length is
    /// `bounds.len()`. Members keep whatever fitness they carry. The result
    /// is unsorted and has no evaluator. Bounds are checked as real-valued
    /// bounds; integer mode is checked again by [`init`](Self::init).
    pub fn from_parts(bounds: Vec<GeneBound>, members: Vec<Chromosome>) -> Result<Self> {
        let len = bounds.len();
        validate_bounds(&bounds, len, GeneMode::Real)?;
        if let Some((index, c)) = members.iter().enumerate().find(|(_, c)| c.len() != len) {
            return Err(GaError::ChromosomeLengthMismatch {
                index,
                expected: len,
                actual: c.len(),
            });
        }
        let mut pop = Self::new(members.len(), len);
        pop.bounds = bounds;
        pop.members = members;
        Ok(pop)
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// Sets the per-gene bounds.
    ///
    /// Fails without changing anything if the count differs from the
    /// chromosome length.
    pub fn set_bounds(&mut self, bounds: Vec<GeneBound>) -> Result<()> {
        if bounds.len() != self.chromosome_len {
            return Err(GaError::BoundsLengthMismatch {
                expected: self.chromosome_len,
                actual: bounds.len(),
            });
        }
        self.bounds = bounds;
        Ok(())
    }

    /// Sets the bounds from separate lower and upper range vectors.
    pub fn set_ranges(&mut self, min_ranges: &[f64], max_ranges: &[f64]) -> Result<()> {
        self.check_range_len(min_ranges)?;
        self.check_range_len(max_ranges)?;
        self.bounds = min_ranges
            .iter()
            .zip(max_ranges)
            .map(|(&min, &max)| GeneBound::new(min, max))
            .collect();
        Ok(())
    }

    /// Sets only the lower bound of every gene.
    ///
    /// Upper bounds not yet set start at `0.0`.
    pub fn set_min_ranges(&mut self, min_ranges: &[f64]) -> Result<()> {
        self.check_range_len(min_ranges)?;
        self.fill_missing_bounds();
        for (bound, &min) in self.bounds.iter_mut().zip(min_ranges) {
            bound.min = min;
        }
        Ok(())
    }

    /// Sets only the upper bound of every gene.
    ///
    /// Lower bounds not yet set start at `0.0`.
    pub fn set_max_ranges(&mut self, max_ranges: &[f64]) -> Result<()> {
        self.check_range_len(max_ranges)?;
        self.fill_missing_bounds();
        for (bound, &max) in self.bounds.iter_mut().zip(max_ranges) {
            bound.max = max;
        }
        Ok(())
    }

    fn check_range_len(&self, ranges: &[f64]) -> Result<()> {
        if ranges.len() != self.chromosome_len {
            return Err(GaError::BoundsLengthMismatch {
                expected: self.chromosome_len,
                actual: ranges.len(),
            });
        }
        Ok(())
    }

    fn fill_missing_bounds(&mut self) {
        if self.bounds.len() != self.chromosome_len {
            self.bounds = vec![GeneBound::new(0.0, 0.0); self.chromosome_len];
        }
    }

    /// Sets the evaluation function.
    pub fn set_evaluator<E: Evaluator + 'static>(&mut self, evaluator: E) {
        self.evaluator = Some(Arc::new(evaluator));
    }

    /// Shares an existing evaluation function.
    pub fn set_shared_evaluator(&mut self, evaluator: Arc<dyn Evaluator>) {
        self.evaluator = Some(evaluator);
    }

    /// Selects real or integer gene sampling.
    pub fn set_gene_mode(&mut self, mode: GeneMode) {
        self.gene_mode = mode;
    }

    /// Turns sort-order enforcement on or off.
    ///
    /// Turning it on evaluates stale live members if an evaluator is set,
    /// then stably sorts them by descending fitness. Members that stay stale
    /// sort last and are put in place once they are evaluated.
    pub fn set_sorted(&mut self, sorted: bool) {
        if sorted && !self.sorted {
            if let Some(evaluator) = self.evaluator.as_deref() {
                evaluate_stale(&mut self.members, evaluator, self.parallel);
            }
            sort_descending(&mut self.members);
        }
        self.sorted = sorted;
    }

    /// Evaluates stale members in parallel when the `parallel` feature is
    /// enabled. Without the feature this flag has no effect.
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Logical population size `S`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Genes per chromosome `N`.
    pub fn chromosome_len(&self) -> usize {
        self.chromosome_len
    }

    /// Per-gene bounds, one per position.
    pub fn bounds(&self) -> &[GeneBound] {
        &self.bounds
    }

    /// Real or integer gene sampling.
    pub fn gene_mode(&self) -> GeneMode {
        self.gene_mode
    }

    /// Returns `true` if sort-order enforcement is on.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Live members, in descending fitness order if sorted.
    pub fn members(&self) -> &[Chromosome] {
        &self.members
    }

    /// Live member at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&Chromosome> {
        self.members.get(index)
    }

    /// The staged next generation.
    pub fn next_generation(&self) -> &[Chromosome] {
        &self.next_gen
    }

    /// Crossovers applied by the last [`crossover`](Self::crossover) call.
    pub fn crossover_count(&self) -> usize {
        self.crossover_count
    }

    /// Genes resampled by the last [`mutate`](Self::mutate) call.
    pub fn mutation_count(&self) -> usize {
        self.mutation_count
    }

    /// Statistics from the last [`evaluate`](Self::evaluate) call, cleared by
    /// any change to the live members.
    pub fn stats(&self) -> Option<FitnessStats> {
        self.stats
    }

    /// Returns `true` if live fitness never increases from one position to
    /// the next.
    pub fn is_fitness_ordered(&self) -> bool {
        self.members
            .windows(2)
            .all(|w| w[0].fitness_cmp(&w[1]) != Ordering::Less)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Creates and evaluates `S` random members, replacing any live ones.
    ///
    /// Fails without changing anything if the bounds do not match the
    /// chromosome length or are unusable, or if no evaluator is set.
    pub fn init<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        validate_bounds(&self.bounds, self.chromosome_len, self.gene_mode)?;
        let evaluator = self.evaluator.clone().ok_or(GaError::MissingEvaluator)?;

        let mut fresh: Vec<Chromosome> = (0..self.size)
            .map(|_| Chromosome::random(&self.bounds, self.gene_mode, rng))
            .collect();
        evaluate_stale(&mut fresh, &*evaluator, self.parallel);

        let mut members = Vec::with_capacity(2 * self.size);
        for c in fresh {
            if self.sorted {
                insert_sorted(&mut members, c);
            } else {
                members.push(c);
            }
        }

        self.members = members;
        self.next_gen.clear();
        self.stats = None;
        self.crossover_count = 0;
        self.mutation_count = 0;
        debug!(
            "initialized population: size={}, genes={}, sorted={}",
            self.size, self.chromosome_len, self.sorted
        );
        Ok(())
    }

    /// Evaluates stale live members and recomputes aggregate statistics.
    ///
    /// The average divides by the live member count, which equals `S` once
    /// the population is initialized.
    pub fn evaluate(&mut self) -> Result<FitnessStats> {
        self.evaluate_live()?;
        let stats = FitnessStats::from_members(&self.members)?;
        self.stats = Some(stats);
        Ok(stats)
    }

    /// Genes of the first live member whose fitness equals the maximum from
    /// the last [`evaluate`](Self::evaluate) call.
    pub fn best_fit(&self) -> Option<&[f64]> {
        self.best().map(Chromosome::genes)
    }

    /// The first live member whose fitness equals the cached maximum.
    pub fn best(&self) -> Option<&Chromosome> {
        let max = self.stats?.max;
        self.members.iter().find(|c| c.fitness() == Some(max))
    }

    // ------------------------------------------------------------------
    // Generational phases
    // ------------------------------------------------------------------

    /// Clears the staging buffer and fills it with copies of selected
    /// members.
    ///
    /// `count` is rounded up to an even number since members are drawn in
    /// pairs. Each copy records its source index as both parents and has no
    /// cross-site.
    pub fn select<R: Rng>(&mut self, selection: Selection, count: usize, rng: &mut R) -> Result<()> {
        self.next_gen.clear();
        self.evaluate_live()?;

        let draws = count.div_ceil(2) * 2;
        let mut staged = Vec::with_capacity(draws);
        for _ in 0..draws {
            let index = selection.select(&self.members, rng)?;
            let mut c = self.members[index].clone();
            c.set_parents(Some(index), Some(index));
            c.set_cross_site(None);
            staged.push(c);
        }
        self.next_gen = staged;
        Ok(())
    }

    /// Recombines consecutive staged pairs.
    ///
    /// Each pair is crossed iff a draw `u ∈ [0, 1)` satisfies `u < rate`.
    /// Returns the number of pairs crossed.
    pub fn crossover<R: Rng>(&mut self, crossover: Crossover, rate: f64, rng: &mut R) -> usize {
        let mut count = 0;
        for pair in self.next_gen.chunks_exact_mut(2) {
            if rng.random::<f64>() < rate {
                let (first, second) = crossover.apply(&pair[0], &pair[1], rng);
                pair[0] = first;
                pair[1] = second;
                count += 1;
            }
        }
        self.crossover_count = count;
        count
    }

    /// Mutates every staged member; returns the number of genes resampled.
    pub fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) -> usize {
        let mut count = 0;
        for c in &mut self.next_gen {
            count += uniform_reset(c, &self.bounds, self.gene_mode, rate, rng);
        }
        self.mutation_count = count;
        count
    }

    /// Evaluates the staged generation, then merges it into the live one.
    ///
    /// Fails without changing the live members if the strategy's
    /// preconditions do not hold or an evaluator is needed but missing.
    pub fn replace(&mut self, replacement: Replacement) -> Result<()> {
        replacement.check(self.sorted, self.size, self.next_gen.len())?;
        if replacement.requires_sorted() {
            self.evaluate_live()?;
        }
        if !self.next_gen.iter().all(Chromosome::is_evaluated) {
            let evaluator = self.evaluator.as_deref().ok_or(GaError::MissingEvaluator)?;
            evaluate_stale(&mut self.next_gen, evaluator, self.parallel);
        }

        let staged = std::mem::take(&mut self.next_gen);
        let inserted = replacement.merge(&mut self.members, staged, self.size, self.sorted);
        self.stats = None;
        debug!(
            "{} replacement: {} offspring merged, {} live",
            replacement.name(),
            inserted,
            self.members.len()
        );
        Ok(())
    }

    fn evaluate_live(&mut self) -> Result<()> {
        if self.members.iter().all(Chromosome::is_evaluated) {
            return Ok(());
        }
        let evaluator = self.evaluator.as_deref().ok_or(GaError::MissingEvaluator)?;
        evaluate_stale(&mut self.members, evaluator, self.parallel);
        if self.sorted {
            sort_descending(&mut self.members);
        }
        Ok(())
    }
}

/// Stable sort by descending fitness; stale members go last.
fn sort_descending(members: &mut [Chromosome]) {
    members.sort_by(|a, b| b.fitness_cmp(a));
}

/// Inserts an evaluated chromosome after every member with greater or equal
/// fitness.
///
/// Keeps a descending sequence descending; among equal fitness values the
/// earlier-inserted member stays first.
pub(crate) fn insert_sorted(members: &mut Vec<Chromosome>, chromosome: Chromosome) {
    let position = members.partition_point(|m| m.fitness_cmp(&chromosome) != Ordering::Less);
    members.insert(position, chromosome);
}

#[cfg(feature = "parallel")]
fn evaluate_stale(members: &mut [Chromosome], evaluator: &dyn Evaluator, parallel: bool) {
    use rayon::prelude::*;

    if parallel {
        members
            .par_iter_mut()
            .filter(|c| !c.is_evaluated())
            .for_each(|c| {
                c.evaluate(evaluator);
            });
    } else {
        for c in members.iter_mut() {
            c.evaluate(evaluator);
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_stale(members: &mut [Chromosome], evaluator: &dyn Evaluator, _parallel: bool) {
    for c in members.iter_mut() {
        c.evaluate(evaluator);
    }
}
