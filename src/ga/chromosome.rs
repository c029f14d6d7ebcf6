//! Fixed-length chromosomes with cached fitness and lineage.
//!
//! A [`Chromosome`] owns its gene values, an optional cached fitness, the
//! indices of the two parents it was bred from, and the cut position of the
//! crossover that produced it. Writing a gene clears the cached fitness in
//! the same call, so a stale value can never be read as valid.
//!
//! [`Fragment`]s are independent copies of a contiguous gene range. Two
//! fragments that together tile `[0, len)` can be joined back into a
//! chromosome; crossover operators build offspring this way.

use super::error::{GaError, Result};
use super::types::{Evaluator, GeneBound, GeneMode};
use rand::Rng;
use std::cmp::Ordering;
use std::ops::Range;

/// One candidate solution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    genes: Vec<f64>,
    fitness: Option<f64>,
    parents: [Option<usize>; 2],
    cross_site: Option<usize>,
}

impl Chromosome {
    /// Creates an unevaluated chromosome with the given genes and no lineage.
    pub fn from_genes(genes: Vec<f64>) -> Self {
        Self {
            genes,
            fitness: None,
            parents: [None, None],
            cross_site: None,
        }
    }

    /// Creates a chromosome with every gene sampled from its bound.
    ///
    /// The chromosome length is `bounds.len()`.
    pub fn random<R: Rng>(bounds: &[GeneBound], mode: GeneMode, rng: &mut R) -> Self {
        Self::from_genes(bounds.iter().map(|b| b.sample(mode, rng)).collect())
    }

    /// Resamples every gene from its bound and clears the cached fitness.
    ///
    /// # Panics
    /// Panics if `bounds.len()` differs from the chromosome length.
    pub fn randomize<R: Rng>(&mut self, bounds: &[GeneBound], mode: GeneMode, rng: &mut R) {
        assert_eq!(
            bounds.len(),
            self.genes.len(),
            "one bound per gene is required"
        );
        for (gene, bound) in self.genes.iter_mut().zip(bounds) {
            *gene = bound.sample(mode, rng);
        }
        self.fitness = None;
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// The gene values.
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// Consumes the chromosome, returning its genes.
    pub fn into_genes(self) -> Vec<f64> {
        self.genes
    }

    /// Returns the gene at `index`, or `None` if out of range.
    pub fn gene(&self, index: usize) -> Option<f64> {
        self.genes.get(index).copied()
    }

    /// Writes one gene and invalidates the cached fitness.
    pub fn set_gene(&mut self, index: usize, value: f64) -> Result<()> {
        let len = self.genes.len();
        let slot = self
            .genes
            .get_mut(index)
            .ok_or(GaError::GeneIndexOutOfRange { index, len })?;
        *slot = value;
        self.fitness = None;
        Ok(())
    }

    /// Mutable gene access for in-crate operators. Invalidates the cached
    /// fitness up front.
    pub(crate) fn genes_mut(&mut self) -> &mut [f64] {
        self.fitness = None;
        &mut self.genes
    }

    /// Cached fitness, or `None` if the chromosome is unevaluated or stale.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Returns `true` if a valid fitness is cached.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Marks the cached fitness as stale.
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    /// Restores a fitness computed earlier for exactly these genes.
    ///
    /// Used when reloading a saved population; the value is trusted as-is.
    pub fn restore_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Returns the cached fitness, computing and caching it first if stale.
    pub fn evaluate<E: Evaluator + ?Sized>(&mut self, evaluator: &E) -> f64 {
        match self.fitness {
            Some(f) => f,
            None => {
                let f = evaluator.evaluate(&self.genes);
                self.fitness = Some(f);
                f
            }
        }
    }

    /// Copies the genes in `range` into an independent fragment.
    ///
    /// # Panics
    /// Panics if `range` is out of bounds, like slice indexing.
    pub fn slice(&self, range: Range<usize>) -> Fragment {
        Fragment {
            start: range.start,
            genes: self.genes[range].to_vec(),
        }
    }

    /// Parent identifiers (indices into the generation this was bred from).
    pub fn parents(&self) -> [Option<usize>; 2] {
        self.parents
    }

    /// Sets both parent identifiers.
    pub fn set_parents(&mut self, first: Option<usize>, second: Option<usize>) {
        self.parents = [first, second];
    }

    /// Gene index at which the producing crossover cut, if any.
    pub fn cross_site(&self) -> Option<usize> {
        self.cross_site
    }

    /// Records the crossover cut, or clears it with `None`.
    pub fn set_cross_site(&mut self, site: Option<usize>) {
        self.cross_site = site;
    }

    /// Compares two chromosomes by fitness, ascending.
    ///
    /// Unevaluated chromosomes order below every evaluated one; evaluated
    /// values use IEEE total order.
    pub fn fitness_cmp(&self, other: &Self) -> Ordering {
        match (self.fitness, other.fitness) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// A contiguous run of genes copied out of a chromosome.
///
/// The fragment remembers which gene position it starts at, so joining puts
/// every gene back at the position its bound belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    start: usize,
    genes: Vec<f64>,
}

impl Fragment {
    /// First gene position covered.
    pub fn start(&self) -> usize {
        self.start
    }

    /// One past the last gene position covered.
    pub fn end(&self) -> usize {
        self.start + self.genes.len()
    }

    /// Number of genes in the fragment.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` for a zero-length cut.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// The copied genes, starting at position [`start`](Self::start).
    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    /// Concatenates two fragments into a new, unevaluated chromosome of
    /// exactly `len` genes.
    ///
    /// The fragments may be given in either order; together they must cover
    /// `[0, len)` without gaps or overlap.
    ///
    /// # Panics
    /// Panics if the fragments do not tile `[0, len)`. Crossover operators
    /// only ever produce tiling fragments, so this indicates a broken
    /// operator rather than bad input.
    pub fn join(self, other: Fragment, len: usize) -> Chromosome {
        let (first, second) = if (self.start, self.len()) <= (other.start, other.len()) {
            (self, other)
        } else {
            (other, self)
        };
        assert!(
            first.start == 0 && first.end() == second.start && second.end() == len,
            "fragments [{}, {}) and [{}, {}) do not tile a chromosome of length {}",
            first.start,
            first.end(),
            second.start,
            second.end(),
            len
        );

        let mut genes = first.genes;
        genes.extend(second.genes);
        Chromosome::from_genes(genes)
    }
}
