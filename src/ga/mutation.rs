//! Uniform-reset mutation.
//!
//! Each gene is independently resampled from its positional bound with
//! probability `rate`. A chromosome with at least one resampled gene always
//! ends up unevaluated.

use super::chromosome::Chromosome;
use super::types::{GeneBound, GeneMode};
use rand::Rng;

/// Mutates `chromosome` in place and returns the number of genes resampled.
///
/// A draw `u ∈ [0, 1)` is taken per gene and the gene is resampled iff
/// `u < rate`: a rate of `0.0` never mutates, a rate of `1.0` resamples
/// every gene.
///
/// # Panics
/// Panics if `bounds.len()` differs from the chromosome length.
pub fn uniform_reset<R: Rng>(
    chromosome: &mut Chromosome,
    bounds: &[GeneBound],
    mode: GeneMode,
    rate: f64,
    rng: &mut R,
) -> usize {
    assert_eq!(
        bounds.len(),
        chromosome.len(),
        "one bound per gene is required"
    );

    let mut mutated = 0;
    let mut draws = Vec::with_capacity(bounds.len());
    for bound in bounds {
        if rng.random::<f64>() < rate {
            draws.push(Some(bound.sample(mode, rng)));
            mutated += 1;
        } else {
            draws.push(None);
        }
    }
    if mutated > 0 {
        for (gene, value) in chromosome.genes_mut().iter_mut().zip(draws) {
            if let Some(value) = value {
                *gene = value;
            }
        }
    }
    mutated
}
