//! Crossover operators for bounded gene vectors.
//!
//! Both operators take two parents and produce two offspring of the same
//! length. Offspring are new values: they start unevaluated, carry the
//! first parent identifier of each parent as lineage, and record the cut
//! position (if the operator has one).
//!
//! # Operators
//!
//! - [`one_point`]: split both parents at one cut, swap tails. O(n)
//! - [`uniform`]: per-gene fair coin decides which parent donates. O(n)

use super::chromosome::Chromosome;
use rand::Rng;

/// Crossover strategy applied to each selected pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Single random cut; see [`one_point`].
    #[default]
    OnePoint,
    /// Independent fair coin per gene; see [`uniform`].
    Uniform,
}

impl Crossover {
    /// Recombines `a` and `b` with this operator.
    ///
    /// # Panics
    /// Panics if the parents have different lengths or are empty.
    pub fn apply<R: Rng>(
        &self,
        a: &Chromosome,
        b: &Chromosome,
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        match self {
            Crossover::OnePoint => {
                assert!(!a.is_empty(), "parents must not be empty");
                let cut = rng.random_range(0..a.len());
                one_point(a, b, cut)
            }
            Crossover::Uniform => uniform(a, b, rng),
        }
    }

    /// Short lowercase name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Crossover::OnePoint => "one-point",
            Crossover::Uniform => "uniform",
        }
    }
}

/// One-point crossover at a fixed cut.
///
/// With `head = [0, cut)` and `tail = [cut, n)`:
/// - first offspring  = tail of `b` + head of `a`
/// - second offspring = tail of `a` + head of `b`
///
/// Genes keep their positions, so each offspring gene still lies in the
/// bound of its position. A cut of `0` swaps the parents whole; a cut of `n`
/// returns copies of them.
///
/// # Panics
/// Panics if the parents have different lengths or `cut > n`.
pub fn one_point(a: &Chromosome, b: &Chromosome, cut: usize) -> (Chromosome, Chromosome) {
    let n = a.len();
    assert_eq!(n, b.len(), "parents must have equal length");

    let head_a = a.slice(0..cut);
    let tail_a = a.slice(cut..n);
    let head_b = b.slice(0..cut);
    let tail_b = b.slice(cut..n);

    let mut first = tail_b.join(head_a, n);
    let mut second = tail_a.join(head_b, n);

    inherit(&mut first, a, b, Some(cut));
    inherit(&mut second, a, b, Some(cut));
    (first, second)
}

/// Uniform crossover.
///
/// For every gene a fair coin picks a donor; the first offspring takes the
/// donor's gene and the second offspring takes the other parent's gene.
/// Cross-site is `None`.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn uniform<R: Rng>(a: &Chromosome, b: &Chromosome, rng: &mut R) -> (Chromosome, Chromosome) {
    let n = a.len();
    assert_eq!(n, b.len(), "parents must have equal length");

    let mut genes_first = Vec::with_capacity(n);
    let mut genes_second = Vec::with_capacity(n);
    for (&ga, &gb) in a.genes().iter().zip(b.genes()) {
        if rng.random_bool(0.5) {
            genes_first.push(ga);
            genes_second.push(gb);
        } else {
            genes_first.push(gb);
            genes_second.push(ga);
        }
    }

    let mut first = Chromosome::from_genes(genes_first);
    let mut second = Chromosome::from_genes(genes_second);
    inherit(&mut first, a, b, None);
    inherit(&mut second, a, b, None);
    (first, second)
}

fn inherit(child: &mut Chromosome, a: &Chromosome, b: &Chromosome, site: Option<usize>) {
    child.set_parents(a.parents()[0], b.parents()[0]);
    child.set_cross_site(site);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn parent(genes: &[f64], id: usize) -> Chromosome {
        let mut c = Chromosome::from_genes(genes.to_vec());
        c.set_parents(Some(id), Some(id));
        c.restore_fitness(genes.iter().sum());
        c
    }

    #[test]
    fn test_one_point_swaps_tails() {
        let a = parent(&[1.0, 2.0, 3.0, 4.0], 0);
        let b = parent(&[10.0, 20.0, 30.0, 40.0], 5);
        let (x, y) = one_point(&a, &b, 1);

        assert_eq!(x.genes(), &[1.0, 20.0, 30.0, 40.0]);
        assert_eq!(y.genes(), &[10.0, 2.0, 3.0, 4.0]);
        for child in [&x, &y] {
            assert_eq!(child.parents(), [Some(0), Some(5)]);
            assert_eq!(child.cross_site(), Some(1));
            assert!(!child.is_evaluated());
        }
    }

    #[test]
    fn test_one_point_cut_zero_swaps_whole() {
        let a = parent(&[1.0, 2.0, 3.0], 0);
        let b = parent(&[4.0, 5.0, 6.0], 1);
        let (x, y) = one_point(&a, &b, 0);
        assert_eq!(x.genes(), b.genes());
        assert_eq!(y.genes(), a.genes());
    }

    #[test]
    fn test_one_point_cut_n_keeps_parents() {
        let a = parent(&[1.0, 2.0, 3.0], 0);
        let b = parent(&[4.0, 5.0, 6.0], 1);
        let (x, y) = one_point(&a, &b, 3);
        assert_eq!(x.genes(), a.genes());
        assert_eq!(y.genes(), b.genes());
        assert!(!x.is_evaluated() && !y.is_evaluated());
    }

    #[test]
    fn test_uniform_takes_each_gene_from_a_parent() {
        let a = parent(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2);
        let b = parent(&[-1.0, -2.0, -3.0, -4.0, -5.0, -6.0], 3);
        let mut rng = create_rng(42);
        let (x, y) = uniform(&a, &b, &mut rng);

        for i in 0..6 {
            let (xa, ya) = (x.genes()[i], y.genes()[i]);
            assert!(
                (xa == a.genes()[i] && ya == b.genes()[i])
                    || (xa == b.genes()[i] && ya == a.genes()[i]),
                "gene {i} not complementary"
            );
        }
        assert_eq!(x.cross_site(), None);
        assert_eq!(x.parents(), [Some(2), Some(3)]);
        assert!(!y.is_evaluated());
    }

    #[test]
    fn test_uniform_mixes_over_many_genes() {
        let n = 1000;
        let a = parent(&vec![0.0; n], 0);
        let b = parent(&vec![1.0; n], 1);
        let mut rng = create_rng(7);
        let (x, _) = uniform(&a, &b, &mut rng);
        let from_b = x.genes().iter().filter(|&&g| g == 1.0).count();
        assert!((400..600).contains(&from_b), "got {from_b} of {n}");
    }

    #[test]
    fn test_apply_dispatch() {
        let a = parent(&[1.0, 2.0], 0);
        let b = parent(&[3.0, 4.0], 1);
        let mut rng = create_rng(42);
        let (x, _) = Crossover::OnePoint.apply(&a, &b, &mut rng);
        assert!(x.cross_site().is_some());
        let (x, _) = Crossover::Uniform.apply(&a, &b, &mut rng);
        assert!(x.cross_site().is_none());
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_length_mismatch_panics() {
        let a = parent(&[1.0, 2.0], 0);
        let b = parent(&[3.0], 1);
        one_point(&a, &b, 1);
    }

    proptest! {
        #[test]
        fn prop_offspring_keep_length(
            genes in prop::collection::vec(-100.0f64..100.0, 1..40),
            seed in any::<u64>(),
        ) {
            let a = parent(&genes, 0);
            let b = parent(&genes.iter().map(|g| -g).collect::<Vec<_>>(), 1);
            let mut rng = create_rng(seed);
            for op in [Crossover::OnePoint, Crossover::Uniform] {
                let (x, y) = op.apply(&a, &b, &mut rng);
                prop_assert_eq!(x.len(), genes.len());
                prop_assert_eq!(y.len(), genes.len());
            }
        }

        #[test]
        fn prop_one_point_conserves_genes_per_position(
            genes in prop::collection::vec(0.0f64..10.0, 1..20),
            cut_frac in 0.0f64..1.0,
        ) {
            let n = genes.len();
            let cut = ((n as f64) * cut_frac) as usize;
            let a = parent(&genes, 0);
            let b = parent(&genes.iter().map(|g| g + 100.0).collect::<Vec<_>>(), 1);
            let (x, y) = one_point(&a, &b, cut);
            for i in 0..n {
                let mut got = [x.genes()[i], y.genes()[i]];
                let mut want = [a.genes()[i], b.genes()[i]];
                got.sort_by(f64::total_cmp);
                want.sort_by(f64::total_cmp);
                prop_assert_eq!(got, want);
            }
        }
    }
}
