//! Core definitions shared by every GA component.
//!
//! [`Evaluator`] is the contract between the generic engine and the
//! caller's problem; [`GeneBound`] and [`GeneMode`] describe the value range
//! of each gene position.

use super::error::{GaError, Result};
use rand::Rng;

/// Computes the fitness of a gene sequence.
///
/// Higher fitness is better. Evaluation must be a pure function of the genes:
/// the engine caches the result on the chromosome and may call `evaluate`
/// concurrently for different chromosomes when the `parallel` feature is on.
///
/// Any `Fn(&[f64]) -> f64 + Send + Sync` closure is an evaluator:
///
/// ```
/// use u_evolve::ga::Evaluator;
///
/// let sum = |genes: &[f64]| genes.iter().sum::<f64>();
/// assert_eq!(sum.evaluate(&[1.0, 2.0]), 3.0);
/// ```
pub trait Evaluator: Send + Sync {
    /// Returns the fitness of `genes`.
    fn evaluate(&self, genes: &[f64]) -> f64;
}

impl<F> Evaluator for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, genes: &[f64]) -> f64 {
        self(genes)
    }
}

/// How gene values are sampled within their bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeneMode {
    /// Any real value in `[min, max]`.
    #[default]
    Real,
    /// Whole numbers in `[min, max]`, stored as `f64`.
    Integer,
}

/// `2^63`: whole numbers in `[-2^63, 2^63)` convert to `i64` exactly.
const I64_SPAN: f64 = 9_223_372_036_854_775_808.0;

/// Inclusive value range of one gene position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneBound {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
}

impl GeneBound {
    /// Creates a bound. Validity is checked by [`validate`](Self::validate).
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns `true` if `value` lies within `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Checks that the bound is usable for sampling under `mode`.
    ///
    /// `index` is the gene position, reported in the error.
    ///
    /// Both ends must be finite with `min <= max`, and the width
    /// `max - min` must itself be finite. In [`GeneMode::Integer`] the whole
    /// numbers of the bound must also fit in an `i64`.
    pub fn validate(&self, index: usize, mode: GeneMode) -> Result<()> {
        let invalid = GaError::InvalidBound {
            index,
            min: self.min,
            max: self.max,
        };
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(invalid);
        }
        if !(self.max - self.min).is_finite() {
            return Err(invalid);
        }
        if mode == GeneMode::Integer
            && (self.min.ceil() < -I64_SPAN || self.max.floor() >= I64_SPAN)
        {
            return Err(invalid);
        }
        if mode == GeneMode::Integer && self.min.ceil() > self.max.floor() {
            return Err(GaError::EmptyIntegerBound {
                index,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Draws a value uniformly from the bound.
    ///
    /// In [`GeneMode::Integer`] the draw is uniform over the whole numbers
    /// contained in the bound.
    ///
    /// # Panics
    /// Panics if the bound does not pass [`validate`](Self::validate).
    pub fn sample<R: Rng>(&self, mode: GeneMode, rng: &mut R) -> f64 {
        match mode {
            GeneMode::Real => rng.random_range(self.min..=self.max),
            GeneMode::Integer => {
                let lo = self.min.ceil() as i64;
                let hi = self.max.floor() as i64;
                rng.random_range(lo..=hi) as f64
            }
        }
    }
}

/// Validates a full set of bounds against a chromosome length.
pub(crate) fn validate_bounds(bounds: &[GeneBound], len: usize, mode: GeneMode) -> Result<()> {
    if bounds.len() != len {
        return Err(GaError::BoundsLengthMismatch {
            expected: len,
            actual: bounds.len(),
        });
    }
    bounds
        .iter()
        .enumerate()
        .try_for_each(|(i, b)| b.validate(i, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_closure_is_evaluator() {
        let f = |genes: &[f64]| genes.iter().map(|g| g * g).sum::<f64>();
        assert!((f.evaluate(&[3.0, 4.0]) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_real_sample_within_bound() {
        let bound = GeneBound::new(-2.5, 7.0);
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let v = bound.sample(GeneMode::Real, &mut rng);
            assert!(bound.contains(v), "{v} outside {bound:?}");
        }
    }

    #[test]
    fn test_integer_sample_is_whole_and_covers_range() {
        let bound = GeneBound::new(0.0, 3.0);
        let mut rng = create_rng(42);
        let mut seen = [false; 4];
        for _ in 0..1000 {
            let v = bound.sample(GeneMode::Integer, &mut rng);
            assert_eq!(v, v.trunc());
            assert!(bound.contains(v));
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "both endpoints should be reachable");
    }

    #[test]
    fn test_degenerate_bound_samples_constant() {
        let bound = GeneBound::new(5.0, 5.0);
        let mut rng = create_rng(1);
        assert_eq!(bound.sample(GeneMode::Real, &mut rng), 5.0);
        assert_eq!(bound.sample(GeneMode::Integer, &mut rng), 5.0);
    }

    #[test]
    fn test_validate_rejects_inverted_and_nan() {
        assert!(matches!(
            GeneBound::new(2.0, 1.0).validate(3, GeneMode::Real),
            Err(GaError::InvalidBound { index: 3, .. })
        ));
        assert!(GeneBound::new(f64::NAN, 1.0)
            .validate(0, GeneMode::Real)
            .is_err());
    }

    #[test]
    fn test_validate_rejects_infinite_and_overflowing_width() {
        for bound in [
            GeneBound::new(f64::NEG_INFINITY, 0.0),
            GeneBound::new(0.0, f64::INFINITY),
            GeneBound::new(f64::MIN, f64::MAX),
        ] {
            assert!(
                matches!(
                    bound.validate(1, GeneMode::Real),
                    Err(GaError::InvalidBound { index: 1, .. })
                ),
                "{bound:?} should be rejected"
            );
        }
        // Wide but finite width still samples.
        let wide = GeneBound::new(-1e300, 1e300);
        assert!(wide.validate(0, GeneMode::Real).is_ok());
        let v = wide.sample(GeneMode::Real, &mut create_rng(3));
        assert!(wide.contains(v));
    }

    #[test]
    fn test_validate_integer_outside_i64_rejected() {
        let huge = GeneBound::new(1e19, 1e20);
        assert!(huge.validate(0, GeneMode::Real).is_ok());
        assert!(matches!(
            huge.validate(0, GeneMode::Integer),
            Err(GaError::InvalidBound { .. })
        ));

        let edge = GeneBound::new(-9.2e18, 9.2e18);
        assert!(edge.validate(0, GeneMode::Integer).is_ok());
        let mut rng = create_rng(5);
        for _ in 0..100 {
            assert!(edge.contains(edge.sample(GeneMode::Integer, &mut rng)));
        }
    }

    #[test]
    fn test_validate_integer_needs_whole_number() {
        let bound = GeneBound::new(0.2, 0.8);
        assert!(bound.validate(0, GeneMode::Real).is_ok());
        assert!(matches!(
            bound.validate(0, GeneMode::Integer),
            Err(GaError::EmptyIntegerBound { .. })
        ));
    }

    #[test]
    fn test_validate_bounds_length() {
        let bounds = vec![GeneBound::new(0.0, 1.0); 2];
        assert!(validate_bounds(&bounds, 2, GeneMode::Real).is_ok());
        assert!(matches!(
            validate_bounds(&bounds, 3, GeneMode::Real),
            Err(GaError::BoundsLengthMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }
}
