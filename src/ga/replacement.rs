//! Replacement strategies.
//!
//! Replacement merges the staged next generation into the live population
//! and restores the size invariant: afterwards the live population has
//! exactly `S` members. On a sort-ordered population it also restores
//! descending fitness order, inserting one member at a time.
//!
//! Staged members must be evaluated before merging;
//! [`Population::replace`](super::Population::replace) does that as a
//! barrier before calling in here.

use super::chromosome::Chromosome;
use super::error::{GaError, Result};
use super::population::insert_sorted;
use log::trace;

/// Replacement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Replacement {
    /// The staged generation replaces the live one wholesale.
    ///
    /// Needs at least `S` staged members; the excess (the lowest-fitness
    /// tail when sorted) is dropped.
    #[default]
    Generational,

    /// Staged members are inserted into the live population by fitness, then
    /// the worst members are dropped down to `S`.
    ///
    /// Requires a sort-ordered population.
    SteadyState,

    /// As [`SteadyState`](Self::SteadyState), but a staged member whose
    /// fitness exactly equals that of a live member is discarded instead of
    /// inserted.
    ///
    /// Requires a sort-ordered population.
    SteadyStateNoDuplicates,
}

impl Replacement {
    /// Short lowercase name, used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Replacement::Generational => "generational",
            Replacement::SteadyState => "steady-state",
            Replacement::SteadyStateNoDuplicates => "steady-state-no-duplicates",
        }
    }

    /// Whether the strategy only works on sort-ordered populations.
    pub fn requires_sorted(&self) -> bool {
        !matches!(self, Replacement::Generational)
    }

    /// Checks preconditions without touching any state.
    pub(crate) fn check(&self, sorted: bool, size: usize, staged: usize) -> Result<()> {
        if self.requires_sorted() && !sorted {
            return Err(GaError::UnsortedPopulation {
                strategy: self.name(),
            });
        }
        if *self == Replacement::Generational && staged < size {
            return Err(GaError::InsufficientOffspring {
                required: size,
                staged,
            });
        }
        Ok(())
    }

    /// Merges `staged` into `live` and truncates to `size`.
    ///
    /// Returns how many staged members were inserted (before truncation).
    /// Preconditions are those of [`check`](Self::check).
    pub(crate) fn merge(
        &self,
        live: &mut Vec<Chromosome>,
        staged: Vec<Chromosome>,
        size: usize,
        sorted: bool,
    ) -> usize {
        debug_assert!(staged.iter().all(Chromosome::is_evaluated));

        let inserted = match self {
            Replacement::Generational => {
                let count = staged.len();
                if sorted {
                    live.clear();
                    for c in staged {
                        insert_sorted(live, c);
                    }
                } else {
                    *live = staged;
                }
                count
            }
            Replacement::SteadyState => {
                let count = staged.len();
                for c in staged {
                    insert_sorted(live, c);
                }
                count
            }
            Replacement::SteadyStateNoDuplicates => {
                let mut count = 0;
                for c in staged {
                    if live.iter().any(|m| m.fitness() == c.fitness()) {
                        trace!("discarding offspring with duplicate fitness {:?}", c.fitness());
                        continue;
                    }
                    insert_sorted(live, c);
                    count += 1;
                }
                count
            }
        };

        live.truncate(size);
        inserted
    }
}
