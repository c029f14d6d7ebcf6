//! Whitespace-delimited text format for saving and reloading populations.
//!
//! The core types only expose accessors; this module is the stream codec
//! built on top of them. Layout, in order:
//!
//! ```text
//! S N
//! max_0 max_1 ... max_{N-1}
//! min_0 min_1 ... min_{N-1}
//! g_0 g_1 ... g_{N-1} fitness      (one line per chromosome, S lines)
//! ```
//!
//! A stale fitness is written as `-`. Any whitespace separates tokens on
//! read, so line breaks are not significant. Floats use Rust's shortest
//! round-trip formatting, so reading back what was written reproduces every
//! value exactly.

use super::chromosome::Chromosome;
use super::error::{GaError, Result};
use super::population::Population;
use super::types::GeneBound;
use std::io::{Read, Write};
use std::str::{FromStr, SplitWhitespace};

const STALE: &str = "-";

/// Upper bound on members reserved ahead of parsing; the header is not
/// trusted until the members are actually read.
const PREALLOCATE_LIMIT: usize = 1024;

/// Writes the live members of `population` in the text layout.
pub fn write_population<W: Write>(population: &Population, out: &mut W) -> Result<()> {
    let bounds = population.bounds();
    writeln!(
        out,
        "{} {}",
        population.members().len(),
        population.chromosome_len()
    )?;
    write_row(out, bounds.iter().map(|b| b.max))?;
    write_row(out, bounds.iter().map(|b| b.min))?;

    for c in population.members() {
        for g in c.genes() {
            write!(out, "{g} ")?;
        }
        match c.fitness() {
            Some(f) => writeln!(out, "{f}")?,
            None => writeln!(out, "{STALE}")?,
        }
    }
    Ok(())
}

/// Reads a population written by [`write_population`].
///
/// The result is unsorted and has no evaluator; see
/// [`Population::from_parts`].
pub fn read_population<R: Read>(input: &mut R) -> Result<Population> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    let mut tokens = Tokens::new(&text);

    let size: usize = tokens.parse("population size")?;
    let len: usize = tokens.parse("chromosome length")?;

    let max: Vec<f64> = (0..len)
        .map(|_| tokens.parse("upper bound"))
        .collect::<Result<_>>()?;
    let min: Vec<f64> = (0..len)
        .map(|_| tokens.parse("lower bound"))
        .collect::<Result<_>>()?;
    let bounds = min
        .into_iter()
        .zip(max)
        .map(|(min, max)| GeneBound::new(min, max))
        .collect();

    let mut members = Vec::with_capacity(size.min(PREALLOCATE_LIMIT));
    for _ in 0..size {
        let genes: Vec<f64> = (0..len)
            .map(|_| tokens.parse("gene"))
            .collect::<Result<_>>()?;
        let mut c = Chromosome::from_genes(genes);
        if let Some(fitness) = tokens.parse_fitness()? {
            c.restore_fitness(fitness);
        }
        members.push(c);
    }

    if let Some(extra) = tokens.next_raw() {
        return Err(tokens.error(format!("unexpected trailing token {extra:?}")));
    }

    Population::from_parts(bounds, members)
}

fn write_row<W: Write>(out: &mut W, values: impl Iterator<Item = f64>) -> Result<()> {
    for v in values {
        write!(out, "{v} ")?;
    }
    writeln!(out)?;
    Ok(())
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
            position: 0,
        }
    }

    fn next_raw(&mut self) -> Option<&'a str> {
        let token = self.inner.next()?;
        self.position += 1;
        Some(token)
    }

    fn require(&mut self, what: &str) -> Result<&'a str> {
        match self.next_raw() {
            Some(token) => Ok(token),
            None => Err(GaError::Parse {
                token: self.position + 1,
                message: format!("missing {what}"),
            }),
        }
    }

    fn parse<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self.require(what)?;
        token
            .parse()
            .map_err(|_| self.error(format!("invalid {what} {token:?}")))
    }

    fn parse_fitness(&mut self) -> Result<Option<f64>> {
        let token = self.require("fitness")?;
        if token == STALE {
            return Ok(None);
        }
        token
            .parse()
            .map(Some)
            .map_err(|_| self.error(format!("invalid fitness {token:?}")))
    }

    fn error(&self, message: String) -> GaError {
        GaError::Parse {
            token: self.position,
            message,
        }
    }
}
