//! Genome representation for the circuit search
//!
//! A genome is an encoded circuit: element 0 names the feed unit and each
//! following triple holds one unit's concentrate, intermediate and tailings
//! destinations. Genes are drawn from `[0, symbols)`, where `symbols` is one
//! more than the largest value in the seed individual.
//!
//! Crossover and mutation work on the flat vector directly; nothing guarantees
//! that the result is a valid circuit, which is why fitness is only computed
//! for individuals that pass the validity check.

use crate::types::CircuitVector;
use rand::Rng;

pub type Genome = CircuitVector;

/// Size of the gene alphabet implied by `seed`: its largest value plus one.
pub fn symbol_count(seed: &[usize]) -> Option<usize> {
    seed.iter().copied().max().and_then(|max| max.checked_add(1))
}

/// Whether `value` may be drawn for gene `position` when building a random
/// individual.
///
/// The feed gene avoids `symbols - 2` and `symbols - 3`; a unit's destination
/// genes avoid the unit's own index.
pub fn gene_allowed(position: usize, value: usize, symbols: usize) -> bool {
    if position == 0 {
        symbols.checked_sub(2) != Some(value) && symbols.checked_sub(3) != Some(value)
    } else {
        value != (position - 1) / 3
    }
}

/// Draw gene `position` uniformly from `[0, symbols)`, rejecting values
/// `gene_allowed` forbids.
///
/// Callers guarantee `symbols >= 2`, so every position has at least one
/// admissible value.
pub fn random_gene<R: Rng + ?Sized>(position: usize, symbols: usize, rng: &mut R) -> usize {
    loop {
        let value = rng.gen_range(0..symbols);
        if gene_allowed(position, value, symbols) {
            return value;
        }
    }
}

pub fn random_genome<R: Rng + ?Sized>(length: usize, symbols: usize, rng: &mut R) -> Genome {
    (0..length)
        .map(|position| random_gene(position, symbols, rng))
        .collect()
}
