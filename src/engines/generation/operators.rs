use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};

/// Uniform draw from `[min, max)` computed as `min + (max - min) * u`.
///
/// Unlike `gen_range` this accepts empty, reversed and infinite bounds; the
/// roulette wheel relies on that when invalid individuals push the cumulative
/// fitness to `-inf`.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + (max - min) * rng.gen::<f64>()
}

/// Independent RNG streams for rayon workers, derived from one base seed.
///
/// Every call to [`spawn`](Self::spawn) yields a differently seeded generator,
/// so two jobs landing on the same thread never replay each other's draws.
pub struct WorkerRngs {
    base: u64,
    next: AtomicU64,
}

impl WorkerRngs {
    pub fn new(base: u64) -> Self {
        Self {
            base,
            next: AtomicU64::new(0),
        }
    }

    pub fn spawn(&self) -> StdRng {
        let stream = self.next.fetch_add(1, Ordering::Relaxed);
        StdRng::seed_from_u64(self.base ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// Single-point crossover applied with probability `crossover_rate`.
///
/// The cut is an interior position; everything from it onward is swapped
/// between the parents in place. Returns whether a swap happened.
pub fn crossover<R: Rng + ?Sized>(
    parent1: &mut [usize],
    parent2: &mut [usize],
    crossover_rate: f64,
    rng: &mut R,
) -> bool {
    let len = parent1.len().min(parent2.len());
    if rng.gen::<f64>() >= crossover_rate || len < 3 {
        return false;
    }

    let point = rng.gen_range(1..len - 1);
    parent1[point..len].swap_with_slice(&mut parent2[point..len]);
    true
}

/// Generation-decaying mutation.
///
/// A mutated gene moves towards 0 or `max_value` by
/// `delta * (1 - r^((1 - t/T)^shape))`, where `delta` is its distance to the
/// chosen bound. Steps shrink to nothing as `generation` reaches
/// `max_generations`. Genes stay within `[0, max_value]`.
pub fn non_uniform_mutation<R: Rng + ?Sized>(
    individual: &mut [usize],
    mutation_rate: f64,
    max_value: usize,
    generation: usize,
    max_generations: usize,
    shape: f64,
    rng: &mut R,
) {
    let progress = 1.0 - generation as f64 / max_generations.max(1) as f64;
    let exponent = progress.max(0.0).powf(shape);
    let max = max_value as i64;

    for gene in individual.iter_mut() {
        if rng.gen::<f64>() >= mutation_rate {
            continue;
        }
        let current = *gene as i64;
        let delta = if rng.gen::<f64>() < 0.5 { current } else { max - current };
        let r = rng.gen::<f64>();
        let change = (delta as f64 * (1.0 - r.powf(exponent))) as i64;

        let mutated = if rng.gen::<f64>() < 0.5 {
            current - change
        } else {
            current + change
        };
        *gene = mutated.clamp(0, max) as usize;
    }
}

/// Uniform mutation: each gene, with probability `mutation_rate`, is shifted
/// by a random amount modulo `max_value + 1`.
pub fn uniform_mutation<R: Rng + ?Sized>(
    individual: &mut [usize],
    mutation_rate: f64,
    max_value: usize,
    rng: &mut R,
) {
    for gene in individual.iter_mut() {
        if rng.gen::<f64>() < mutation_rate {
            let shift = uniform(rng, 0.0, max_value as f64) as usize;
            *gene = (*gene + shift) % (max_value + 1);
        }
    }
}

/// Running sum of the fitness array, in population order.
pub fn cumulative_fitness(fitness: &[f64]) -> Vec<f64> {
    fitness
        .iter()
        .scan(0.0, |total, f| {
            *total += f;
            Some(*total)
        })
        .collect()
}

/// Roulette-wheel pick: the first index whose cumulative fitness is not below
/// a uniform draw from `[0, total)`.
///
/// The arithmetic is applied as is, even when negative or `f64::MIN` fitness
/// makes the array non-monotonic; the result is clamped to a valid index.
pub fn select_index<R: Rng + ?Sized>(cumulative: &[f64], rng: &mut R) -> usize {
    let Some(&total) = cumulative.last() else {
        return 0;
    };
    let draw = uniform(rng, 0.0, total);
    cumulative
        .partition_point(|&c| c < draw)
        .min(cumulative.len() - 1)
}
