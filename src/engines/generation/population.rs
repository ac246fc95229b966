use crate::engines::generation::genome::{random_genome, Genome};
use crate::engines::generation::operators::WorkerRngs;
use crate::engines::generation::traits::Evaluator;
use rand::Rng;
use rayon::prelude::*;
use std::sync::{Mutex, PoisonError};

/// Build a population of `size` individuals around `seed`.
///
/// The seed occupies slot 0. The remaining slots are filled in parallel with
/// random genomes; until `admission_fraction` of the population is filled a
/// candidate must pass `evaluator.is_valid`, after that any candidate is
/// admitted. Slot order beyond 0 depends on worker scheduling.
pub fn initialize_population<E: Evaluator + ?Sized>(
    seed: &[usize],
    size: usize,
    symbols: usize,
    evaluator: &E,
    admission_fraction: f64,
    rngs: &WorkerRngs,
) -> Vec<Genome> {
    if size == 0 {
        return Vec::new();
    }
    let mut members = Vec::with_capacity(size);
    members.push(seed.to_vec());
    let population = Mutex::new(members);

    let admit_any_from = size as f64 * admission_fraction;

    (1..size)
        .into_par_iter()
        .for_each_init(|| rngs.spawn(), |rng, _| loop {
            let candidate = random_genome(seed.len(), symbols, rng);
            let valid = evaluator.is_valid(&candidate);

            let mut members = population.lock().unwrap_or_else(PoisonError::into_inner);
            if valid || members.len() as f64 >= admit_any_from {
                members.push(candidate);
                return;
            }
        });

    population.into_inner().unwrap_or_else(PoisonError::into_inner)
}

/// Replace every individual from `floor(len * keep_fraction)` onward with
/// uniformly random genes in `[0, symbols)`. Returns how many were replaced.
pub fn regenerate_population(
    population: &mut [Genome],
    keep_fraction: f64,
    symbols: usize,
    rngs: &WorkerRngs,
) -> usize {
    let keep = ((population.len() as f64 * keep_fraction) as usize).min(population.len());
    population[keep..]
        .par_iter_mut()
        .for_each_init(|| rngs.spawn(), |rng, individual| {
            for gene in individual.iter_mut() {
                *gene = rng.gen_range(0..symbols);
            }
        });
    population.len() - keep
}
