use crate::circuit::default_seed;
use crate::config::{ConfigSection, EvolutionConfig};
use crate::data::snapshots::{write_vector, SnapshotFile};
use crate::engines::generation::genome::{symbol_count, Genome};
use crate::engines::generation::operators::{
    crossover, cumulative_fitness, non_uniform_mutation, select_index, uniform_mutation,
    WorkerRngs,
};
use crate::engines::generation::population::{initialize_population, regenerate_population};
use crate::engines::generation::traits::Evaluator;
use crate::error::{CircuitError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::path::Path;

/// Summary of one completed generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    /// Best fitness among this generation's individuals (`f64::MIN` if none were valid).
    pub best_fitness: f64,
    pub best_ever: f64,
    pub valid_count: usize,
    pub stagnation: usize,
    /// Whether part of the population was regenerated after this generation.
    pub regenerated: bool,
    /// Size of the population handed to the next generation.
    pub population_len: usize,
}

#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    /// Best fitness observed over the whole run.
    pub best_fitness: f64,
    /// Slot 0 of the final population, the best individual of the last
    /// evaluated generation while elitism is on.
    pub best_individual: Genome,
    pub population: Vec<Genome>,
    /// Best fitness of each generation, in order.
    pub history: Vec<f64>,
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, stats: &GenerationStats);
}

/// Generational GA over encoded circuits.
///
/// Each generation evaluates the population in parallel, carries the elite
/// over unchanged and fills the rest with roulette-selected, crossed and
/// mutated pairs. Long stagnation boosts uniform mutation and eventually
/// regenerates everything but the front of the population.
pub struct EvolutionEngine<E: Evaluator> {
    config: EvolutionConfig,
    evaluator: E,
    best_snapshot: Option<SnapshotFile>,
    rng: StdRng,
}

impl<E: Evaluator> EvolutionEngine<E> {
    pub fn new(config: EvolutionConfig, evaluator: E) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            evaluator,
            best_snapshot: None,
            rng,
        })
    }

    /// Write the individual behind every new best-ever fitness to `path`.
    pub fn with_best_snapshot<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.best_snapshot = Some(SnapshotFile::new(path.as_ref()));
        self
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Seed plus random individuals, see [`initialize_population`].
    pub fn initialize_population(&mut self, seed: &[usize]) -> Result<Vec<Genome>> {
        let symbols = alphabet_size(seed)?;
        let rngs = WorkerRngs::new(self.rng.gen());

        let population = initialize_population(
            seed,
            self.config.population_size,
            symbols,
            &self.evaluator,
            self.config.invalid_admission_fraction,
            &rngs,
        );
        log::debug!(
            "Initialized population of {} with {} gene values",
            population.len(),
            symbols
        );
        Ok(population)
    }

    /// Initialize around `seed`, then run every generation.
    pub fn evolve<C: ProgressCallback>(
        &mut self,
        seed: &[usize],
        callback: &mut C,
    ) -> Result<EvolutionOutcome> {
        let population = self.initialize_population(seed)?;
        self.run(population, callback)
    }

    /// Evolve `population` for `max_generations` generations.
    ///
    /// The gene alphabet is taken from slot 0, which holds the seed after
    /// initialization.
    pub fn run<C: ProgressCallback>(
        &mut self,
        mut population: Vec<Genome>,
        callback: &mut C,
    ) -> Result<EvolutionOutcome> {
        let first = population
            .first()
            .ok_or_else(|| CircuitError::Evolution("Population is empty".to_string()))?;
        let symbols = alphabet_size(first)?;
        if population.iter().any(|ind| ind.len() != first.len()) {
            return Err(CircuitError::Evolution(
                "Individuals differ in length".to_string(),
            ));
        }

        let max_gene = symbols - 1;
        let max_generations = self.config.max_generations;
        let elite_count = self.config.elitism_count();

        let mut best_ever = f64::MIN;
        let mut previous_best = f64::MIN;
        let mut stagnation = 0usize;
        let mut history = Vec::with_capacity(max_generations);

        for generation in 0..max_generations {
            callback.on_generation_start(generation);

            let fitness = self.evaluate_population(&population);
            let valid_count = fitness.iter().filter(|&&f| f != f64::MIN).count();

            let mut ranked: Vec<usize> = (0..population.len()).collect();
            ranked.sort_by(|&a, &b| {
                fitness[b]
                    .partial_cmp(&fitness[a])
                    .unwrap_or(Ordering::Equal)
            });
            let generation_best = fitness[ranked[0]];

            let uniform_rate = self.boosted_mutation_rate(stagnation);
            let mut next: Vec<Genome> = ranked
                .iter()
                .take(elite_count)
                .map(|&i| population[i].clone())
                .collect();
            let offspring_count = population.len() - next.len();
            next.extend(self.breed(
                &population,
                &fitness,
                offspring_count,
                generation,
                max_gene,
                uniform_rate,
            ));

            if generation_best - previous_best < self.config.stagnation_threshold {
                stagnation += 1;
            } else {
                stagnation = 0;
            }

            if generation_best > best_ever {
                best_ever = generation_best;
                log::debug!("Generation {}: new best fitness {:.4}", generation + 1, best_ever);
                self.persist_best(&population[ranked[0]]);
            }

            population = next;

            let regenerated = stagnation > self.config.stagnation_limit;
            if regenerated {
                let rngs = WorkerRngs::new(self.rng.gen());
                let replaced = regenerate_population(
                    &mut population,
                    self.config.regeneration_keep_fraction,
                    symbols,
                    &rngs,
                );
                log::debug!(
                    "Generation {}: stagnated for {} generations, regenerated {} individuals",
                    generation + 1,
                    stagnation,
                    replaced
                );
                stagnation = 0;
            }

            previous_best = generation_best;
            history.push(generation_best);

            callback.on_generation_complete(&GenerationStats {
                generation,
                best_fitness: generation_best,
                best_ever,
                valid_count,
                stagnation,
                regenerated,
                population_len: population.len(),
            });
        }

        Ok(EvolutionOutcome {
            best_fitness: best_ever,
            best_individual: population[0].clone(),
            population,
            history,
        })
    }

    /// Fitness of every individual, `f64::MIN` for invalid ones.
    fn evaluate_population(&self, population: &[Genome]) -> Vec<f64> {
        let evaluator = &self.evaluator;
        population
            .par_iter()
            .map(|individual| {
                if evaluator.is_valid(individual) {
                    evaluator.fitness(individual)
                } else {
                    f64::MIN
                }
            })
            .collect()
    }

    /// `count` offspring, produced in pairs on rayon workers.
    fn breed(
        &mut self,
        population: &[Genome],
        fitness: &[f64],
        count: usize,
        generation: usize,
        max_gene: usize,
        uniform_rate: f64,
    ) -> Vec<Genome> {
        let cumulative = cumulative_fitness(fitness);
        let rngs = WorkerRngs::new(self.rng.gen());
        let config = &self.config;

        let pairs: Vec<(Genome, Genome)> = (0..count.div_ceil(2))
            .into_par_iter()
            .map_init(
                || rngs.spawn(),
                |rng, _| {
                    let mut child1 = population[select_index(&cumulative, rng)].clone();
                    let mut child2 = population[select_index(&cumulative, rng)].clone();

                    for _ in 0..2 {
                        crossover(&mut child1, &mut child2, config.crossover_rate, rng);
                    }
                    for child in [&mut child1, &mut child2] {
                        non_uniform_mutation(
                            child,
                            config.mutation_rate,
                            max_gene,
                            generation,
                            config.max_generations,
                            config.non_uniform_shape,
                            rng,
                        );
                        uniform_mutation(child, uniform_rate, max_gene, rng);
                    }
                    (child1, child2)
                },
            )
            .collect();

        let mut offspring: Vec<Genome> = pairs
            .into_iter()
            .flat_map(|(a, b)| [a, b])
            .collect();
        offspring.truncate(count);
        offspring
    }

    /// Uniform mutation rate after `stagnation` stagnant generations.
    fn boosted_mutation_rate(&self, stagnation: usize) -> f64 {
        let config = &self.config;
        let onset = config.max_generations as f64 * config.mutation_boost_onset;
        if stagnation as f64 > onset {
            (config.mutation_rate + stagnation as f64 * config.mutation_boost_step)
                .min(config.mutation_boost_cap)
        } else {
            config.mutation_rate
        }
    }

    fn persist_best(&self, individual: &[usize]) {
        if let Some(snapshot) = &self.best_snapshot {
            if let Err(e) = snapshot.write_vector(individual) {
                log::warn!("{}", e);
            }
        }
    }
}

fn alphabet_size(seed: &[usize]) -> Result<usize> {
    match symbol_count(seed) {
        Some(symbols) if symbols >= 2 => Ok(symbols),
        Some(_) => Err(CircuitError::Evolution(
            "Seed individual needs at least two distinct gene values".to_string(),
        )),
        None => Err(CircuitError::Evolution("Seed individual is empty".to_string())),
    }
}

/// Search for the best `units`-unit circuit.
///
/// Starts from [`default_seed`], runs the GA and, when `best_vector_path` is
/// given, keeps it updated with every new best and writes the final best
/// individual there at the end.
pub fn optimize<E: Evaluator, C: ProgressCallback>(
    units: usize,
    evaluator: E,
    config: &EvolutionConfig,
    best_vector_path: Option<&Path>,
    callback: &mut C,
) -> Result<EvolutionOutcome> {
    if units == 0 {
        return Err(CircuitError::Configuration(
            "Circuit must have at least one unit".to_string(),
        ));
    }

    let mut engine = EvolutionEngine::new(config.clone(), evaluator)?;
    if let Some(path) = best_vector_path {
        engine = engine.with_best_snapshot(path);
    }

    let outcome = engine.evolve(&default_seed(units), callback)?;
    log::info!(
        "Evolution finished after {} generations, best fitness {:.4}",
        outcome.history.len(),
        outcome.best_fitness
    );

    if let Some(path) = best_vector_path {
        write_vector(path, &outcome.best_individual)?;
    }
    Ok(outcome)
}
