//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates one complete search:
//! initialization → evaluation → history → stopping check → elitism →
//! selection → crossover → mutation → repeat.
//!
//! A run is single-threaded and synchronous; parallelism only exists
//! across independent runs (see [`batch`](crate::batch)).

use super::config::GaConfig;
use super::error::EngineError;
use super::history::{GenerationRecord, History};
use super::selection::select_parents;
use super::stopping::{Progress, StopReason};
use super::types::{cmp_fitness, Individual, Representation};
use crate::random::rng_from;
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::instrument;

/// Result of a GA run.
///
/// Contains the best solution found across all generations, why the run
/// stopped, and the per-generation history.
#[derive(Debug, Clone)]
pub struct GaResult<G, P> {
    /// The best individual seen during the entire run.
    pub best: Individual<G>,

    /// Decoded form of `best`.
    pub best_phenotype: P,

    /// Best fitness value (same as `best.fitness`).
    pub best_fitness: f64,

    /// Number of generations bred before stopping.
    pub generations: usize,

    /// Terminal state of the run.
    pub stop_reason: StopReason,

    /// Total wall-clock time of the run.
    pub elapsed: Duration,

    /// Wall-clock time at which `best` was first seen.
    pub time_to_best: Duration,

    /// One record per evaluated generation (`generations + 1` entries).
    pub history: History<G, P>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use evosearch::ga::{GaConfig, GaRunner, RealBits};
///
/// let rep = RealBits::new(-5.0, 5.0, 16).unwrap();
/// let config = GaConfig::default().with_generations(30).with_seed(42);
/// let result = GaRunner::run(&rep, |x: &f64| x * x, &config).unwrap();
/// assert!(result.best_fitness < 0.1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA to termination.
    ///
    /// `fitness` maps a decoded phenotype to a score; lower is better.
    /// Maximization problems must negate their objective (see
    /// [`maximize`](crate::problems::maximize)).
    ///
    /// # Errors
    ///
    /// - [`EngineError::Config`] if `config` is invalid; nothing is run.
    /// - [`EngineError::Representation`] if crossover rejects a parent pair.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            population_size = config.population_size,
            generations = config.generations,
            seed = ?config.seed
        )
    )]
    pub fn run<Rep, F>(
        representation: &Rep,
        fitness: F,
        config: &GaConfig,
    ) -> Result<GaResult<Rep::Genotype, Rep::Phenotype>, EngineError>
    where
        Rep: Representation,
        F: Fn(&Rep::Phenotype) -> f64,
    {
        config.validate()?;

        let start = Instant::now();
        let mut rng = rng_from(config.seed);

        // 1. Initialize and evaluate population
        let mut population: Vec<Individual<Rep::Genotype>> = (0..config.population_size)
            .map(|_| evaluate(representation, &fitness, representation.random_genotype(&mut rng)))
            .collect();

        // 2. Track best
        let mut best = population[best_index(&population)].clone();
        let mut time_to_best = start.elapsed();

        let mut history = History::default();
        let mut best_per_generation = Vec::new();
        let mut generation = 0usize;

        // 3. Evolutionary loop
        let stop_reason = loop {
            let gen_best = &population[best_index(&population)];
            let mean = mean_fitness(&population);
            best_per_generation.push(gen_best.fitness);

            if cmp_fitness(gen_best.fitness, best.fitness).is_lt() {
                best = gen_best.clone();
                time_to_best = start.elapsed();
            }

            history.push(GenerationRecord {
                generation,
                best_genotype: gen_best.genotype.clone(),
                best_phenotype: representation.decode(&gen_best.genotype),
                best_fitness: gen_best.fitness,
                mean_fitness: mean,
                population: config.record_populations.then(|| {
                    population
                        .iter()
                        .map(|ind| (representation.decode(&ind.genotype), ind.fitness))
                        .collect()
                }),
            });

            tracing::debug!(
                generation,
                best = gen_best.fitness,
                mean,
                "generation evaluated"
            );

            let progress = Progress {
                generation,
                max_generations: config.generations,
                best_per_generation: &best_per_generation,
                elapsed: start.elapsed(),
            };
            if let Some(reason) = config.stopping.check(&progress) {
                break reason;
            }

            population = next_generation(representation, &fitness, &population, config, &mut rng)?;
            generation += 1;
        };

        let elapsed = start.elapsed();
        tracing::info!(
            stop_reason = %stop_reason,
            generations = generation,
            best_fitness = best.fitness,
            elapsed_ms = elapsed.as_millis() as u64,
            "search finished"
        );

        Ok(GaResult {
            best_phenotype: representation.decode(&best.genotype),
            best_fitness: best.fitness,
            best,
            generations: generation,
            stop_reason,
            elapsed,
            time_to_best,
            history,
        })
    }
}

/// Breeds the next population from an evaluated one.
///
/// Elites are copied first, unchanged. The rest is filled from a parent
/// pool of `population_size` tournament winners: two parents with
/// probability `crossover_rate` (two mutated children), otherwise one
/// parent copied and mutated. Overflow from a final two-child step is
/// dropped.
fn next_generation<Rep, F, R>(
    representation: &Rep,
    fitness: &F,
    population: &[Individual<Rep::Genotype>],
    config: &GaConfig,
    rng: &mut R,
) -> Result<Vec<Individual<Rep::Genotype>>, EngineError>
where
    Rep: Representation,
    F: Fn(&Rep::Phenotype) -> f64,
    R: Rng,
{
    let size = config.population_size;

    // Elite preservation
    let mut ranked: Vec<usize> = (0..population.len()).collect();
    ranked.sort_by(|&a, &b| cmp_fitness(population[a].fitness, population[b].fitness));
    let mut next: Vec<Individual<Rep::Genotype>> = ranked[..config.elite_size]
        .iter()
        .map(|&i| population[i].clone())
        .collect();

    // Selection
    let parents = select_parents(population, config.tournament_size, size, rng);
    let pick = |rng: &mut R| parents[rng.random_range(0..parents.len())];

    // Reproduction
    while next.len() < size {
        if rng.random_bool(config.crossover_rate) {
            let (p1, p2) = (pick(&mut *rng), pick(&mut *rng));
            let (c1, c2) =
                representation.crossover(&population[p1].genotype, &population[p2].genotype, rng)?;
            for mut child in [c1, c2] {
                if next.len() >= size {
                    break;
                }
                representation.mutate(&mut child, config.mutation_rate, rng);
                next.push(evaluate(representation, fitness, child));
            }
        } else {
            let mut child = population[pick(&mut *rng)].genotype.clone();
            representation.mutate(&mut child, config.mutation_rate, rng);
            next.push(evaluate(representation, fitness, child));
        }
    }

    Ok(next)
}

fn evaluate<Rep, F>(representation: &Rep, fitness: &F, genotype: Rep::Genotype) -> Individual<Rep::Genotype>
where
    Rep: Representation,
    F: Fn(&Rep::Phenotype) -> f64,
{
    let score = fitness(&representation.decode(&genotype));
    Individual::new(genotype, score)
}

/// Index of the individual with the best (lowest) fitness.
fn best_index<G>(population: &[Individual<G>]) -> usize {
    population
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| cmp_fitness(a.fitness, b.fitness))
        .map_or(0, |(i, _)| i)
}

fn mean_fitness<G>(population: &[Individual<G>]) -> f64 {
    let total: f64 = population.iter().map(|ind| ind.fitness).sum();
    total / population.len() as f64
}

// ============================================================================
// Tests
// ============================================================================
