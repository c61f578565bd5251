//! Core trait and data definitions for the search engine.
//!
//! [`Representation`] is the contract between the generic evolutionary
//! loop and a problem family's encoding. [`Individual`] pairs a genotype
//! with its evaluated fitness.

use super::error::RepresentationError;
use rand::Rng;
use std::fmt::Debug;

/// Encodes and decodes genotypes for one problem family.
///
/// The engine is written once against this trait; bit-string reals,
/// permutations and subset inclusion vectors are the built-in variants
/// (see [`encoding`](super::encoding)).
///
/// # Invariants
///
/// - Every genotype produced by [`random_genotype`](Self::random_genotype),
///   [`crossover`](Self::crossover) and [`mutate`](Self::mutate) has the
///   same length.
/// - [`decode`](Self::decode) is pure: the same genotype always yields the
///   same phenotype.
///
/// # Implementing
///
/// ```ignore
/// struct Coin;
///
/// impl Representation for Coin {
///     type Genotype = Vec<bool>;
///     type Phenotype = bool;
///
///     fn random_genotype<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
///         vec![rng.random_bool(0.5)]
///     }
///     fn decode(&self, g: &Vec<bool>) -> bool { g[0] }
///     fn crossover<R: Rng>(&self, a: &Vec<bool>, b: &Vec<bool>, _: &mut R)
///         -> Result<(Vec<bool>, Vec<bool>), RepresentationError> {
///         Ok((b.clone(), a.clone()))
///     }
///     fn mutate<R: Rng>(&self, g: &mut Vec<bool>, rate: f64, rng: &mut R) {
///         if rng.random_bool(rate) { g[0] = !g[0]; }
///     }
/// }
/// ```
pub trait Representation: Send + Sync {
    /// The encoded form operated on by genetic operators.
    type Genotype: Clone + Debug + Send;

    /// The decoded, problem-meaningful value handed to the fitness function.
    type Phenotype: Clone + Debug + Send;

    /// Creates a uniformly random genotype.
    fn random_genotype<R: Rng>(&self, rng: &mut R) -> Self::Genotype;

    /// Decodes a genotype into its phenotype.
    fn decode(&self, genotype: &Self::Genotype) -> Self::Phenotype;

    /// Recombines two parents into two children.
    ///
    /// Fails when the parents cannot be combined (e.g. unequal lengths).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Genotype,
        parent2: &Self::Genotype,
        rng: &mut R,
    ) -> Result<(Self::Genotype, Self::Genotype), RepresentationError>;

    /// Perturbs a genotype in place.
    ///
    /// How `mutation_rate` is applied is representation-specific: per gene
    /// for bit strings, per individual for permutations.
    fn mutate<R: Rng>(&self, genotype: &mut Self::Genotype, mutation_rate: f64, rng: &mut R);
}

/// A candidate solution: genotype plus its fitness (lower is better).
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<G> {
    /// Encoded solution.
    pub genotype: G,
    /// Fitness score; lower is better.
    pub fitness: f64,
}

impl<G> Individual<G> {
    /// Pairs a genotype with an already computed fitness.
    pub fn new(genotype: G, fitness: f64) -> Self {
        Self { genotype, fitness }
    }
}

/// Total order on fitness values. NaN ranks with `+inf`, behind every
/// finite score.
pub(crate) fn cmp_fitness(a: f64, b: f64) -> std::cmp::Ordering {
    fn key(x: f64) -> f64 {
        if x.is_nan() {
            f64::INFINITY
        } else {
            x
        }
    }
    key(a).total_cmp(&key(b))
}
