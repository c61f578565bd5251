//! Built-in representations.
//!
//! - [`RealBits`]: a fixed-length bit string decoded into a real number
//!   within `[min, max]`.
//! - [`PermutationEncoding`]: an ordering of `0..n` (e.g. a city tour).
//! - [`SubsetBits`]: a bit string decoded into an inclusion vector.

use super::error::{ConfigError, RepresentationError};
use super::operators::{bit_flip_mutation, order_crossover, single_point_crossover, swap_mutation};
use super::types::Representation;
use rand::seq::SliceRandom;
use rand::Rng;

fn random_bits<R: Rng>(len: usize, rng: &mut R) -> Vec<bool> {
    (0..len).map(|_| rng.random_bool(0.5)).collect()
}

// ============================================================================
// Real-valued bit string
// ============================================================================

/// Real number encoded as an unsigned big-endian bit string.
///
/// Decoding reads the bits as a binary integer, divides by
/// `2^precision - 1`, and maps the result linearly onto `[min, max]`.
/// All-zero bits decode to `min`, all-one bits to `max`.
///
/// # Examples
///
/// ```
/// use evosearch::ga::{RealBits, Representation};
///
/// let rep = RealBits::new(-1.0, 1.0, 2).unwrap();
/// assert_eq!(rep.decode(&vec![false, false]), -1.0);
/// assert_eq!(rep.decode(&vec![true, true]), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealBits {
    min: f64,
    max: f64,
    precision: usize,
}

impl RealBits {
    /// Longest genotype whose integer value is exact in an `f64`.
    pub const MAX_PRECISION: usize = f64::MANTISSA_DIGITS as usize;

    /// Creates the encoding for `[min, max]` with `precision` bits.
    pub fn new(min: f64, max: f64, precision: usize) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ConfigError::Bounds { min, max });
        }
        if precision == 0 {
            return Err(ConfigError::EmptyGenotype);
        }
        if precision > Self::MAX_PRECISION {
            return Err(ConfigError::Precision {
                precision,
                max: Self::MAX_PRECISION,
            });
        }
        Ok(Self {
            min,
            max,
            precision,
        })
    }

    /// Lower and upper bound of the decoded value.
    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Number of bits per genotype.
    pub fn precision(&self) -> usize {
        self.precision
    }
}

impl Representation for RealBits {
    type Genotype = Vec<bool>;
    type Phenotype = f64;

    fn random_genotype<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
        random_bits(self.precision, rng)
    }

    fn decode(&self, genotype: &Vec<bool>) -> f64 {
        let value = genotype
            .iter()
            .fold(0.0_f64, |acc, &bit| acc * 2.0 + f64::from(u8::from(bit)));
        let scale = 2.0_f64.powi(self.precision as i32) - 1.0;
        let normalized = value / scale;
        self.min + normalized * (self.max - self.min)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Vec<bool>,
        parent2: &Vec<bool>,
        rng: &mut R,
    ) -> Result<(Vec<bool>, Vec<bool>), RepresentationError> {
        single_point_crossover(parent1, parent2, rng)
    }

    fn mutate<R: Rng>(&self, genotype: &mut Vec<bool>, mutation_rate: f64, rng: &mut R) {
        bit_flip_mutation(genotype, mutation_rate, rng);
    }
}

// ============================================================================
// Permutation
// ============================================================================

/// Ordering of `0..n`, e.g. the visit order of `n` cities.
///
/// Crossover is order crossover (OX); mutation swaps two positions with
/// probability `mutation_rate` per individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermutationEncoding {
    len: usize,
}

impl PermutationEncoding {
    /// Creates the encoding for permutations of `0..len`.
    pub fn new(len: usize) -> Result<Self, ConfigError> {
        if len == 0 {
            return Err(ConfigError::EmptyGenotype);
        }
        Ok(Self { len })
    }

    /// Number of elements in each permutation.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; an empty permutation is rejected by [`new`](Self::new).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Representation for PermutationEncoding {
    type Genotype = Vec<usize>;
    type Phenotype = Vec<usize>;

    fn random_genotype<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..self.len).collect();
        perm.shuffle(rng);
        perm
    }

    fn decode(&self, genotype: &Vec<usize>) -> Vec<usize> {
        genotype.clone()
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Vec<usize>,
        parent2: &Vec<usize>,
        rng: &mut R,
    ) -> Result<(Vec<usize>, Vec<usize>), RepresentationError> {
        order_crossover(parent1, parent2, rng)
    }

    fn mutate<R: Rng>(&self, genotype: &mut Vec<usize>, mutation_rate: f64, rng: &mut R) {
        if mutation_rate > 0.0 && rng.random_bool(mutation_rate) {
            swap_mutation(genotype, rng);
        }
    }
}

// ============================================================================
// Subset inclusion bits
// ============================================================================

/// Inclusion vector over `len` items: bit `i` set means item `i` is chosen.
///
/// Same mechanics as [`RealBits`]; only the decoding differs. Fitness is
/// computed by the caller, typically against a target sum (see
/// [`SubsetSum`](crate::problems::SubsetSum)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsetBits {
    len: usize,
}

impl SubsetBits {
    /// Creates the encoding for `len` items.
    pub fn new(len: usize) -> Result<Self, ConfigError> {
        if len == 0 {
            return Err(ConfigError::EmptyGenotype);
        }
        Ok(Self { len })
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; an empty item set is rejected by [`new`](Self::new).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Representation for SubsetBits {
    type Genotype = Vec<bool>;
    type Phenotype = Vec<bool>;

    fn random_genotype<R: Rng>(&self, rng: &mut R) -> Vec<bool> {
        random_bits(self.len, rng)
    }

    fn decode(&self, genotype: &Vec<bool>) -> Vec<bool> {
        genotype.clone()
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Vec<bool>,
        parent2: &Vec<bool>,
        rng: &mut R,
    ) -> Result<(Vec<bool>, Vec<bool>), RepresentationError> {
        single_point_crossover(parent1, parent2, rng)
    }

    fn mutate<R: Rng>(&self, genotype: &mut Vec<bool>, mutation_rate: f64, rng: &mut R) {
        bit_flip_mutation(genotype, mutation_rate, rng);
    }
}
