//! Genetic operators on raw genotypes.
//!
//! These operate on slices and know nothing about decoding, so every
//! [`Representation`](super::Representation) in this crate
//! is a thin layer over them.
//!
//! # Crossover Operators
//!
//! - [`single_point_crossover`]: swap suffixes after one cut, for bit strings
//! - [`order_crossover`] (OX): Davis (1985), keeps the permutation invariant
//!
//! # Mutation Operators
//!
//! - [`bit_flip_mutation`]: flip each gene independently, O(n)
//! - [`swap_mutation`]: exchange two distinct positions, O(1)
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

use super::error::RepresentationError;
use rand::seq::index;
use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover.
///
/// A cut index is drawn uniformly from `0..len`; the children take the
/// prefix of one parent and the suffix of the other. A cut at 0 swaps the
/// parents whole.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn single_point_crossover<T: Clone, R: Rng>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> Result<(Vec<T>, Vec<T>), RepresentationError> {
    let n = check_lengths(parent1, parent2)?;
    if n == 0 {
        return Ok((Vec::new(), Vec::new()));
    }

    let cut = rng.random_range(0..n);
    Ok(cut_and_swap(parent1, parent2, cut))
}

fn cut_and_swap<T: Clone>(parent1: &[T], parent2: &[T], cut: usize) -> (Vec<T>, Vec<T>) {
    let mut child1 = Vec::with_capacity(parent1.len());
    child1.extend_from_slice(&parent1[..cut]);
    child1.extend_from_slice(&parent2[cut..]);

    let mut child2 = Vec::with_capacity(parent2.len());
    child2.extend_from_slice(&parent2[..cut]);
    child2.extend_from_slice(&parent1[cut..]);

    (child1, child2)
}

/// Order Crossover (OX) for permutations of `0..n`.
///
/// # Algorithm
///
/// 1. Draw two distinct cut points and sort them into `start < end`
/// 2. Copy `parent[start..end]` into the child at the same positions
/// 3. Scan the *other* parent in order, skipping values already copied,
///    and write each remaining value into the next empty slot starting at
///    `end` and wrapping around to `0`
///
/// Each child is again a permutation with no repeats. Parents shorter
/// than 2 are returned unchanged.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if a parent contains a value `>= n` (i.e. is not a permutation).
pub fn order_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> Result<(Vec<usize>, Vec<usize>), RepresentationError> {
    let n = check_lengths(parent1, parent2)?;
    if n < 2 {
        return Ok((parent1.to_vec(), parent2.to_vec()));
    }

    let (start, end) = random_cut_points(n, rng);

    let child1 = ox_build_child(parent1, parent2, start, end);
    let child2 = ox_build_child(parent2, parent1, start, end);

    Ok((child1, child2))
}

/// Build one OX child: keep `template[start..end]`, fill the rest from `donor`.
fn ox_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut child = template.to_vec();
    let mut in_segment = vec![false; n];
    for &v in &template[start..end] {
        in_segment[v] = true;
    }

    // Empty slots, in fill order: from `end` to the tail, then wrap to the head.
    let free_slots = (end..n).chain(0..start);
    let remaining = donor.iter().copied().filter(|&v| !in_segment[v]);
    for (slot, value) in free_slots.zip(remaining) {
        child[slot] = value;
    }

    child
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Bit-flip mutation: each gene flips independently with probability `rate`.
///
/// # Complexity
/// O(n)
pub fn bit_flip_mutation<R: Rng>(bits: &mut [bool], rate: f64, rng: &mut R) {
    if rate <= 0.0 {
        return;
    }
    for bit in bits.iter_mut() {
        if rng.random_bool(rate) {
            *bit = !*bit;
        }
    }
}

/// Swap mutation: exchange two distinct random positions.
///
/// Flipping a single position of a permutation would duplicate a value, so
/// a swap is the smallest valid perturbation.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<T, R: Rng>(perm: &mut [T], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let (i, j) = random_cut_points(n, rng);
    perm.swap(i, j);
}

// ============================================================================
// Helpers
// ============================================================================

fn check_lengths<T>(a: &[T], b: &[T]) -> Result<usize, RepresentationError> {
    if a.len() != b.len() {
        return Err(RepresentationError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.len())
}

/// Two distinct indices in `0..n`, sorted so that `start < end`.
///
/// Requires `n >= 2`.
fn random_cut_points<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let picked = index::sample(rng, n, 2);
    let (a, b) = (picked.index(0), picked.index(1));
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;
    use rand::seq::SliceRandom;
    use std::collections::HashSet;

    /// Check that a slice is a valid permutation of 0..n.
    fn is_valid_permutation(perm: &[usize], n: usize) -> bool {
        if perm.len() != n {
            return false;
        }
        let set: HashSet<usize> = perm.iter().copied().collect();
        set.len() == n && perm.iter().all(|&v| v < n)
    }

    // ---- Single-point crossover ----

    #[test]
    fn test_single_point_swaps_suffixes() {
        let p1 = vec![true; 6];
        let p2 = vec![false; 6];
        let (c1, c2) = cut_and_swap(&p1, &p2, 2);
        assert_eq!(c1, vec![true, true, false, false, false, false]);
        assert_eq!(c2, vec![false, false, true, true, true, true]);
    }

    #[test]
    fn test_single_point_conserves_genes() {
        let mut rng = create_rng(42);
        let p1: Vec<u8> = (0..10).collect();
        let p2: Vec<u8> = (10..20).collect();
        for _ in 0..100 {
            let (c1, c2) = single_point_crossover(&p1, &p2, &mut rng).unwrap();
            assert_eq!(c1.len(), 10);
            assert_eq!(c2.len(), 10);
            for i in 0..10 {
                // Position i holds the two parent genes, one per child.
                let pair: HashSet<u8> = [c1[i], c2[i]].into_iter().collect();
                assert_eq!(pair, [p1[i], p2[i]].into_iter().collect());
            }
        }
    }

    #[test]
    fn test_single_point_length_mismatch() {
        let mut rng = create_rng(42);
        let err = single_point_crossover(&[true, false], &[true], &mut rng).unwrap_err();
        assert_eq!(err, RepresentationError::LengthMismatch { left: 2, right: 1 });
    }

    // ---- OX Crossover ----

    #[test]
    fn test_ox_produces_valid_permutations() {
        let mut rng = create_rng(42);
        let p1 = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let p2 = vec![7, 6, 5, 4, 3, 2, 1, 0];

        for _ in 0..100 {
            let (c1, c2) = order_crossover(&p1, &p2, &mut rng).unwrap();
            assert!(is_valid_permutation(&c1, 8), "OX child1 not valid: {c1:?}");
            assert!(is_valid_permutation(&c2, 8), "OX child2 not valid: {c2:?}");
        }
    }

    #[test]
    fn test_ox_known_cut() {
        let p1 = vec![0, 1, 2, 3, 4, 5];
        let p2 = vec![5, 3, 1, 4, 0, 2];
        // Slice [2, 4) of p1 is {2, 3}; p2 without them is 5, 1, 4, 0,
        // written to slots 4, 5, 0, 1.
        let child = ox_build_child(&p1, &p2, 2, 4);
        assert_eq!(child, vec![4, 0, 2, 3, 5, 1]);
    }

    #[test]
    fn test_ox_preserves_segment() {
        let p1 = vec![0, 1, 2, 3, 4];
        let p2 = vec![4, 3, 2, 1, 0];
        for start in 0..4 {
            for end in (start + 1)..5 {
                let child = ox_build_child(&p1, &p2, start, end);
                assert_eq!(&child[start..end], &p1[start..end]);
                assert!(is_valid_permutation(&child, 5));
            }
        }
    }

    #[test]
    fn test_ox_single_element() {
        let mut rng = create_rng(42);
        let (c1, c2) = order_crossover(&[0], &[0], &mut rng).unwrap();
        assert_eq!(c1, vec![0]);
        assert_eq!(c2, vec![0]);
    }

    #[test]
    fn test_ox_two_elements() {
        let mut rng = create_rng(42);
        let p1 = vec![0, 1];
        let p2 = vec![1, 0];

        for _ in 0..20 {
            let (c1, c2) = order_crossover(&p1, &p2, &mut rng).unwrap();
            assert!(is_valid_permutation(&c1, 2));
            assert!(is_valid_permutation(&c2, 2));
        }
    }

    #[test]
    fn test_ox_length_mismatch() {
        let mut rng = create_rng(42);
        let err = order_crossover(&[0, 1, 2], &[1, 0], &mut rng).unwrap_err();
        assert_eq!(err, RepresentationError::LengthMismatch { left: 3, right: 2 });
    }

    proptest! {
        #[test]
        fn prop_ox_children_are_permutations(n in 2usize..40, seed in any::<u64>()) {
            let mut rng = create_rng(seed);
            let mut p1: Vec<usize> = (0..n).collect();
            let mut p2: Vec<usize> = (0..n).collect();
            p1.shuffle(&mut rng);
            p2.shuffle(&mut rng);

            let (c1, c2) = order_crossover(&p1, &p2, &mut rng).unwrap();
            prop_assert!(is_valid_permutation(&c1, n));
            prop_assert!(is_valid_permutation(&c2, n));
        }
    }

    // ---- Bit-flip Mutation ----

    #[test]
    fn test_bit_flip_zero_rate_is_identity() {
        let mut rng = create_rng(42);
        let mut bits = vec![true, false, true, true];
        bit_flip_mutation(&mut bits, 0.0, &mut rng);
        assert_eq!(bits, vec![true, false, true, true]);
    }

    #[test]
    fn test_bit_flip_full_rate_inverts() {
        let mut rng = create_rng(42);
        let mut bits = vec![true, false, true, true];
        bit_flip_mutation(&mut bits, 1.0, &mut rng);
        assert_eq!(bits, vec![false, true, false, false]);
    }

    // ---- Swap Mutation ----

    #[test]
    fn test_swap_preserves_permutation() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut perm: Vec<usize> = (0..10).collect();
            swap_mutation(&mut perm, &mut rng);
            assert!(is_valid_permutation(&perm, 10));
        }
    }

    #[test]
    fn test_swap_always_changes() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let mut perm: Vec<usize> = (0..10).collect();
            swap_mutation(&mut perm, &mut rng);
            assert_ne!(perm, (0..10).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_swap_single_element() {
        let mut rng = create_rng(42);
        let mut perm = vec![0];
        swap_mutation(&mut perm, &mut rng);
        assert_eq!(perm, vec![0]);
    }

    // ---- Cut point helper ----

    #[test]
    fn test_random_cut_points_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (start, end) = random_cut_points(10, &mut rng);
            assert!(start < end);
            assert!(end < 10);
        }
    }
}
