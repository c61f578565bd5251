//! Tournament selection.
//!
//! Selection determines which individuals become parents. A tournament
//! samples `k` distinct individuals and keeps the fittest, so selection
//! pressure is tuned by `k` alone without any global fitness scaling.
//!
//! - k=1: uniform random choice (no pressure)
//! - k=2-5: moderate pressure (typical)
//! - k=population size: always the current best
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::{cmp_fitness, Individual};
use rand::seq::index;
use rand::Rng;

/// Picks one parent index by tournament.
///
/// Draws `k` distinct indices uniformly without replacement and returns
/// the one with the lowest fitness. `k` is capped at the population size.
///
/// # Complexity
/// O(k) per selection
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<G, R: Rng>(population: &[Individual<G>], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let n = population.len();
    let k = k.clamp(1, n);

    let entrants = index::sample(rng, n, k);
    entrants
        .iter()
        .min_by(|&a, &b| cmp_fitness(population[a].fitness, population[b].fitness))
        .unwrap_or(0)
}

/// Builds the parent pool for the next generation.
///
/// Runs `count` independent tournaments; the same individual may win
/// several of them.
pub fn select_parents<G, R: Rng>(
    population: &[Individual<G>],
    k: usize,
    count: usize,
    rng: &mut R,
) -> Vec<usize> {
    (0..count).map(|_| tournament(population, k, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn make_population(fitnesses: &[f64]) -> Vec<Individual<()>> {
        fitnesses.iter().map(|&f| Individual::new((), f)).collect()
    }

    #[test]
    fn test_full_tournament_always_picks_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        // Without replacement, k = n sees everyone.
        for _ in 0..1000 {
            assert_eq!(tournament(&pop, 4, &mut rng), 2);
        }
    }

    #[test]
    fn test_tournament_never_picks_worst_when_k_is_two() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        for _ in 0..1000 {
            assert_ne!(tournament(&pop, 2, &mut rng), 0);
        }
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[tournament(&pop, 2, &mut rng)] += 1;
        }
        // P(best in a 2-of-4 sample) = 1/2.
        assert!(
            counts[2] > 4000,
            "expected best to be selected ~50% of the time, got {counts:?}"
        );
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[tournament(&pop, 1, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_oversized_k_is_capped() {
        let pop = make_population(&[3.0, 2.0]);
        let mut rng = create_rng(42);
        assert_eq!(tournament(&pop, 10, &mut rng), 1);
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);
        assert_eq!(tournament(&pop, 3, &mut rng), 0);
    }

    #[test]
    fn test_select_parents_count() {
        let pop = make_population(&[4.0, 3.0, 2.0, 1.0]);
        let mut rng = create_rng(42);
        let parents = select_parents(&pop, 2, 7, &mut rng);
        assert_eq!(parents.len(), 7);
        assert!(parents.iter().all(|&i| i < 4 && i != 0));
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<Individual<()>> = vec![];
        let mut rng = create_rng(42);
        tournament(&pop, 3, &mut rng);
    }
}
