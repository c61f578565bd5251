//! Subset-sum (knapsack) target matching.

use std::time::Duration;

/// A subset-sum instance: choose items of `weights` summing to `target`.
///
/// With `modular` set, sums are compared modulo `max(weights) + 1`.
///
/// # Examples
///
/// ```
/// use evosearch::problems::SubsetSum;
///
/// let problem = SubsetSum::new(vec![1, 2, 4, 8], 5);
/// assert_eq!(problem.fitness(&[true, false, true, false]), 0.0);
/// assert_eq!(problem.fitness(&[false, true, false, false]), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetSum {
    /// Item weights.
    pub weights: Vec<u64>,
    /// Required total.
    pub target: u64,
    /// Compare sums modulo `max(weights) + 1`.
    pub modular: bool,
}

impl SubsetSum {
    /// Plain (non-modular) instance.
    pub fn new(weights: Vec<u64>, target: u64) -> Self {
        Self {
            weights,
            target,
            modular: false,
        }
    }

    /// Modular instance.
    pub fn modular(weights: Vec<u64>, target: u64) -> Self {
        Self {
            weights,
            target,
            modular: true,
        }
    }

    /// Sum of the weights whose inclusion bit is set.
    pub fn selected_sum(&self, inclusion: &[bool]) -> u128 {
        self.weights
            .iter()
            .zip(inclusion)
            .filter(|(_, chosen)| **chosen)
            .map(|(&w, _)| u128::from(w))
            .sum()
    }

    /// Distance between the selected sum and the target; `0.0` is an exact
    /// solution.
    pub fn fitness(&self, inclusion: &[bool]) -> f64 {
        let total = self.selected_sum(inclusion);
        let target = u128::from(self.target);
        let distance = if self.modular {
            let modulus = self.modulus();
            (target % modulus).abs_diff(total % modulus)
        } else {
            target.abs_diff(total)
        };
        distance as f64
    }

    fn modulus(&self) -> u128 {
        u128::from(self.weights.iter().copied().max().unwrap_or(0)) + 1
    }
}

/// Wall-clock budget heuristic for subset-sum runs.
///
/// `min(ceiling, n * max(weights) * ln(target + 1) / divisor)` seconds,
/// never below one millisecond. The formula is a rough complexity guess;
/// feed the result into
/// [`StoppingPolicy::time_limit`](crate::ga::StoppingPolicy::time_limit)
/// or replace it with any other budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubsetTimeBudget {
    /// Scale dividing the complexity estimate into seconds.
    pub divisor: f64,
    /// Upper bound on the budget.
    pub ceiling: Duration,
}

impl Default for SubsetTimeBudget {
    fn default() -> Self {
        Self {
            divisor: 10_000.0,
            ceiling: Duration::from_secs(300),
        }
    }
}

impl SubsetTimeBudget {
    /// Estimates the budget for one instance.
    pub fn estimate(&self, weights: &[u64], target: u64) -> Duration {
        let n = weights.len() as f64;
        let max_weight = weights.iter().copied().max().unwrap_or(0) as f64;
        let complexity = n * max_weight * (target as f64 + 1.0).ln();
        let seconds = complexity / self.divisor;

        let floor = Duration::from_millis(1);
        if !seconds.is_finite() || seconds >= self.ceiling.as_secs_f64() {
            return self.ceiling.max(floor);
        }
        Duration::from_secs_f64(seconds.max(0.0)).clamp(floor, self.ceiling.max(floor))
    }
}
