//! Fitness helpers for the problem families the engine is used on.
//!
//! Each helper owns its problem data and is captured by the fitness
//! closure handed to [`GaRunner::run`](crate::ga::GaRunner::run); nothing
//! is kept in process-wide state.

mod subset;
mod tsp;

pub use subset::{SubsetSum, SubsetTimeBudget};
pub use tsp::Cities;

/// Turns a function to maximize into a fitness to minimize.
///
/// ```
/// use evosearch::problems::maximize;
///
/// let fitness = maximize(|x: &f64| 1.0 - x * x);
/// assert_eq!(fitness(&0.0), -1.0);
/// ```
pub fn maximize<P, F>(objective: F) -> impl Fn(&P) -> f64
where
    P: ?Sized,
    F: Fn(&P) -> f64,
{
    move |phenotype: &P| -objective(phenotype)
}
