//! Genetic search engine for real-valued, ordering and subset problems.
//!
//! - [`ga`]: the evolutionary loop, its three representations, operators,
//!   stopping policy and per-generation history.
//! - [`problems`]: fitness helpers for function maximization, the TSP and
//!   subset-sum target matching.
//! - [`batch`]: a fixed-size worker pool that solves many independent
//!   instances and records each outcome in a resumable result log.
//!
//! Fitness is minimized throughout. Problems phrased as maximization go
//! through [`problems::maximize`].
//!
//! ```
//! use evosearch::ga::{GaConfig, GaRunner, StopReason, SubsetBits};
//! use evosearch::problems::SubsetSum;
//!
//! let problem = SubsetSum::new(vec![1, 2, 4, 8], 5);
//! let rep = SubsetBits::new(problem.weights.len()).unwrap();
//! let config = GaConfig::default()
//!     .with_population_size(30)
//!     .with_target_fitness(0.0)
//!     .with_seed(3);
//!
//! let result = GaRunner::run(&rep, |bits: &Vec<bool>| problem.fitness(bits), &config).unwrap();
//! assert_eq!(result.stop_reason, StopReason::Converged);
//! assert_eq!(problem.selected_sum(&result.best_phenotype), 5);
//! ```

pub mod batch;
pub mod ga;
pub mod problems;
pub mod random;
