//! Genetic Algorithm engine.
//!
//! One evolutionary loop written against the [`Representation`] trait and
//! reused for three problem families: real-valued function optimization
//! ([`RealBits`]), ordering problems such as the TSP
//! ([`PermutationEncoding`]), and subset/knapsack target matching
//! ([`SubsetBits`]).
//!
//! # Core Types
//!
//! - [`Representation`]: random genotype, decode, crossover, mutate
//! - [`Individual`]: genotype plus fitness (lower is better)
//! - [`GaConfig`]: population, tournament, rates, elitism, stopping policy
//! - [`GaRunner`]: executes the loop; [`GaResult`] holds the outcome
//! - [`History`]: per-generation telemetry for plotting and animation
//!
//! # Submodules
//!
//! - [`operators`]: single-point and order crossover, bit-flip and swap mutation
//! - [`selection`]: tournament selection without replacement
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod encoding;
mod error;
mod history;
pub mod operators;
mod runner;
pub mod selection;
mod stopping;
mod types;

pub use config::GaConfig;
pub use encoding::{PermutationEncoding, RealBits, SubsetBits};
pub use error::{ConfigError, EngineError, RepresentationError};
pub use history::{GenerationRecord, History};
pub use runner::{GaResult, GaRunner};
pub use stopping::{Progress, StopReason, StoppingPolicy};
pub use types::{Individual, Representation};
