//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.
//! Representation-specific parameters (bounds, precision, item count) live
//! on the representation itself.

use super::error::ConfigError;
use super::stopping::StoppingPolicy;
use std::time::Duration;

/// Configuration for one search run.
///
/// Builders store values verbatim; out-of-range values are reported by
/// [`validate`](Self::validate), which the runner calls before the first
/// generation.
///
/// # Defaults
///
/// ```
/// use evosearch::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 100);
/// assert_eq!(config.elite_size, 5);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use evosearch::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(1000)
///     .with_generations(20)
///     .with_tournament_size(3)
///     .with_crossover_rate(0.8)
///     .with_mutation_rate(0.01)
///     .with_elite_size(10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Generation budget. A run that never stops early breeds exactly this
    /// many generations.
    pub generations: usize,

    /// Number of distinct entrants per tournament, `1..=population_size`.
    pub tournament_size: usize,

    /// Probability that a reproduction step uses crossover (0.0–1.0).
    ///
    /// Otherwise a single parent is copied and mutated.
    pub crossover_rate: f64,

    /// Mutation probability (0.0–1.0).
    ///
    /// Per gene for bit strings, per individual for permutations.
    pub mutation_rate: f64,

    /// Number of best individuals copied unchanged into the next generation.
    pub elite_size: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Keep every decoded individual of every generation in the history.
    ///
    /// Needed only for per-individual animation; memory grows with
    /// `population_size * generations`.
    pub record_populations: bool,

    /// Early-stopping conditions.
    pub stopping: StoppingPolicy,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 100,
            tournament_size: 3,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            elite_size: 5,
            seed: None,
            record_populations: false,
            stopping: StoppingPolicy::default(),
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the generation budget.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the elite count.
    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables full-population history snapshots.
    pub fn with_record_populations(mut self, record: bool) -> Self {
        self.record_populations = record;
        self
    }

    /// Replaces the stopping policy.
    pub fn with_stopping(mut self, stopping: StoppingPolicy) -> Self {
        self.stopping = stopping;
        self
    }

    /// Shorthand for `stopping.target_fitness`.
    pub fn with_target_fitness(mut self, target: f64) -> Self {
        self.stopping = self.stopping.with_target_fitness(target);
        self
    }

    /// Shorthand for `stopping.time_limit`.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.stopping = self.stopping.with_time_limit(limit);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns the first offending option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(ConfigError::TournamentSize {
                tournament_size: self.tournament_size,
                population_size: self.population_size,
            });
        }
        if self.elite_size > self.population_size {
            return Err(ConfigError::EliteSize {
                elite_size: self.elite_size,
                population_size: self.population_size,
            });
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;

        if let Some(fraction) = self.stopping.stagnation_after {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(ConfigError::StagnationFraction(fraction));
            }
        }
        if self.stopping.time_limit == Some(Duration::ZERO) {
            return Err(ConfigError::ZeroTimeLimit);
        }
        if self.stopping.target_fitness.is_some_and(f64::is_nan) {
            return Err(ConfigError::NanTarget);
        }
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Rate { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.generations, 100);
        assert_eq!(config.tournament_size, 3);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert_eq!(config.elite_size, 5);
        assert!(config.seed.is_none());
        assert!(!config.record_populations);
        assert_eq!(config.stopping, StoppingPolicy::default());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_generations(1000)
            .with_tournament_size(5)
            .with_crossover_rate(0.7)
            .with_mutation_rate(0.05)
            .with_elite_size(0)
            .with_record_populations(true)
            .with_target_fitness(0.0)
            .with_time_limit(Duration::from_secs(3))
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.generations, 1000);
        assert_eq!(config.tournament_size, 5);
        assert!((config.crossover_rate - 0.7).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.elite_size, 0);
        assert!(config.record_populations);
        assert_eq!(config.stopping.target_fitness, Some(0.0));
        assert_eq!(config.stopping.time_limit, Some(Duration::from_secs(3)));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_generations_is_valid() {
        assert!(GaConfig::default().with_generations(0).validate().is_ok());
    }

    #[test]
    fn test_validate_empty_population() {
        let config = GaConfig::default().with_population_size(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyPopulation));
    }

    #[test]
    fn test_validate_tournament_bounds() {
        let too_big = GaConfig::default()
            .with_population_size(4)
            .with_elite_size(1)
            .with_tournament_size(5);
        assert!(matches!(
            too_big.validate(),
            Err(ConfigError::TournamentSize { .. })
        ));
        let zero = GaConfig::default().with_tournament_size(0);
        assert!(matches!(
            zero.validate(),
            Err(ConfigError::TournamentSize { .. })
        ));
    }

    #[test]
    fn test_validate_elite_too_high() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_size(11);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EliteSize {
                elite_size: 11,
                population_size: 10
            })
        );
    }

    #[test]
    fn test_elite_equal_to_population_is_valid() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_size(10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rates_are_not_clamped() {
        let config = GaConfig::default().with_crossover_rate(1.5);
        assert!((config.crossover_rate - 1.5).abs() < 1e-10);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Rate {
                name: "crossover_rate",
                ..
            })
        ));

        let config = GaConfig::default().with_mutation_rate(-0.1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Rate {
                name: "mutation_rate",
                ..
            })
        ));

        let config = GaConfig::default().with_mutation_rate(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_stopping_policy() {
        let config = GaConfig::default()
            .with_stopping(StoppingPolicy::default().with_stagnation_after(1.5));
        assert_eq!(config.validate(), Err(ConfigError::StagnationFraction(1.5)));

        let config = GaConfig::default().with_time_limit(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeLimit));

        let config = GaConfig::default().with_target_fitness(f64::NAN);
        assert_eq!(config.validate(), Err(ConfigError::NanTarget));
    }
}
