//! Error types for the genetic search engine.

/// A rejected configuration value.
///
/// Returned before any generation runs. Values are never clamped into
/// range; the caller is told which option was wrong.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("population_size must be positive")]
    EmptyPopulation,
    #[error("tournament_size must be in 1..={population_size}, got {tournament_size}")]
    TournamentSize {
        tournament_size: usize,
        population_size: usize,
    },
    #[error("elite_size {elite_size} exceeds population_size {population_size}")]
    EliteSize {
        elite_size: usize,
        population_size: usize,
    },
    #[error("{name} must be a probability in [0, 1], got {value}")]
    Rate { name: &'static str, value: f64 },
    #[error("invalid bounds: min {min} must be finite and below max {max}")]
    Bounds { min: f64, max: f64 },
    #[error("genotype length must be positive")]
    EmptyGenotype,
    #[error("precision {precision} exceeds the {max} bits an f64 holds exactly")]
    Precision { precision: usize, max: usize },
    #[error("stagnation_after must be a fraction in [0, 1], got {0}")]
    StagnationFraction(f64),
    #[error("time_limit must be positive")]
    ZeroTimeLimit,
    #[error("target_fitness must not be NaN")]
    NanTarget,
    #[error("worker pool needs at least one worker")]
    NoWorkers,
}

/// A genotype pair the representation cannot operate on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepresentationError {
    #[error("parents differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}

/// Failure of a single search run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("representation error: {0}")]
    Representation(#[from] RepresentationError),
}
