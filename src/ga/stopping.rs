//! Stopping policy.
//!
//! A run moves from initialization into the generation loop and ends in
//! exactly one terminal [`StopReason`]. [`StoppingPolicy::check`] is
//! evaluated once per generation after the population has been scored.

use std::fmt;
use std::time::Duration;

/// Why a run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StopReason {
    /// Best fitness reached the target value.
    Converged,
    /// Best fitness did not change between the two most recent generations.
    Stagnated,
    /// The wall-clock budget was exceeded.
    TimedOut,
    /// The configured generation count was reached.
    Exhausted,
}

impl StopReason {
    /// Stable lowercase label used in logs and the result file.
    pub fn as_str(self) -> &'static str {
        match self {
            StopReason::Converged => "converged",
            StopReason::Stagnated => "stagnated",
            StopReason::TimedOut => "timed_out",
            StopReason::Exhausted => "exhausted",
        }
    }

    /// Parses a label produced by [`as_str`](Self::as_str).
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "converged" => Some(StopReason::Converged),
            "stagnated" => Some(StopReason::Stagnated),
            "timed_out" => Some(StopReason::TimedOut),
            "exhausted" => Some(StopReason::Exhausted),
            _ => None,
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Early-stopping conditions layered on top of the generation budget.
///
/// All conditions are off by default, in which case a run always ends
/// [`Exhausted`](StopReason::Exhausted).
///
/// When several conditions fire on the same generation the precedence is
/// `Converged > Stagnated > TimedOut > Exhausted`.
///
/// # Examples
///
/// ```
/// use evosearch::ga::StoppingPolicy;
/// use std::time::Duration;
///
/// let policy = StoppingPolicy::default()
///     .with_target_fitness(0.0)
///     .with_stagnation_after(0.5)
///     .with_time_limit(Duration::from_secs(30));
/// assert_eq!(policy.target_fitness, Some(0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoppingPolicy {
    /// Stop as soon as the best fitness is at or below this value.
    ///
    /// Only meaningful for problems with a known perfect score, e.g. `0.0`
    /// for target matching.
    pub target_fitness: Option<f64>,

    /// Fraction of the generation budget after which stagnation is checked.
    ///
    /// `Some(0.5)` with 1000 generations allows stagnation stops from
    /// generation 500 on. `None` disables stagnation stops.
    pub stagnation_after: Option<f64>,

    /// Wall-clock ceiling for the whole run.
    ///
    /// Checked once per generation, so a run may overshoot by one
    /// generation's worth of work.
    pub time_limit: Option<Duration>,
}

/// Snapshot of run progress handed to [`StoppingPolicy::check`].
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// Zero-based index of the generation just evaluated.
    pub generation: usize,
    /// Configured generation budget.
    pub max_generations: usize,
    /// Per-generation best fitness, oldest first, including the current one.
    pub best_per_generation: &'a [f64],
    /// Wall-clock time since the run started.
    pub elapsed: Duration,
}

impl StoppingPolicy {
    /// Sets the target fitness.
    pub fn with_target_fitness(mut self, target: f64) -> Self {
        self.target_fitness = Some(target);
        self
    }

    /// Enables stagnation stops after `fraction` of the generation budget.
    pub fn with_stagnation_after(mut self, fraction: f64) -> Self {
        self.stagnation_after = Some(fraction);
        self
    }

    /// Sets the wall-clock ceiling.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// First generation at which stagnation may be reported.
    fn stagnation_start(&self, max_generations: usize) -> Option<usize> {
        self.stagnation_after
            .map(|fraction| (max_generations as f64 * fraction).floor() as usize)
    }

    /// Returns the terminal state for this generation, if any.
    pub fn check(&self, progress: &Progress<'_>) -> Option<StopReason> {
        let current = progress.best_per_generation.last().copied();

        if let (Some(target), Some(best)) = (self.target_fitness, current) {
            if best <= target {
                return Some(StopReason::Converged);
            }
        }

        if let Some(start) = self.stagnation_start(progress.max_generations) {
            if progress.generation > 0 && progress.generation >= start {
                if let [.., previous, latest] = progress.best_per_generation {
                    if latest == previous {
                        return Some(StopReason::Stagnated);
                    }
                }
            }
        }

        if let Some(limit) = self.time_limit {
            if progress.elapsed > limit {
                return Some(StopReason::TimedOut);
            }
        }

        if progress.generation >= progress.max_generations {
            return Some(StopReason::Exhausted);
        }

        None
    }
}
