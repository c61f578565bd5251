//! Fixed-size worker pool over independent search instances.

use super::log::{ResultLog, ResultRecord, RunStatus};
use crate::ga::{ConfigError, GaResult, StopReason};
use rayon::prelude::*;
use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Errors that abort a whole batch before any instance runs.
///
/// Failures inside one instance never surface here; they become a
/// `failed` row in the log instead.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("result log I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Batch runner configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchConfig {
    /// Number of worker threads; each runs one instance at a time.
    pub workers: usize,
    /// Shared append-only result file.
    pub log_path: PathBuf,
}

impl BatchConfig {
    /// One worker per available CPU.
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            workers,
            log_path: log_path.into(),
        }
    }

    /// Sets the pool size.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Rejects an empty pool.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(())
    }
}

/// What one solved instance contributes to the log.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceOutcome {
    /// Wall-clock time until the best solution was first seen.
    pub time_to_best: Duration,
    /// Wall-clock time of the whole run.
    pub total_time: Duration,
    /// Best fitness reached.
    pub final_fitness: f64,
    /// Generations bred before stopping.
    pub generations: usize,
    /// Terminal state of the run.
    pub stop_reason: StopReason,
}

impl<G, P> From<GaResult<G, P>> for InstanceOutcome {
    fn from(result: GaResult<G, P>) -> Self {
        Self {
            time_to_best: result.time_to_best,
            total_time: result.elapsed,
            final_fitness: result.best_fitness,
            generations: result.generations,
            stop_reason: result.stop_reason,
        }
    }
}

/// Counts for one [`BatchRunner::run`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Instances already present in the log (or repeated in the input).
    pub skipped: usize,
    /// Instances that ran to a terminal state.
    pub solved: usize,
    /// Instances recorded as `failed`.
    pub failed: usize,
    /// Instances whose row could not be appended; they will run again on
    /// the next resume.
    pub unrecorded: Vec<u64>,
}

/// Runs one search per instance on a dedicated pool and records each
/// outcome in a shared [`ResultLog`].
///
/// Re-running over the same log only computes instances with no row yet.
///
/// # Usage
///
/// ```no_run
/// use evosearch::batch::{BatchConfig, BatchRunner};
/// use evosearch::ga::{EngineError, GaConfig, GaRunner, SubsetBits};
/// use evosearch::problems::SubsetSum;
///
/// let instances = vec![(1, SubsetSum::new(vec![3, 5, 7], 12))];
/// let runner = BatchRunner::new(BatchConfig::new("results.csv").with_workers(4)).unwrap();
/// let config = GaConfig::default().with_target_fitness(0.0);
///
/// let report = runner
///     .run(&instances, |(id, _)| *id, |(_, problem)| -> Result<_, EngineError> {
///         let rep = SubsetBits::new(problem.weights.len())?;
///         GaRunner::run(&rep, |bits: &Vec<bool>| problem.fitness(bits), &config)
///     })
///     .unwrap();
/// println!("{report:?}");
/// ```
#[derive(Debug)]
pub struct BatchRunner {
    config: BatchConfig,
}

impl BatchRunner {
    /// Validates `config`; no file is touched until [`run`](Self::run).
    pub fn new(config: BatchConfig) -> Result<Self, BatchError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this runner was built with.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Solves every instance whose id (from `id_of`) is not yet logged.
    ///
    /// `solve` runs on a worker thread. An `Err` return or a panic is
    /// turned into a `failed` row; the other instances keep running.
    ///
    /// # Errors
    ///
    /// Returns an error only if the log cannot be opened or read, or the
    /// pool cannot be built. Nothing has been solved in that case.
    pub fn run<I, K, S, O, E>(
        &self,
        instances: &[I],
        id_of: K,
        solve: S,
    ) -> Result<BatchReport, BatchError>
    where
        I: Sync,
        K: Fn(&I) -> u64,
        S: Fn(&I) -> Result<O, E> + Sync,
        O: Into<InstanceOutcome>,
        E: Display,
    {
        let log = ResultLog::open(&self.config.log_path)?;
        let mut seen = log.solved_ids()?;

        let pending: Vec<(u64, &I)> = instances
            .iter()
            .map(|instance| (id_of(instance), instance))
            .filter(|(id, _)| seen.insert(*id))
            .collect();
        let skipped = instances.len() - pending.len();

        tracing::info!(
            path = %self.config.log_path.display(),
            workers = self.config.workers,
            pending = pending.len(),
            skipped,
            "starting batch"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("evosearch-worker-{i}"))
            .build()?;

        let outcomes: Vec<(u64, Option<bool>)> = pool.install(|| {
            pending
                .par_iter()
                .map(|&(id, instance)| (id, solve_and_record(&log, id, instance, &solve)))
                .collect()
        });

        let mut report = BatchReport {
            skipped,
            ..BatchReport::default()
        };
        for (id, outcome) in outcomes {
            match outcome {
                Some(true) => report.solved += 1,
                Some(false) => report.failed += 1,
                None => report.unrecorded.push(id),
            }
        }

        tracing::info!(
            solved = report.solved,
            failed = report.failed,
            unrecorded = report.unrecorded.len(),
            "batch finished"
        );
        Ok(report)
    }
}

/// Returns `Some(true)` for a solved row, `Some(false)` for a failed row,
/// `None` if the row could not be written.
fn solve_and_record<I, S, O, E>(log: &ResultLog, id: u64, instance: &I, solve: &S) -> Option<bool>
where
    S: Fn(&I) -> Result<O, E>,
    O: Into<InstanceOutcome>,
    E: Display,
{
    let _span = tracing::debug_span!("instance", instance_id = id).entered();
    let start = Instant::now();

    let record = match panic::catch_unwind(AssertUnwindSafe(|| solve(instance))) {
        Ok(Ok(outcome)) => {
            let outcome = outcome.into();
            ResultRecord {
                instance_id: id,
                time_to_best: outcome.time_to_best,
                total_time: outcome.total_time,
                final_fitness: outcome.final_fitness,
                generations: outcome.generations,
                status: RunStatus::Stopped(outcome.stop_reason),
            }
        }
        Ok(Err(err)) => {
            tracing::warn!(instance_id = id, error = %err, "instance failed");
            ResultRecord::failed(id, start.elapsed(), err.to_string())
        }
        Err(payload) => {
            let summary = panic_summary(payload.as_ref());
            tracing::warn!(instance_id = id, panic = %summary, "instance panicked");
            ResultRecord::failed(id, start.elapsed(), format!("panic: {summary}"))
        }
    };

    let solved = matches!(record.status, RunStatus::Stopped(_));
    match log.append(&record) {
        Ok(()) => Some(solved),
        Err(err) => {
            tracing::warn!(instance_id = id, error = %err, "could not record result");
            None
        }
    }
}

fn panic_summary(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
