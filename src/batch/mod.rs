//! Parallel batch execution of independent search instances.
//!
//! [`BatchRunner`] fans instances out over a fixed-size pool. Each worker
//! runs one complete search per instance and appends one
//! [`ResultRecord`] to a shared [`ResultLog`]. Instances whose id is
//! already in the log are skipped, so an interrupted batch resumes where
//! it stopped.
//!
//! A failing instance (error or panic) is written as a `failed` row and
//! never aborts its siblings.

mod log;
mod runner;

pub use log::{ResultLog, ResultRecord, RunStatus, HEADER};
pub use runner::{BatchConfig, BatchError, BatchReport, BatchRunner, InstanceOutcome};
