//! Append-only result log.
//!
//! One CSV header row, then one row per finished instance:
//!
//! ```text
//! instance_id,time_to_best_s,total_time_s,final_fitness,generations,stop_reason
//! 17,0.001204,0.048113,0,12,converged
//! 18,0.000000,0.000310,NaN,0,failed: representation error: ...
//! ```
//!
//! Every row is written with a single `write_all` while holding both an
//! in-process mutex and an exclusive advisory lock on the file, so rows
//! from concurrent workers (or processes) never interleave.

use super::BatchError;
use crate::ga::StopReason;
use fs2::FileExt;
use std::collections::HashSet;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Header row of the result file.
pub const HEADER: &str =
    "instance_id,time_to_best_s,total_time_s,final_fitness,generations,stop_reason";

const FIELDS: usize = 6;

/// How an instance ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunStatus {
    /// The search ran to a terminal state.
    Stopped(StopReason),
    /// The instance failed; the search error or panic message.
    Failed(String),
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Stopped(reason) => write!(f, "{reason}"),
            RunStatus::Failed(summary) => write!(f, "failed: {}", sanitize(summary)),
        }
    }
}

/// One row of the result log.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultRecord {
    /// Caller-assigned instance identifier; the resume key.
    pub instance_id: u64,
    /// Wall-clock time until the best solution was first seen.
    pub time_to_best: Duration,
    /// Wall-clock time of the whole run.
    pub total_time: Duration,
    /// Best fitness reached (`NaN` for failed instances).
    pub final_fitness: f64,
    /// Generations bred before stopping.
    pub generations: usize,
    /// Terminal state or failure summary.
    pub status: RunStatus,
}

impl ResultRecord {
    /// Row for an instance that could not be solved.
    pub fn failed(instance_id: u64, total_time: Duration, summary: impl Into<String>) -> Self {
        Self {
            instance_id,
            time_to_best: Duration::ZERO,
            total_time,
            final_fitness: f64::NAN,
            generations: 0,
            status: RunStatus::Failed(summary.into()),
        }
    }

    /// Formats the record as one CSV line, newline included.
    pub fn to_row(&self) -> String {
        format!(
            "{},{:.6},{:.6},{},{},{}\n",
            self.instance_id,
            self.time_to_best.as_secs_f64(),
            self.total_time.as_secs_f64(),
            self.final_fitness,
            self.generations,
            self.status
        )
    }
}

/// Keeps failure summaries on one CSV field.
fn sanitize(summary: &str) -> String {
    summary
        .chars()
        .map(|c| if matches!(c, ',' | '\n' | '\r') { ' ' } else { c })
        .collect()
}

/// Shared handle to the result file.
#[derive(Debug)]
pub struct ResultLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl ResultLog {
    /// Opens `path` for appending, writing the header if the file is new
    /// or empty. Existing rows are never truncated.
    ///
    /// A last row left without its newline (a writer died mid-row) is
    /// terminated first, so the next append starts on a fresh line.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BatchError> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)?;

        file.lock_exclusive()?;
        let sealed = seal(&mut file, &path);
        FileExt::unlock(&file)?;
        sealed?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the ids of instances that already have a complete row.
    ///
    /// Blank lines are ignored. Anything else that is not a whole row
    /// (invalid UTF-8, no line terminator, wrong field count, bad id or
    /// unknown stop reason) is skipped with a warning, so that instance
    /// runs again.
    pub fn solved_ids(&self) -> Result<HashSet<u64>, BatchError> {
        let mut reader = BufReader::new(File::open(&self.path)?);
        let mut solved = HashSet::new();
        let mut raw = Vec::new();
        let mut line_no = 0usize;

        loop {
            raw.clear();
            if reader.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            line_no += 1;
            if line_no == 1 {
                continue;
            }
            match row_id(&raw) {
                Ok(Some(id)) => {
                    solved.insert(id);
                }
                Ok(None) => {}
                Err(reason) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        line = line_no,
                        reason,
                        "skipping malformed result row"
                    );
                }
            }
        }

        Ok(solved)
    }

    /// Appends one row atomically.
    pub fn append(&self, record: &ResultRecord) -> Result<(), BatchError> {
        let row = record.to_row();
        // A poisoned guard still owns a file holding only whole rows.
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);

        file.lock_exclusive()?;
        let written = file.write_all(row.as_bytes()).and_then(|()| file.flush());
        FileExt::unlock(&*file)?;
        written?;

        Ok(())
    }
}

/// Writes the header into an empty file, or a newline after a torn last
/// row.
fn seal(file: &mut File, path: &Path) -> io::Result<()> {
    if file.metadata()?.len() == 0 {
        file.write_all(format!("{HEADER}\n").as_bytes())?;
        return file.flush();
    }

    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    if last[0] != b'\n' {
        tracing::warn!(path = %path.display(), "terminating torn last row");
        file.write_all(b"\n")?;
    }
    file.flush()
}

/// Instance id of one raw line, `Ok(None)` for a blank line.
fn row_id(raw: &[u8]) -> Result<Option<u64>, &'static str> {
    let Some(body) = raw.strip_suffix(b"\n") else {
        return if raw.iter().all(u8::is_ascii_whitespace) {
            Ok(None)
        } else {
            Err("row has no line terminator")
        };
    };
    let line = std::str::from_utf8(body).map_err(|_| "row is not valid UTF-8")?;
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != FIELDS {
        return Err("wrong number of fields");
    }
    let id = fields[0]
        .trim()
        .parse::<u64>()
        .map_err(|_| "instance id is not an unsigned integer")?;
    let status = fields[FIELDS - 1].trim();
    if StopReason::parse(status).is_none() && !status.starts_with("failed:") {
        return Err("unknown stop reason");
    }
    Ok(Some(id))
}
