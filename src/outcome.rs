// src/outcome.rs

//! Per-task and per-build result types.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use thiserror::Error;

use crate::task::TaskId;

/// Why a task failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    #[error("upstream task '{0}' failed")]
    UpstreamFailure(TaskId),

    #[error("process exited with code {0}")]
    ExitCode(i32),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Terminal state of one task, produced exactly once per build invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Outputs were up to date; the action was not invoked.
    Skipped,
    Succeeded,
    Failed(FailureCause),
}

impl TaskResult {
    pub fn is_failed(&self) -> bool {
        matches!(self, TaskResult::Failed(_))
    }
}

/// Aggregated outcome of one build invocation.
///
/// `success` is true iff no non-finalizer task failed; a failed finalizer is
/// reported per task but does not flip the flag.
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub results: BTreeMap<TaskId, TaskResult>,
    pub success: bool,
}

impl BuildResult {
    pub fn result_of(&self, id: &str) -> Option<&TaskResult> {
        self.results.get(id)
    }

    /// Ids of failed tasks with their causes, ascending by id.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &FailureCause)> {
        self.results.iter().filter_map(|(id, r)| match r {
            TaskResult::Failed(cause) => Some((id.as_str(), cause)),
            _ => None,
        })
    }

    /// Human-readable per-task report for console output.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for (id, result) in &self.results {
            let line = match result {
                TaskResult::Skipped => format!("  {id}: up to date"),
                TaskResult::Succeeded => format!("  {id}: ok"),
                TaskResult::Failed(cause) => format!("  {id}: FAILED ({cause})"),
            };
            let _ = writeln!(out, "{line}");
        }

        let verdict = if self.success {
            "build succeeded"
        } else {
            "build failed"
        };
        let _ = writeln!(out, "{verdict}");
        out
    }
}
