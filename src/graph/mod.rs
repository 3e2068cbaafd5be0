// src/graph/mod.rs

//! Dependency graph and execution planning.
//!
//! - [`graph`] holds a simple directed acyclic graph view of a task set.
//! - [`planner`] validates the graph (references, cycles) and derives the
//!   deterministic [`ExecutionPlan`] the executor walks.

pub mod graph;
pub mod planner;

use thiserror::Error;

use crate::task::TaskId;

pub use graph::TaskGraph;
pub use planner::{build_plan, build_plan_for_target, ExecutionPlan};

/// Structural errors that abort a build before any task runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate task id '{0}'")]
    DuplicateId(TaskId),

    #[error("task '{task}' references unknown task '{missing}'")]
    DanglingReference { task: TaskId, missing: TaskId },

    #[error("cycle detected in task graph: {}", .path.join(" -> "))]
    CycleDetected { path: Vec<TaskId> },

    #[error("task not found: {0}")]
    UnknownTask(TaskId),
}
