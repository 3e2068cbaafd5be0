// src/exec/executor.rs

//! Plan walker.
//!
//! Tasks resolve in plan order, one at a time. Ordering guarantees:
//! a task never starts before all of its `depends_on` have resolved, and a
//! finalizer never starts before its trigger resolves; the planner encodes
//! both in the plan order, so a sequential walk honours them.
//!
//! Failure policy: a failed task never unwinds the walk. Its dependents are
//! marked failed without running (short-circuit); tasks included purely as
//! finalizers are exempt and always reach the oracle/action step. A task
//! that is both a finalizer and someone's dependency short-circuits like
//! any other task.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::exec::actions::run_action;
use crate::graph::ExecutionPlan;
use crate::outcome::{BuildResult, FailureCause, TaskResult};
use crate::stale;
use crate::task::{Task, TaskId, TaskSet};

/// Execute the plan and aggregate per-task results.
///
/// Always returns a complete [`BuildResult`], even when tasks failed.
pub async fn run(plan: &ExecutionPlan, tasks: &TaskSet) -> BuildResult {
    let mut results: BTreeMap<TaskId, TaskResult> = BTreeMap::new();

    for id in plan.order() {
        let Some(task) = tasks.get(id) else {
            // Plans are derived from the same set; be defensive anyway.
            warn!(task = %id, "plan references a task missing from the set");
            continue;
        };

        let result = resolve_task(task, plan, &results).await;
        match &result {
            TaskResult::Skipped => info!(task = %id, "up to date; skipped"),
            TaskResult::Succeeded => info!(task = %id, "succeeded"),
            TaskResult::Failed(cause) => warn!(task = %id, cause = %cause, "failed"),
        }
        results.insert(id.clone(), result);
    }

    let success = !results
        .iter()
        .any(|(id, r)| r.is_failed() && !plan.is_finalizer(id));

    BuildResult { results, success }
}

/// Resolve one task: short-circuit on upstream failure (pure finalizers
/// exempt), skip when fresh, otherwise invoke the action.
async fn resolve_task(
    task: &Task,
    plan: &ExecutionPlan,
    results: &BTreeMap<TaskId, TaskResult>,
) -> TaskResult {
    // Pure finalizers are the designated place for unconditional cleanup;
    // they run no matter what happened upstream.
    if !plan.is_finalizer(&task.id) {
        let failed_dep = task
            .depends_on
            .iter()
            .find(|dep| matches!(results.get(*dep), Some(TaskResult::Failed(_))));

        if let Some(dep) = failed_dep {
            warn!(
                task = %task.id,
                upstream = %dep,
                "upstream failure; not invoking action"
            );
            return TaskResult::Failed(FailureCause::UpstreamFailure(dep.clone()));
        }
    }

    match stale::is_stale(task) {
        Ok(false) => TaskResult::Skipped,
        Ok(true) => match run_action(&task.id, &task.action).await {
            Ok(()) => TaskResult::Succeeded,
            Err(cause) => TaskResult::Failed(cause),
        },
        Err(e) => TaskResult::Failed(FailureCause::Io(format!(
            "freshness check failed: {e}"
        ))),
    }
}
