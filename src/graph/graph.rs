// src/graph/graph.rs

use std::collections::HashMap;

use crate::task::{TaskId, TaskSet};

/// Internal node structure: immediate deps, dependents and finalizers.
#[derive(Debug, Clone)]
struct TaskNode {
    /// Direct dependencies: tasks that must succeed before this one runs.
    deps: Vec<TaskId>,
    /// Direct dependents: tasks that list this one in their `depends_on`.
    dependents: Vec<TaskId>,
    /// Finalizers: tasks that must run after this one resolves.
    finalizers: Vec<TaskId>,
}

/// Simple in-memory adjacency view keyed by task id.
///
/// This is intentionally lightweight; referential integrity and acyclicity
/// are checked by the planner before anything walks this structure, so here
/// we just keep adjacency information for scheduling and diagnostics.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    nodes: HashMap<TaskId, TaskNode>,
}

impl TaskGraph {
    /// Build the adjacency view from a task set.
    ///
    /// Assumes all `depends_on` / `finalized_by` references are valid.
    pub fn from_set(set: &TaskSet) -> Self {
        let mut nodes: HashMap<TaskId, TaskNode> = HashMap::new();

        for task in set.iter() {
            nodes.insert(
                task.id.clone(),
                TaskNode {
                    deps: task.depends_on.clone(),
                    dependents: Vec::new(),
                    finalizers: task.finalized_by.clone(),
                },
            );
        }

        // Second pass: populate dependents based on deps.
        let ids: Vec<TaskId> = nodes.keys().cloned().collect();
        for id in ids {
            let deps = nodes
                .get(&id)
                .map(|n| n.deps.clone())
                .unwrap_or_default();

            for dep in deps {
                if let Some(dep_node) = nodes.get_mut(&dep) {
                    dep_node.dependents.push(id.clone());
                }
            }
        }

        Self { nodes }
    }

    /// All task ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|s| s.as_str())
    }

    /// Immediate dependencies of a task (its `depends_on` list).
    pub fn dependencies_of(&self, id: &str) -> &[TaskId] {
        self.nodes
            .get(id)
            .map(|n| n.deps.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate dependents of a task (tasks listing it in `depends_on`).
    pub fn dependents_of(&self, id: &str) -> &[TaskId] {
        self.nodes
            .get(id)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Finalizers of a task (its `finalized_by` list).
    pub fn finalizers_of(&self, id: &str) -> &[TaskId] {
        self.nodes
            .get(id)
            .map(|n| n.finalizers.as_slice())
            .unwrap_or(&[])
    }
}
