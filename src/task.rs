// src/task.rs

//! Task model: the immutable unit of schedulable work.
//!
//! A [`Task`] is pure data. Dependency and finalizer wiring is carried as
//! plain id lists on the task itself; the graph and planner modules derive
//! everything else from a validated [`TaskSet`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::graph::GraphError;

/// Canonical task id type used throughout the crate.
pub type TaskId = String;

/// The opaque operation performed when a task runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Spawn a single command with an explicit argument list.
    Process {
        command: String,
        args: Vec<String>,
        working_dir: Option<PathBuf>,
    },
    /// Run a command line through the platform shell, permitting pipelines.
    Shell {
        command_line: String,
        working_dir: Option<PathBuf>,
    },
    /// Recursively copy every file under `from` to the mirrored relative
    /// path under `to`.
    Copy { from: PathBuf, to: PathBuf },
    /// Recursively remove each path. Missing paths are not an error.
    Delete { paths: Vec<PathBuf> },
}

/// One declared unit of work.
#[derive(Debug, Clone)]
pub struct Task {
    /// Unique id within a build, stable across runs.
    pub id: TaskId,
    /// Declared read dependencies. Directories expand recursively to the
    /// files they contain.
    pub inputs: Vec<PathBuf>,
    /// Declared produced artifacts.
    pub outputs: Vec<PathBuf>,
    /// Ids of tasks that must complete successfully before this one runs.
    pub depends_on: Vec<TaskId>,
    /// Ids of tasks that must run after this one resolves, regardless of
    /// its outcome (including Skipped).
    pub finalized_by: Vec<TaskId>,
    pub action: Action,
    /// Informational only; no effect on scheduling.
    pub group: Option<String>,
    /// Informational only; no effect on scheduling.
    pub description: Option<String>,
}

impl Task {
    /// Minimal constructor; edge sets and artifact declarations are filled
    /// in by the caller (or a test builder).
    pub fn new(id: impl Into<TaskId>, action: Action) -> Self {
        Self {
            id: id.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            depends_on: Vec::new(),
            finalized_by: Vec::new(),
            action,
            group: None,
            description: None,
        }
    }
}

/// Immutable, id-keyed collection of tasks.
///
/// `BTreeMap` keeps iteration order stable by id, which the planner relies
/// on for deterministic tie-breaking.
#[derive(Debug, Clone)]
pub struct TaskSet {
    tasks: BTreeMap<TaskId, Task>,
}

impl TaskSet {
    /// Build a set from a list of tasks, rejecting duplicate ids.
    pub fn new(tasks: Vec<Task>) -> Result<Self, GraphError> {
        let mut map = BTreeMap::new();
        for task in tasks {
            let id = task.id.clone();
            if map.insert(id.clone(), task).is_some() {
                return Err(GraphError::DuplicateId(id));
            }
        }
        Ok(Self { tasks: map })
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(|s| s.as_str())
    }
}
