#![allow(dead_code)]

use std::path::Path;

use taskdag::task::{Action, Task, TaskSet};

/// Builder for a [`TaskSet`] to simplify test setup.
pub struct TaskSetBuilder {
    tasks: Vec<Task>,
}

impl TaskSetBuilder {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn build(self) -> TaskSet {
        TaskSet::new(self.tasks).expect("failed to build valid task set from builder")
    }

    /// Variant for tests that expect construction itself to fail.
    pub fn try_build(self) -> Result<TaskSet, taskdag::graph::GraphError> {
        TaskSet::new(self.tasks)
    }
}

impl Default for TaskSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a single [`Task`].
///
/// Defaults to a shell action echoing the task id, which is cheap and
/// side-effect free for scheduling-only tests.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            task: Task::new(
                id,
                Action::Shell {
                    command_line: format!("echo {id}"),
                    working_dir: None,
                },
            ),
        }
    }

    pub fn action(mut self, action: Action) -> Self {
        self.task.action = action;
        self
    }

    pub fn shell(mut self, command_line: &str) -> Self {
        self.task.action = Action::Shell {
            command_line: command_line.to_string(),
            working_dir: None,
        };
        self
    }

    pub fn shell_in(mut self, command_line: &str, working_dir: &Path) -> Self {
        self.task.action = Action::Shell {
            command_line: command_line.to_string(),
            working_dir: Some(working_dir.to_path_buf()),
        };
        self
    }

    pub fn copy(mut self, from: &Path, to: &Path) -> Self {
        self.task.action = Action::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        };
        self
    }

    pub fn delete(mut self, paths: &[&Path]) -> Self {
        self.task.action = Action::Delete {
            paths: paths.iter().map(|p| p.to_path_buf()).collect(),
        };
        self
    }

    pub fn input(mut self, path: &Path) -> Self {
        self.task.inputs.push(path.to_path_buf());
        self
    }

    pub fn output(mut self, path: &Path) -> Self {
        self.task.outputs.push(path.to_path_buf());
        self
    }

    pub fn depends_on(mut self, id: &str) -> Self {
        self.task.depends_on.push(id.to_string());
        self
    }

    pub fn finalized_by(mut self, id: &str) -> Self {
        self.task.finalized_by.push(id.to_string());
        self
    }

    pub fn group(mut self, group: &str) -> Self {
        self.task.group = Some(group.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.task.description = Some(description.to_string());
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}
