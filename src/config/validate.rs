// src/config/validate.rs

use crate::config::model::{ActionTable, BuildFile, TaskTable};
use crate::errors::{Result, TaskdagError};
use crate::task::{Action, Task, TaskSet};

impl TryFrom<BuildFile> for TaskSet {
    type Error = TaskdagError;

    fn try_from(raw: BuildFile) -> std::result::Result<Self, Self::Error> {
        validate_raw(&raw)?;

        let tasks: Vec<Task> = raw
            .task
            .into_iter()
            .map(|(id, table)| into_task(id, table))
            .collect();

        // Duplicate ids cannot occur coming from a TOML table, but the
        // TaskSet constructor is the single owner of that invariant.
        let set = TaskSet::new(tasks)?;
        Ok(set)
    }
}

fn validate_raw(raw: &BuildFile) -> Result<()> {
    if raw.task.is_empty() {
        return Err(TaskdagError::ConfigError(
            "build definition must contain at least one [task.<name>] section".to_string(),
        ));
    }

    for (id, table) in raw.task.iter() {
        validate_action(id, &table.action)?;
    }

    Ok(())
}

fn validate_action(id: &str, action: &ActionTable) -> Result<()> {
    match action {
        ActionTable::Process { command, .. } if command.trim().is_empty() => {
            Err(TaskdagError::ConfigError(format!(
                "task '{id}' has an empty `command` in its process action"
            )))
        }
        ActionTable::Shell { command_line, .. } if command_line.trim().is_empty() => {
            Err(TaskdagError::ConfigError(format!(
                "task '{id}' has an empty `command_line` in its shell action"
            )))
        }
        ActionTable::Delete { paths } if paths.is_empty() => {
            Err(TaskdagError::ConfigError(format!(
                "task '{id}' has a delete action with no paths"
            )))
        }
        _ => Ok(()),
    }
}

fn into_task(id: String, table: TaskTable) -> Task {
    let action = match table.action {
        ActionTable::Process {
            command,
            args,
            working_dir,
        } => Action::Process {
            command,
            args,
            working_dir,
        },
        ActionTable::Shell {
            command_line,
            working_dir,
        } => Action::Shell {
            command_line,
            working_dir,
        },
        ActionTable::Copy { from, to } => Action::Copy { from, to },
        ActionTable::Delete { paths } => Action::Delete { paths },
    };

    Task {
        id,
        inputs: table.inputs,
        outputs: table.outputs,
        depends_on: table.depends_on,
        finalized_by: table.finalized_by,
        action,
        group: table.group,
        description: table.description,
    }
}
