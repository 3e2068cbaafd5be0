// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level build definition as read from a TOML file.
///
/// ```toml
/// [task.compile]
/// action = { type = "process", command = "elm", args = ["make", "src/main/elm/Main.elm", "--output", "build/elm.js"] }
/// inputs = ["src"]
/// outputs = ["build/elm.js"]
/// depends_on = ["copy_resources"]
///
/// [task.copy_resources]
/// action = { type = "copy", from = "src/main/resources", to = "build" }
/// inputs = ["src/main/resources"]
/// outputs = ["build"]
/// description = "Copies resources to build directory."
/// group = "properties"
///
/// [task.clean]
/// action = { type = "delete", paths = ["elm/elm-stuff", "build"] }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct BuildFile {
    /// All tasks from `[task.<name>]`.
    ///
    /// Keys are the *task ids* (e.g. `"compile"`, `"clean"`).
    #[serde(default)]
    pub task: BTreeMap<String, TaskTable>,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskTable {
    /// What the task does when it runs.
    pub action: ActionTable,

    /// Declared read dependencies; directories expand recursively.
    #[serde(default)]
    pub inputs: Vec<PathBuf>,

    /// Declared produced artifacts.
    #[serde(default)]
    pub outputs: Vec<PathBuf>,

    /// Ids of tasks that must complete successfully first.
    #[serde(default)]
    pub depends_on: Vec<String>,

    /// Ids of tasks that run after this one, whatever its outcome.
    #[serde(default)]
    pub finalized_by: Vec<String>,

    /// Informational grouping label.
    #[serde(default)]
    pub group: Option<String>,

    /// Informational description.
    #[serde(default)]
    pub description: Option<String>,
}

/// The action variant for a task, tagged by `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionTable {
    /// Spawn a command with an explicit argument list.
    Process {
        command: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        working_dir: Option<PathBuf>,
    },
    /// Run a command line through the shell (pipelines allowed).
    Shell {
        command_line: String,
        #[serde(default)]
        working_dir: Option<PathBuf>,
    },
    /// Recursive copy of a file tree.
    Copy { from: PathBuf, to: PathBuf },
    /// Recursive removal of the listed paths; missing paths are fine.
    Delete { paths: Vec<PathBuf> },
}
