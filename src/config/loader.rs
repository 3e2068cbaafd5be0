// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::BuildFile;
use crate::errors::Result;
use crate::task::TaskSet;

/// Load a build definition from a given path and return the raw [`BuildFile`].
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (action well-formedness, graph structure). Use
/// [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<BuildFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let raw: BuildFile = toml::from_str(&contents)?;

    Ok(raw)
}

/// Load a build definition from path and produce a validated task set.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks action well-formedness and rejects empty definitions.
///
/// Referential integrity and acyclicity of the `depends_on` /
/// `finalized_by` edges are checked later by the planner, which owns those
/// invariants for *any* task set, not just ones loaded from TOML.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<TaskSet> {
    let raw = load_from_path(&path)?;
    let set = TaskSet::try_from(raw)?;
    Ok(set)
}
