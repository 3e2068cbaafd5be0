// src/stale.rs

//! Incrementality oracle: decides whether a task's action must run or can
//! be skipped, by comparing declared outputs against declared inputs.
//!
//! The comparison is timestamp based and conservative: missing outputs,
//! missing inputs, and input declarations that expand to zero files all
//! force a run. No build metadata is persisted; the filesystem's own mtimes
//! are the only state consulted.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use tracing::debug;

use crate::task::{Action, Task};

/// Whether the task's action must run.
pub fn is_stale(task: &Task) -> io::Result<bool> {
    // Deletions exist purely for their side effect; never skip them.
    if matches!(task.action, Action::Delete { .. }) {
        return Ok(true);
    }

    // No declared artifacts means nothing to check against.
    if task.outputs.is_empty() {
        debug!(task = %task.id, "no declared outputs; always stale");
        return Ok(true);
    }

    let mut earliest_output: Option<SystemTime> = None;
    for output in &task.outputs {
        if !output.exists() {
            debug!(task = %task.id, output = %output.display(), "output missing; stale");
            return Ok(true);
        }
        let mtime = fs::metadata(output)?.modified()?;
        earliest_output = Some(match earliest_output {
            Some(t) => t.min(mtime),
            None => mtime,
        });
    }

    let mut latest_input: Option<SystemTime> = None;
    let mut input_files = 0usize;
    for input in &task.inputs {
        if !input.exists() {
            debug!(task = %task.id, input = %input.display(), "input missing; stale");
            return Ok(true);
        }
        scan_input(input, &mut latest_input, &mut input_files)?;
    }

    // Declared inputs that expand to nothing leave the task in an unknown
    // state; rerun rather than trust a possibly hollow artifact.
    if !task.inputs.is_empty() && input_files == 0 {
        debug!(task = %task.id, "inputs expanded to zero files; stale");
        return Ok(true);
    }

    let stale = match (latest_input, earliest_output) {
        (Some(input), Some(output)) => input > output,
        // No inputs at all: existing outputs are as fresh as they can be.
        _ => false,
    };

    debug!(
        task = %task.id,
        input_files,
        stale,
        "freshness check complete"
    );
    Ok(stale)
}

/// Fold the mtime of every file reachable from `path` into `latest`.
///
/// Directories expand recursively; a directory with no files contributes
/// no constraint.
fn scan_input(
    path: &Path,
    latest: &mut Option<SystemTime>,
    files: &mut usize,
) -> io::Result<()> {
    let meta = fs::metadata(path)?;
    if meta.is_file() {
        *files += 1;
        let mtime = meta.modified()?;
        *latest = Some(match *latest {
            Some(t) => t.max(mtime),
            None => mtime,
        });
        return Ok(());
    }

    if meta.is_dir() {
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            scan_input(&entry.path(), latest, files)?;
        }
    }

    Ok(())
}
