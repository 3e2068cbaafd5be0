// src/exec/actions.rs

//! Individual action runners.
//!
//! Every runner reports either success or a [`FailureCause`]; no runner
//! panics or unwinds the executor. Process stdout/stderr are inherited and
//! forwarded untouched.

use std::fs;
use std::io;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::outcome::FailureCause;
use crate::task::Action;

/// Run one action to completion.
pub async fn run_action(task_id: &str, action: &Action) -> Result<(), FailureCause> {
    match action {
        Action::Process {
            command,
            args,
            working_dir,
        } => {
            let mut cmd = Command::new(command);
            cmd.args(args);
            if let Some(dir) = working_dir {
                cmd.current_dir(dir);
            }
            wait_for_exit(task_id, cmd).await
        }

        Action::Shell {
            command_line,
            working_dir,
        } => {
            // Build a shell command appropriate for the platform.
            let mut cmd = if cfg!(windows) {
                let mut c = Command::new("cmd");
                c.arg("/C").arg(command_line);
                c
            } else {
                let mut c = Command::new("sh");
                c.arg("-c").arg(command_line);
                c
            };
            if let Some(dir) = working_dir {
                cmd.current_dir(dir);
            }
            wait_for_exit(task_id, cmd).await
        }

        Action::Copy { from, to } => copy_tree(from, to).map_err(|e| io_cause(task_id, e)),

        Action::Delete { paths } => {
            for path in paths {
                delete_path(path).map_err(|e| io_cause(task_id, e))?;
            }
            Ok(())
        }
    }
}

fn io_cause(task_id: &str, err: io::Error) -> FailureCause {
    debug!(task = %task_id, error = %err, "filesystem action failed");
    FailureCause::Io(err.to_string())
}

/// Spawn the command, forward stdio, wait for exit.
async fn wait_for_exit(task_id: &str, mut cmd: Command) -> Result<(), FailureCause> {
    cmd.stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    info!(task = %task_id, "starting task process");

    let mut child = cmd
        .spawn()
        .map_err(|e| FailureCause::Io(format!("spawning process: {e}")))?;

    let status = child
        .wait()
        .await
        .map_err(|e| FailureCause::Io(format!("waiting for process: {e}")))?;

    let code = status.code().unwrap_or(-1);
    info!(
        task = %task_id,
        exit_code = code,
        success = status.success(),
        "task process exited"
    );

    if status.success() {
        Ok(())
    } else {
        Err(FailureCause::ExitCode(code))
    }
}

/// Copy every file under `from` to the mirrored relative path under `to`.
///
/// Directories are created as needed and existing files are overwritten.
/// The first I/O error aborts the whole copy.
fn copy_tree(from: &Path, to: &Path) -> io::Result<()> {
    let meta = fs::metadata(from)?;

    if meta.is_file() {
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(from, to)?;
        return Ok(());
    }

    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        copy_tree(&entry.path(), &target)?;
    }

    Ok(())
}

/// Remove a path recursively; a missing path is a success (idempotent).
fn delete_path(path: &Path) -> io::Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "delete target already absent");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
