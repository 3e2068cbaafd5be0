// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod graph;
pub mod logging;
pub mod outcome;
pub mod stale;
pub mod task;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::errors::Result;
use crate::graph::{build_plan, build_plan_for_target, ExecutionPlan};
use crate::outcome::BuildResult;
use crate::task::TaskSet;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - build definition loading
/// - plan construction (full set or `--task` target closure)
/// - the executor
/// - the console report
pub async fn run(args: CliArgs) -> Result<BuildResult> {
    let config_path = PathBuf::from(&args.config);
    let tasks = load_and_validate(&config_path)?;

    let plan = match &args.task {
        Some(target) => build_plan_for_target(&tasks, target)?,
        None => build_plan(&tasks)?,
    };

    info!(tasks = plan.len(), "execution plan ready");

    if args.dry_run {
        print_dry_run(&tasks, &plan);
        // Nothing ran; an empty result with the success flag set keeps the
        // exit-code convention intact.
        return Ok(BuildResult {
            results: Default::default(),
            success: true,
        });
    }

    let result = exec::run(&plan, &tasks).await;
    print!("{}", result.summary());

    debug!(success = result.success, "build finished");
    Ok(result)
}

/// Simple dry-run output: the plan order with edges and descriptions.
fn print_dry_run(tasks: &TaskSet, plan: &ExecutionPlan) {
    println!("taskdag dry-run");
    println!();

    println!("plan ({} tasks):", plan.len());
    for id in plan.order() {
        let Some(task) = tasks.get(id) else { continue };

        let marker = if plan.is_finalizer(id) {
            " [finalizer]"
        } else {
            ""
        };
        println!("  - {id}{marker}");

        if let Some(ref desc) = task.description {
            println!("      description: {desc}");
        }
        if let Some(ref group) = task.group {
            println!("      group: {group}");
        }
        if !task.depends_on.is_empty() {
            println!("      depends_on: {:?}", task.depends_on);
        }
        if !task.finalized_by.is_empty() {
            println!("      finalized_by: {:?}", task.finalized_by);
        }
        if !task.inputs.is_empty() {
            println!("      inputs: {:?}", task.inputs);
        }
        if !task.outputs.is_empty() {
            println!("      outputs: {:?}", task.outputs);
        }
    }

    debug!("dry-run complete (no execution)");
}
