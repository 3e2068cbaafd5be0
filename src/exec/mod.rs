// src/exec/mod.rs

//! Execution layer.
//!
//! - [`actions`] runs one task's action to completion: process spawning via
//!   `tokio::process::Command`, shell pipelines, recursive copy/delete.
//! - [`executor`] walks the execution plan, consults the staleness oracle,
//!   short-circuits dependents of failed tasks and guarantees finalizers
//!   run, aggregating everything into a [`crate::outcome::BuildResult`].

pub mod actions;
pub mod executor;

pub use executor::run;
