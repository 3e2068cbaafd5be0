// src/config/mod.rs

//! Build-definition front end.
//!
//! - [`model`] is the raw TOML shape of `Taskdag.toml`.
//! - [`loader`] reads and parses a definition file.
//! - [`validate`] turns the raw model into a validated [`crate::task::TaskSet`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{ActionTable, BuildFile, TaskTable};
