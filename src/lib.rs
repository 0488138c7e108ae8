//! Distribution tree builder.
//!
//! Copies a package's `src/` tree into `dist/`, then overlays named config
//! subtrees (`src/configs/<name>/`) from this and sibling packages onto
//! `dist/configs/<name>/`, in the order given by the package's `build.json`.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: package detection and `build.json` decoding
//! - **[`overlay`]**: resolution of copy directives into concrete copies
//! - **[`resources`]**: filesystem operations with dry-run descriptions
//! - **[`tasks`]**: named build steps wired to resources
//! - **[`commands`]**: top-level orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod overlay;
pub mod resources;
pub mod tasks;
