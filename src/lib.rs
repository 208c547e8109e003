//! Dotfile synchronization engine.
//!
//! Dotfiles are copied from `$HOME` into a tracked directory (`~/.dotify`
//! by default) and replaced with symbolic links pointing back at the
//! tracked copies. Membership is simply presence in the tracked directory;
//! there is no manifest.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: home root, tracked directory name, and ignore lists
//! - **[`resources`]**: entries, directory scans, and the plan/apply link builder
//! - **[`sync`]**: batch and single-name runs with a confirmation gate
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod resources;
pub mod sync;
