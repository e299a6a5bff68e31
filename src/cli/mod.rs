//! Line-oriented shell over a [`Session`](crate::core::Session).

pub mod commands;
pub mod core;
pub mod forms;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod ui;

pub use self::core::CliError;
pub use shell::{run_cli, SCRIPT_ENV};
