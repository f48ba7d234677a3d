//! Command handlers.
//!
//! Each submodule owns one subcommand: it receives the parsed arguments,
//! the loaded configuration, and the output manager, and returns a
//! [`CliResult`](crate::error::CliResult).

pub mod completions;
pub mod new;
