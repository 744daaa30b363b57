//! Parsley command-line driver.
//!
//! The `pars` binary is a thin argument dispatcher over [`commands`].
//! Problems are rendered to stderr; handlers return a [`CliError`] once
//! they have been reported so `main` can pick the exit status.

pub mod commands;
mod error;
mod tracing_setup;

pub use error::CliError;
pub use tracing_setup::init_tracing;
