//! Driver failures.

use std::io;

/// Why a command failed.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Problems were already rendered; only the count is left.
    #[error("{count} problem(s) reported")]
    Reported { count: usize },

    #[error("invalid option '{0}'")]
    InvalidOption(String),

    #[error("missing {0}")]
    MissingArgument(&'static str),
}

impl CliError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Reported { .. } => 1,
            CliError::Read { .. } | CliError::InvalidOption(_) | CliError::MissingArgument(_) => 2,
        }
    }
}
