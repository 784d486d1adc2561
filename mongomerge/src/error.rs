//! CLI-level error type.
//!
//! Deliberately plain `thiserror` rather than `miette::Diagnostic` — this
//! tool has one failure path per run and reports it as a single line on
//! stderr, so there's no multi-span diagnostic rendering to gain from it.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Top-level CLI error.
#[derive(Error, Debug)]
pub enum CliError {
    /// The merge spec or engine reported a failure.
    #[error("{0}")]
    Merge(#[from] merge_core::MergeError),

    /// A command-line argument was invalid in a way `clap` can't express.
    #[error("{0}")]
    Usage(String),
}
