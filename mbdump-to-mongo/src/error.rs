//! CLI-level error type.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Top-level CLI error.
#[derive(Error, Debug)]
pub enum CliError {
    /// Connecting to MongoDB failed.
    #[error("{0}")]
    Merge(#[from] merge_core::MergeError),

    /// Loading a table's schema or dump file failed.
    #[error("{0}")]
    Load(#[from] dump_loader::LoadError),
}
