//! Error types for schema parsing and table loading.

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for schema resolution.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type for table loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur while loading a dump table into MongoDB.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Failed to read a path, dump file, or pointer file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The schema file was missing the requested table, malformed, or named
    /// a `data_type` outside the fixed type table.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A bulk insert or other store operation failed.
    #[error("merge engine error: {0}")]
    Merge(#[from] merge_core::MergeError),
}
