//! # dump-loader
//!
//! Streams tab-separated PostgreSQL dump files into MongoDB collections,
//! driven by a JSON schema describing each table's columns.
//!
//! This crate handles conversion and transport only; path resolution for a
//! MusicBrainz-shaped export tree lives in [`paths`], and the `mbdump-to-mongo`
//! binary crate wires it together with a CLI.

pub mod column_map;
pub mod error;
pub mod loader;
pub mod paths;
pub mod row;
pub mod schema;

pub use column_map::{ColumnMap, ColumnType};
pub use error::{LoadError, LoadResult};
pub use loader::{LoadReport, load_table};
pub use paths::DumpPaths;
pub use row::{ConversionWarning, convert_row, split_tab_fields};
pub use schema::{SchemaError, TableSchema, load_schema_file};
