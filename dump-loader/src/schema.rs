//! JSON schema file parsing.
//!
//! The schema file is a top-level array of `{ "create_table": { ... } }`
//! objects. Unknown object keys (anything beyond `table_name`/`columns`) are
//! ignored rather than rejected — `serde_json` does this naturally as long
//! as the target structs don't set `deny_unknown_fields`.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// One column's declaration in a table's schema entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSpec {
    /// The column's name, used as the resulting document's field name.
    pub column_name: String,
    /// The PostgreSQL type name, resolved against the fixed type table in
    /// [`crate::column_map`].
    pub data_type: String,
}

/// One table's schema entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TableSchema {
    /// The table (and target collection) name.
    pub table_name: String,
    /// Ordered columns, matched positionally against each dump row.
    pub columns: Vec<ColumnSpec>,
}

#[derive(Debug, Deserialize)]
struct CreateTableEntry {
    create_table: TableSchema,
}

/// Errors from reading or interpreting a schema file.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Failed to read the schema file from disk.
    #[error("failed to read schema file: {0}")]
    Io(#[from] std::io::Error),

    /// The schema file wasn't valid JSON, or not shaped as expected.
    #[error("failed to parse schema file: {0}")]
    Json(#[from] serde_json::Error),

    /// No `create_table` entry named the requested table.
    #[error("no schema entry for table {0:?}")]
    TableNotFound(String),

    /// A column named a `data_type` outside the fixed type table.
    #[error("unknown data_type {data_type:?} for column {column:?}")]
    UnknownDataType {
        /// The column whose type could not be resolved.
        column: String,
        /// The unrecognized type string.
        data_type: String,
    },
}

/// Parse the schema file at `path` into its table entries.
pub fn load_schema_file(path: &Path) -> Result<Vec<TableSchema>, SchemaError> {
    let raw = std::fs::read_to_string(path)?;
    parse_schema(&raw)
}

/// Parse schema JSON text into its table entries.
pub fn parse_schema(raw: &str) -> Result<Vec<TableSchema>, SchemaError> {
    let entries: Vec<CreateTableEntry> = serde_json::from_str(raw)?;
    Ok(entries.into_iter().map(|e| e.create_table).collect())
}

/// Find the schema entry for `table`, if present.
pub fn find_table<'a>(tables: &'a [TableSchema], table: &str) -> Result<&'a TableSchema, SchemaError> {
    tables
        .iter()
        .find(|t| t.table_name == table)
        .ok_or_else(|| SchemaError::TableNotFound(table.to_string()))
}
