//! The column type map: resolves a schema's `data_type` strings into the
//! tagged conversions `row::convert_row` dispatches on.
//!
//! Replaces the original loader's function-pointer dispatch table with an
//! explicit enum. Types with no special conversion (`TEXT`, `UUID`,
//! `VARCHAR(n)`, `CHAR(n)`, ...) are a distinct [`ColumnType::Utf8Default`]
//! variant, not a silent fallthrough — only a `data_type` absent from every
//! known list is an error.

use crate::schema::{SchemaError, TableSchema};

/// How a dump column's text value converts into a BSON field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// `t`/`f` → bool.
    Bool,
    /// Decimal integer.
    Int,
    /// PostgreSQL `timestamp with time zone` text.
    Timestamp,
    /// `{v1,v2,...}` → array of integers.
    IntArray,
    /// `(x,y)` → two-element array of doubles.
    Point,
    /// No special conversion; UTF-8 string, empty string omitted.
    Utf8Default,
}

impl ColumnType {
    /// Resolve a schema `data_type` string. Fatal (`UnknownDataType`) for
    /// anything not in the fixed type table.
    pub fn from_data_type(data_type: &str) -> Result<Self, ()> {
        let normalized = normalize(data_type);
        Ok(match normalized.as_str() {
            "BOOLEAN" => ColumnType::Bool,
            "INT" | "INTEGER" | "SERIAL" | "SMALLINT" => ColumnType::Int,
            "TIMESTAMP" | "TIMESTAMP WITH TIME ZONE" | "TIMESTAMPTZ" => ColumnType::Timestamp,
            "INTEGER[]" => ColumnType::IntArray,
            "POINT" => ColumnType::Point,
            "TEXT" | "UUID" | "VARCHAR" | "CHAR" | "CHARACTER VARYING" | "CHARACTER"
            | "BPCHAR" => ColumnType::Utf8Default,
            _ => return Err(()),
        })
    }
}

/// Uppercase and strip a trailing `(n)`/`(n,m)` length/precision suffix, e.g.
/// `VARCHAR(255)` → `VARCHAR`.
fn normalize(data_type: &str) -> String {
    let upper = data_type.trim().to_ascii_uppercase();
    match upper.find('(') {
        Some(idx) => upper[..idx].trim().to_string(),
        None => upper,
    }
}

/// One resolved `(field name, conversion)` pair, in schema column order.
pub type ColumnMap = Vec<(String, ColumnType)>;

/// Resolve every column of `schema` into a [`ColumnMap`], failing on the
/// first `data_type` outside the fixed type table.
pub fn get_column_map(schema: &TableSchema) -> Result<ColumnMap, SchemaError> {
    schema
        .columns
        .iter()
        .map(|col| {
            ColumnType::from_data_type(&col.data_type)
                .map(|ty| (col.column_name.clone(), ty))
                .map_err(|_| SchemaError::UnknownDataType {
                    column: col.column_name.clone(),
                    data_type: col.data_type.clone(),
                })
        })
        .collect()
}
