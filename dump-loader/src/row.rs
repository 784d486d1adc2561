//! Tab-separated row splitting and positional column conversion.

use bson::{Bson, Document};
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::column_map::{ColumnMap, ColumnType};

/// Encodes SQL NULL in a PostgreSQL `COPY` dump.
const NULL_MARKER: &str = "\\N";

/// A non-fatal failure to convert one column's value. The row is still
/// built from whatever columns did convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionWarning {
    /// The field name of the offending column.
    pub column: String,
    /// What went wrong.
    pub message: String,
}

/// Split one dump line into its tab-separated fields, preserving empty
/// fields produced by consecutive tabs or a trailing tab. Unlike `strtok`,
/// which collapses consecutive delimiters, `str::split` already preserves
/// them — this function exists to name the operation and strip the
/// trailing line terminator.
pub fn split_tab_fields(line: &str) -> Vec<&str> {
    line.trim_end_matches(['\n', '\r']).split('\t').collect()
}

fn convert_bool(value: &str) -> Result<Bson, String> {
    match value {
        "t" => Ok(Bson::Boolean(true)),
        "f" => Ok(Bson::Boolean(false)),
        other => Err(format!("not a boolean literal: {other:?}")),
    }
}

fn convert_int(value: &str) -> Result<Bson, String> {
    value
        .parse::<i64>()
        .map(Bson::Int64)
        .map_err(|e| format!("not an integer: {e}"))
}

/// Parse a PostgreSQL `timestamp with time zone` value of the form
/// `YYYY-MM-DD HH:MM:SS[.uuuuuu]±ZZ[ZZ]`. Both the two-digit (`+00`) and
/// four-digit (`+0000`) zone forms are accepted.
fn parse_pg_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let (date_part, rest) = value.split_once(' ')?;
    let zone_idx = rest.rfind(['+', '-'])?;
    let (time_part, zone_part) = rest.split_at(zone_idx);

    let naive = NaiveDateTime::parse_from_str(
        &format!("{date_part} {time_part}"),
        "%Y-%m-%d %H:%M:%S%.f",
    )
    .ok()?;

    let sign: i64 = if zone_part.starts_with('-') { -1 } else { 1 };
    let digits: String = zone_part.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 2 {
        return None;
    }
    let hours: i64 = digits[0..2].parse().ok()?;
    let minutes: i64 = if digits.len() >= 4 {
        digits[2..4].parse().ok()?
    } else {
        0
    };
    let offset_secs = sign * (hours * 3600 + minutes * 60);

    let utc_naive = naive - chrono::Duration::seconds(offset_secs);
    Some(DateTime::<Utc>::from_naive_utc_and_offset(utc_naive, Utc))
}

fn convert_timestamp(value: &str) -> Result<Bson, String> {
    parse_pg_timestamp(value)
        .map(|dt| Bson::DateTime(bson::DateTime::from_chrono(dt)))
        .ok_or_else(|| format!("not a valid timestamp: {value:?}"))
}

fn convert_int_array(value: &str) -> Result<Bson, String> {
    let inner = value
        .strip_prefix('{')
        .and_then(|v| v.strip_suffix('}'))
        .ok_or_else(|| format!("not an integer array literal: {value:?}"))?;

    if inner.is_empty() {
        return Ok(Bson::Array(Vec::new()));
    }

    let mut items = Vec::new();
    for part in inner.split(',') {
        let n: i64 = part
            .trim()
            .parse()
            .map_err(|e| format!("bad array element {part:?}: {e}"))?;
        items.push(Bson::Int64(n));
    }
    Ok(Bson::Array(items))
}

fn convert_point(value: &str) -> Result<Bson, String> {
    let inner = value
        .strip_prefix('(')
        .and_then(|v| v.strip_suffix(')'))
        .ok_or_else(|| format!("not a point literal: {value:?}"))?;

    let mut parts = inner.split(',');
    let x: f64 = parts
        .next()
        .ok_or_else(|| "missing x coordinate".to_string())?
        .trim()
        .parse()
        .map_err(|e| format!("bad x coordinate: {e}"))?;
    let y: f64 = parts
        .next()
        .ok_or_else(|| "missing y coordinate".to_string())?
        .trim()
        .parse()
        .map_err(|e| format!("bad y coordinate: {e}"))?;
    if parts.next().is_some() {
        return Err(format!("point literal has extra coordinates: {value:?}"));
    }

    Ok(Bson::Array(vec![Bson::Double(x), Bson::Double(y)]))
}

fn convert_field(ty: ColumnType, value: &str) -> Result<Option<Bson>, String> {
    if value == NULL_MARKER {
        return Ok(None);
    }

    match ty {
        ColumnType::Bool => convert_bool(value).map(Some),
        ColumnType::Int => convert_int(value).map(Some),
        ColumnType::Timestamp => convert_timestamp(value).map(Some),
        ColumnType::IntArray => convert_int_array(value).map(Some),
        ColumnType::Point => convert_point(value).map(Some),
        ColumnType::Utf8Default => {
            if value.is_empty() {
                Ok(None)
            } else {
                Ok(Some(Bson::String(value.to_string())))
            }
        }
    }
}

/// Convert one split dump row into a document, applying `column_map`
/// positionally. A conversion failure on a single column produces a warning
/// and that field is simply omitted; it never aborts the row.
pub fn convert_row(column_map: &ColumnMap, fields: &[&str]) -> (Document, Vec<ConversionWarning>) {
    let mut doc = Document::new();
    let mut warnings = Vec::new();

    for (i, (name, ty)) in column_map.iter().enumerate() {
        let Some(raw) = fields.get(i) else {
            continue;
        };

        match convert_field(*ty, raw) {
            Ok(Some(value)) => {
                doc.insert(name.clone(), value);
            }
            Ok(None) => {}
            Err(message) => warnings.push(ConversionWarning {
                column: name.clone(),
                message,
            }),
        }
    }

    (doc, warnings)
}
