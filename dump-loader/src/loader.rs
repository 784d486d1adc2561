//! Streams one table's dump file into its MongoDB collection.

use std::io::{BufRead, BufReader};
use std::time::{Duration, Instant};

use merge_core::MergeClient;
use merge_core::sink::BulkSink;
use tracing::warn;

use crate::column_map::get_column_map;
use crate::error::LoadResult;
use crate::paths::DumpPaths;
use crate::row::{convert_row, split_tab_fields};
use crate::schema::{TableSchema, find_table};

/// Summary of one completed table load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of documents inserted.
    pub count: u64,
    /// Wall-clock time spent loading this table.
    pub duration: Duration,
}

/// Load `table`'s dump file into the collection of the same name, per
/// `schema`'s column declarations for that table.
pub async fn load_table(
    client: &MergeClient,
    paths: &DumpPaths,
    schema: &[TableSchema],
    table: &str,
) -> LoadResult<LoadReport> {
    let started = Instant::now();

    let table_schema = find_table(schema, table)?;
    let column_map = get_column_map(table_schema)?;

    let latest = paths.read_latest()?;
    let dump_path = paths.mbdump_file(&latest, table);
    let file = std::fs::File::open(&dump_path)?;
    let reader = BufReader::new(file);

    let mut sink = BulkSink::with_default_batch_size(client.collection(table));

    for line in reader.lines() {
        let line = line?;
        let fields = split_tab_fields(&line);
        let (doc, warnings) = convert_row(&column_map, &fields);

        for warning in warnings {
            warn!(table, column = %warning.column, message = %warning.message, "column conversion failed");
        }

        sink.push(doc).await?;
    }

    let count = sink.finish().await?;

    Ok(LoadReport {
        count,
        duration: started.elapsed(),
    })
}
