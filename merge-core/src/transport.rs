//! Agg-to-collection transport: run an aggregation pipeline against a source
//! collection and stream its output into a destination collection.
//!
//! Grounded on the original engine's `agg_copy`, which runs an aggregation
//! with `cursor: {}` and `allowDiskUse: true`, then drains the cursor through
//! a batching insert. Here the aggregation runs through the driver's cursor
//! API directly and the batching insert is [`crate::sink::BulkSink`].

use bson::Document;
use futures::TryStreamExt;
use mongodb::options::AggregateOptions;
use mongodb::Collection;

use crate::error::{MergeError, MergeResult};
use crate::sink::BulkSink;

/// Number of documents buffered before a bulk insert is issued. Matches the
/// original engine's batch size.
pub const BULK_OPS_SIZE: usize = 1000;

/// Run `pipeline` against `source`, inserting every resulting document into
/// `dest` in batches of [`BULK_OPS_SIZE`]. Returns the number of documents
/// copied.
pub async fn agg_copy(
    source: &Collection<Document>,
    dest: &Collection<Document>,
    pipeline: Vec<Document>,
) -> MergeResult<u64> {
    let options = AggregateOptions::builder().allow_disk_use(true).build();
    let mut cursor = source
        .aggregate(pipeline, options)
        .await
        .map_err(|e| MergeError::transport("aggregate", e.to_string()))?;

    let mut sink = BulkSink::with_default_batch_size(dest.clone());
    loop {
        let next = cursor
            .try_next()
            .await
            .map_err(|e| MergeError::transport("cursor_drain", e.to_string()))?;
        match next {
            Some(doc) => sink.push(doc).await?,
            None => break,
        }
    }
    sink.finish().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_ops_size_matches_original_engine() {
        assert_eq!(BULK_OPS_SIZE, 1000);
    }
}
