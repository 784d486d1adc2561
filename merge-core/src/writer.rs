//! Group-and-update writer: the final phase that pushes denormalized fields
//! back onto the parent collection.
//!
//! Grounded on the original engine's `group_and_update`: aggregate the
//! collapsed temp collection, and for every resulting document, `$set` its
//! non-`_id` fields onto the parent document named by `_id` — skipping a
//! field entirely when its accumulated value is BSON null, and skipping the
//! whole update when every field would be skipped (an all-null row updates
//! nothing).
//!
//! The driver version in use here predates the mixed bulk-write API, so each
//! parent update is issued as its own `update_one` call; see
//! [`crate::transport::BULK_OPS_SIZE`] for the batch size used on the insert
//! side instead.

use bson::{Bson, Document, doc};
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::options::AggregateOptions;
use tracing::debug;

use crate::error::{MergeError, MergeResult};

/// Whether a field's accumulated value should be written. Null values (no
/// "one" child found, or no rows for a "many" relation) and empty arrays
/// (a "many" relation that matched nothing) are both skipped — writing them
/// would clobber a parent field with nothing.
fn should_write(value: &Bson) -> bool {
    match value {
        Bson::Null => false,
        Bson::Array(items) => !items.is_empty(),
        _ => true,
    }
}

/// Aggregate `source` (the fully collapsed temp collection) with `pipeline`,
/// and `$set` every non-empty field of each resulting document onto `target`
/// by `_id`. Returns the number of parent documents actually updated.
pub async fn group_and_update(
    source: &Collection<Document>,
    target: &Collection<Document>,
    pipeline: Vec<Document>,
) -> MergeResult<u64> {
    let options = AggregateOptions::builder().allow_disk_use(true).build();
    let mut cursor = source
        .aggregate(pipeline, options)
        .await
        .map_err(|e| MergeError::transport("group_and_update_aggregate", e.to_string()))?;

    let mut updated = 0u64;
    while let Some(mut doc) = cursor
        .try_next()
        .await
        .map_err(|e| MergeError::transport("group_and_update_drain", e.to_string()))?
    {
        let Some(id) = doc.remove("_id") else {
            continue;
        };

        let mut fields = Document::new();
        for (key, value) in doc {
            if should_write(&value) {
                fields.insert(key, value);
            }
        }

        if fields.is_empty() {
            debug!(?id, "skipping all-null merge row");
            continue;
        }

        target
            .update_one(doc! { "_id": id }, doc! { "$set": fields }, None)
            .await
            .map_err(|e| MergeError::transport("group_and_update_write", e.to_string()))?;
        updated += 1;
    }

    Ok(updated)
}
