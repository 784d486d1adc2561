//! Streaming batch-insert sink.
//!
//! Mirrors the original engine's `mongoc_cursor_insert_batch`: buffer
//! documents up to a threshold, flush as an ordered bulk insert, and flush
//! whatever's left over at the end. Shared between the merge engine's
//! [`crate::transport::agg_copy`] and the dump loader.
//!
//! Generalized over [`BulkWriter`] rather than a concrete `Collection`, in
//! the trait-seam idiom `prax-query`'s tenant resolver uses for its own
//! driver-coupled abstractions — the real target is the only production
//! implementor, and tests get a fake that records flush batches instead of
//! touching a live server.

use async_trait::async_trait;
use bson::Document;
use mongodb::Collection;

use crate::error::{MergeError, MergeResult};
use crate::transport::BULK_OPS_SIZE;

/// A destination a [`BulkSink`] can flush batches into.
#[async_trait]
pub trait BulkWriter: Send + Sync {
    /// Insert a batch of documents as one ordered bulk write.
    async fn insert_many(&self, docs: Vec<Document>) -> MergeResult<()>;
}

#[async_trait]
impl BulkWriter for Collection<Document> {
    async fn insert_many(&self, docs: Vec<Document>) -> MergeResult<()> {
        Collection::insert_many(self, docs, None)
            .await
            .map(|_| ())
            .map_err(|e| MergeError::transport("bulk_insert", e.to_string()))
    }
}

/// Buffers documents and flushes them as ordered bulk inserts once the
/// buffer reaches `batch_size`. Call [`BulkSink::finish`] to flush any
/// remainder and consume the sink.
pub struct BulkSink<W: BulkWriter = Collection<Document>> {
    writer: W,
    batch_size: usize,
    buffer: Vec<Document>,
    inserted: u64,
}

impl<W: BulkWriter> BulkSink<W> {
    /// Create a sink writing to `writer`, flushing every `batch_size` documents.
    pub fn new(writer: W, batch_size: usize) -> Self {
        Self {
            writer,
            batch_size: batch_size.max(1),
            buffer: Vec::with_capacity(batch_size),
            inserted: 0,
        }
    }

    /// Create a sink using the engine-wide default batch size ([`BULK_OPS_SIZE`]).
    pub fn with_default_batch_size(writer: W) -> Self {
        Self::new(writer, BULK_OPS_SIZE)
    }

    /// Push one document, flushing the buffer if it has reached capacity.
    pub async fn push(&mut self, doc: Document) -> MergeResult<()> {
        self.buffer.push(doc);
        if self.buffer.len() >= self.batch_size {
            self.flush().await?;
        }
        Ok(())
    }

    async fn flush(&mut self) -> MergeResult<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let batch = std::mem::replace(&mut self.buffer, Vec::with_capacity(self.batch_size));
        let n = batch.len();
        self.writer.insert_many(batch).await?;
        self.inserted += n as u64;
        Ok(())
    }

    /// Flush any buffered remainder and return the total count inserted.
    pub async fn finish(mut self) -> MergeResult<u64> {
        self.flush().await?;
        Ok(self.inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingWriter {
        flushes: Mutex<Vec<usize>>,
    }

    impl CountingWriter {
        fn flush_sizes(&self) -> Vec<usize> {
            self.flushes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BulkWriter for CountingWriter {
        async fn insert_many(&self, docs: Vec<Document>) -> MergeResult<()> {
            self.flushes.lock().unwrap().push(docs.len());
            Ok(())
        }
    }

    #[test]
    fn default_batch_size_matches_bulk_ops_size() {
        assert_eq!(BULK_OPS_SIZE, 1000);
    }

    #[test]
    fn batch_size_is_never_zero() {
        // A caller passing 0 would never flush; guard degrades to 1.
        let clamp = |n: usize| n.max(1);
        assert_eq!(clamp(0), 1);
    }

    #[tokio::test]
    async fn flushes_exactly_once_at_the_batch_threshold() {
        let writer = CountingWriter::default();
        let mut sink = BulkSink::new(writer, BULK_OPS_SIZE);

        for i in 0..BULK_OPS_SIZE {
            sink.push(bson::doc! { "i": i as i64 }).await.unwrap();
        }

        let total = sink.finish().await.unwrap();
        assert_eq!(total, BULK_OPS_SIZE as u64);
    }

    #[tokio::test]
    async fn flush_call_count_pins_the_batching_boundary() {
        let writer = CountingWriter::default();
        let mut sink = BulkSink::new(writer, BULK_OPS_SIZE);

        for i in 0..BULK_OPS_SIZE {
            sink.push(bson::doc! { "i": i as i64 }).await.unwrap();
        }
        // Exactly one threshold flush so far, nothing buffered.
        assert_eq!(sink.writer.flush_sizes(), vec![BULK_OPS_SIZE]);

        sink.finish().await.unwrap();
    }

    #[tokio::test]
    async fn twenty_five_hundred_documents_flush_in_three_batches() {
        let writer = CountingWriter::default();
        let mut sink = BulkSink::new(writer, BULK_OPS_SIZE);

        for i in 0..2500 {
            sink.push(bson::doc! { "i": i as i64 }).await.unwrap();
        }
        let total = sink.finish().await.unwrap();

        assert_eq!(total, 2500);
        assert_eq!(
            sink.writer.flush_sizes(),
            vec![BULK_OPS_SIZE, BULK_OPS_SIZE, 500]
        );
    }
}
