//! Batched insert logic.
//!
//! [`BatchWriter`] buffers records and submits the whole buffer as one bulk
//! write whenever it reaches the batch size. Records written always equal
//! records pushed once [`BatchWriter::finish`] returns, split into
//! `ceil(total / batch_size)` batches with only the last one possibly short.

use crate::document::ToDocument;
use crate::error::PopulatorError;
use crate::store::DocumentStore;
use bson::Document;
use cinema_core::Collection;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Metrics from writing one collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulateMetrics {
    /// Number of documents inserted.
    pub rows_inserted: u64,
    /// Number of bulk writes executed.
    pub batch_count: u64,
    /// Size of each bulk write, in order.
    pub batch_sizes: Vec<u64>,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating records.
    pub generation_duration: Duration,
    /// Time spent inserting documents.
    pub insert_duration: Duration,
}

impl PopulateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_inserted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Insert a batch of records as one bulk write.
pub async fn insert_batch<S, T>(
    store: &S,
    collection: Collection,
    records: &[T],
) -> Result<u64, PopulatorError>
where
    S: DocumentStore + ?Sized,
    T: ToDocument,
{
    if records.is_empty() {
        return Ok(0);
    }

    let documents: Vec<Document> = records.iter().map(ToDocument::to_document).collect();
    Ok(store.insert_many(collection.name(), documents).await?)
}

/// Bounded buffer in front of a collection.
pub struct BatchWriter<'a, S: DocumentStore + ?Sized, T: ToDocument> {
    store: &'a S,
    collection: Collection,
    batch_size: usize,
    buffer: Vec<T>,
    metrics: PopulateMetrics,
    started: Instant,
}

impl<'a, S: DocumentStore + ?Sized, T: ToDocument> BatchWriter<'a, S, T> {
    /// Create a writer. A zero batch size is a configuration error.
    pub fn new(
        store: &'a S,
        collection: Collection,
        batch_size: usize,
    ) -> Result<Self, PopulatorError> {
        if batch_size == 0 {
            return Err(PopulatorError::Config(
                "batch size must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            store,
            collection,
            batch_size,
            buffer: Vec::with_capacity(batch_size),
            metrics: PopulateMetrics::default(),
            started: Instant::now(),
        })
    }

    /// Number of records waiting for the next flush.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Account time spent producing records for this collection.
    pub fn add_generation_time(&mut self, elapsed: Duration) {
        self.metrics.generation_duration += elapsed;
    }

    /// Buffer a record, flushing when the buffer is full.
    pub async fn push(&mut self, record: T) -> Result<(), PopulatorError> {
        self.buffer.push(record);
        if self.buffer.len() >= self.batch_size {
            self.flush().await?;
        }
        Ok(())
    }

    /// Buffer many records, flushing as often as needed.
    pub async fn extend<I>(&mut self, records: I) -> Result<(), PopulatorError>
    where
        I: IntoIterator<Item = T>,
    {
        for record in records {
            self.push(record).await?;
        }
        Ok(())
    }

    /// Write out whatever is buffered.
    pub async fn flush(&mut self) -> Result<(), PopulatorError> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let insert_start = Instant::now();
        let inserted = insert_batch(self.store, self.collection, &self.buffer).await?;
        self.metrics.insert_duration += insert_start.elapsed();
        self.buffer.clear();

        self.metrics.rows_inserted += inserted;
        self.metrics.batch_count += 1;
        self.metrics.batch_sizes.push(inserted);

        debug!(
            "Batch {} of '{}' complete: {} documents inserted, {} total",
            self.metrics.batch_count, self.collection, inserted, self.metrics.rows_inserted
        );

        Ok(())
    }

    /// Flush the remainder and return the metrics for this collection.
    pub async fn finish(mut self) -> Result<PopulateMetrics, PopulatorError> {
        self.flush().await?;
        self.metrics.total_duration = self.started.elapsed();

        info!(
            "Wrote {} documents to '{}' in {} batches ({:.2} docs/sec)",
            self.metrics.rows_inserted,
            self.collection,
            self.metrics.batch_count,
            self.metrics.rows_per_second()
        );

        Ok(self.metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use bson::doc;
    use tokio_test::assert_err;

    struct Marker(u64);

    impl ToDocument for Marker {
        fn to_document(&self) -> Document {
            doc! { "_id": self.0 as i64 }
        }
    }

    #[test]
    fn test_metrics() {
        let metrics = PopulateMetrics {
            rows_inserted: 1000,
            batch_count: 10,
            batch_sizes: vec![100; 10],
            total_duration: Duration::from_secs(10),
            generation_duration: Duration::from_secs(2),
            insert_duration: Duration::from_secs(8),
        };

        assert_eq!(metrics.rows_per_second(), 100.0);
        assert_eq!(PopulateMetrics::default().rows_per_second(), 0.0);
    }

    #[tokio::test]
    async fn test_flush_complete_with_partial_last_batch() {
        let store = MemoryStore::new();
        let mut writer = BatchWriter::new(&store, Collection::Showtimes, 10_000).unwrap();

        writer.extend((0..25_000).map(Marker)).await.unwrap();
        assert_eq!(writer.buffered(), 5_000);
        let metrics = writer.finish().await.unwrap();

        assert_eq!(metrics.rows_inserted, 25_000);
        assert_eq!(metrics.batch_count, 3);
        assert_eq!(metrics.batch_sizes, vec![10_000, 10_000, 5_000]);
        assert_eq!(
            store.batch_sizes("showtimes").await,
            vec![10_000, 10_000, 5_000]
        );
        assert_eq!(store.count_documents("showtimes").await.unwrap(), 25_000);
    }

    #[tokio::test]
    async fn test_exact_multiple_has_no_empty_batch() {
        let store = MemoryStore::new();
        let mut writer = BatchWriter::new(&store, Collection::Rooms, 4).unwrap();

        writer.extend((0..8).map(Marker)).await.unwrap();
        assert_eq!(writer.buffered(), 0);
        let metrics = writer.finish().await.unwrap();

        assert_eq!(metrics.batch_sizes, vec![4, 4]);
        assert_eq!(store.batch_sizes("rooms").await, vec![4, 4]);
    }

    #[tokio::test]
    async fn test_nothing_pushed_writes_nothing() {
        let store = MemoryStore::new();
        let writer: BatchWriter<'_, _, Marker> =
            BatchWriter::new(&store, Collection::Movies, 10).unwrap();

        let metrics = writer.finish().await.unwrap();
        assert_eq!(metrics.rows_inserted, 0);
        assert_eq!(metrics.batch_count, 0);
        assert!(!store.collection_exists("movies").await.unwrap());
    }

    #[tokio::test]
    async fn test_zero_batch_size_rejected() {
        let store = MemoryStore::new();
        let result: Result<BatchWriter<'_, _, Marker>, _> =
            BatchWriter::new(&store, Collection::Movies, 0);
        assert!(matches!(result, Err(PopulatorError::Config(_))));
    }

    #[tokio::test]
    async fn test_failed_batch_propagates() {
        let store = MemoryStore::new();
        store.reject_writes_to("transactions").await;
        let mut writer = BatchWriter::new(&store, Collection::Transactions, 2).unwrap();

        writer.push(Marker(1)).await.unwrap();
        assert_err!(writer.push(Marker(2)).await);
    }
}
