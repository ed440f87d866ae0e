//! Bulk generation pipeline.
//!
//! Rooms, movies and customers are generated in full and kept in memory
//! because showtimes and transactions sample them. Showtimes and
//! transactions are streamed through a [`BatchWriter`] so at most one batch
//! of them is resident at a time.

use crate::document::ToDocument;
use crate::error::PopulatorError;
use crate::insert::{BatchWriter, PopulateMetrics};
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use cinema_core::{Collection, IndexCatalog, SeedProfile};
use cinema_generator::CinemaGenerator;
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics for a full generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    pub rooms: PopulateMetrics,
    pub movies: PopulateMetrics,
    pub customers: PopulateMetrics,
    pub showtimes: PopulateMetrics,
    pub transactions: PopulateMetrics,
    /// Number of index declarations issued after the data was written.
    pub indexes_declared: usize,
    pub total_duration: Duration,
}

impl GenerationReport {
    /// Documents written across every collection.
    pub fn rows_inserted(&self) -> u64 {
        self.per_collection()
            .iter()
            .map(|(_, m)| m.rows_inserted)
            .sum()
    }

    pub fn per_collection(&self) -> [(Collection, &PopulateMetrics); 5] {
        [
            (Collection::Rooms, &self.rooms),
            (Collection::Movies, &self.movies),
            (Collection::Customers, &self.customers),
            (Collection::Showtimes, &self.showtimes),
            (Collection::Transactions, &self.transactions),
        ]
    }
}

/// Generates the synthetic dataset and writes it to a store.
pub struct CinemaPopulator<'a, S: DocumentStore + ?Sized> {
    store: &'a S,
    generator: CinemaGenerator,
    catalog: IndexCatalog,
    batch_size: usize,
}

impl<'a, S: DocumentStore + ?Sized> CinemaPopulator<'a, S> {
    /// Create a populator.
    ///
    /// # Arguments
    ///
    /// * `store` - Destination store
    /// * `profile` - Volumes, vocabularies and batch size
    /// * `seed` - Random seed for deterministic generation (same seed = same data)
    /// * `anchor` - Time every relative timestamp is computed from
    pub fn new(
        store: &'a S,
        profile: SeedProfile,
        seed: u64,
        anchor: DateTime<Utc>,
    ) -> Result<Self, PopulatorError> {
        let batch_size = profile.batch_size;
        let generator = CinemaGenerator::new(profile, seed, anchor)?;

        Ok(Self {
            store,
            generator,
            catalog: IndexCatalog::default(),
            batch_size,
        })
    }

    /// Use a different index catalog.
    pub fn with_catalog(mut self, catalog: IndexCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn profile(&self) -> &SeedProfile {
        self.generator.profile()
    }

    /// Write an already generated set.
    async fn write_all<T: ToDocument>(
        &self,
        collection: Collection,
        records: &[T],
        generation_duration: Duration,
    ) -> Result<PopulateMetrics, PopulatorError> {
        let mut writer = BatchWriter::new(self.store, collection, self.batch_size)?;
        writer.add_generation_time(generation_duration);
        writer.extend(records.iter()).await?;
        writer.finish().await
    }

    /// Generate and write every collection, then declare the bulk indexes.
    ///
    /// A failed write aborts the run. Collections written before the failure
    /// keep their documents.
    pub async fn populate_all(&mut self) -> Result<GenerationReport, PopulatorError> {
        let start_time = Instant::now();
        let volumes = self.generator.profile().volumes.clone();
        let mut report = GenerationReport::default();

        info!(
            "Generating {} documents (batch size: {})",
            volumes.total(),
            self.batch_size
        );

        info!("Generating {} rooms", volumes.rooms);
        let gen_start = Instant::now();
        let rooms: Vec<_> = self.generator.rooms(volumes.rooms).collect();
        report.rooms = self
            .write_all(Collection::Rooms, &rooms, gen_start.elapsed())
            .await?;

        info!("Generating {} movies", volumes.movies);
        let gen_start = Instant::now();
        let movies: Vec<_> = self.generator.movies(volumes.movies).collect();
        report.movies = self
            .write_all(Collection::Movies, &movies, gen_start.elapsed())
            .await?;

        info!("Generating {} customers", volumes.customers);
        let gen_start = Instant::now();
        let customers: Vec<_> = self.generator.customers(volumes.customers).collect();
        report.customers = self
            .write_all(Collection::Customers, &customers, gen_start.elapsed())
            .await?;

        info!("Generating {} showtimes", volumes.showtimes);
        let mut writer = BatchWriter::new(self.store, Collection::Showtimes, self.batch_size)?;
        for _ in 0..volumes.showtimes {
            let gen_start = Instant::now();
            let showtime = self.generator.next_showtime(&movies, &rooms)?;
            writer.add_generation_time(gen_start.elapsed());
            writer.push(showtime).await?;
        }
        report.showtimes = writer.finish().await?;

        info!("Generating {} transactions", volumes.transactions);
        let mut writer =
            BatchWriter::new(self.store, Collection::Transactions, self.batch_size)?;
        for _ in 0..volumes.transactions {
            let gen_start = Instant::now();
            let transaction = self.generator.next_transaction(&customers, &movies)?;
            writer.add_generation_time(gen_start.elapsed());
            writer.push(transaction).await?;
        }
        report.transactions = writer.finish().await?;

        info!("Declaring indexes");
        for index in self.catalog.bulk_indexes() {
            self.store.create_index(&index).await?;
            report.indexes_declared += 1;
        }

        report.total_duration = start_time.elapsed();

        info!("Generation complete");
        for (collection, metrics) in report.per_collection() {
            info!(
                "  {}: {} documents in {} batches",
                collection, metrics.rows_inserted, metrics.batch_count
            );
        }
        info!(
            "  total: {} documents in {:?}, {} indexes",
            report.rows_inserted(),
            report.total_duration,
            report.indexes_declared
        );

        Ok(report)
    }
}
