//! Schema provisioning and example fixtures.

use crate::document::ToDocument;
use crate::error::PopulatorError;
use crate::fixtures;
use crate::insert::insert_batch;
use crate::store::DocumentStore;
use chrono::{DateTime, Utc};
use cinema_core::{Collection, IndexCatalog, SeedProfile};
use tracing::{info, warn};

/// Outcome of [`initialize_database`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Collections that did not exist and were created.
    pub collections_created: Vec<Collection>,
    pub indexes_declared: usize,
    pub customers: u64,
    pub movies: u64,
    pub rooms: u64,
    pub showtimes: u64,
}

impl InitReport {
    pub fn fixtures_inserted(&self) -> u64 {
        self.customers + self.movies + self.rooms + self.showtimes
    }
}

/// Insert a fixture set unless the collection already holds documents.
async fn insert_fixtures<S, T>(
    store: &S,
    collection: Collection,
    records: &[T],
) -> Result<u64, PopulatorError>
where
    S: DocumentStore + ?Sized,
    T: ToDocument,
{
    let existing = store.count_documents(collection.name()).await?;
    if existing > 0 {
        warn!(
            "Collection '{}' already holds {} documents, skipping fixtures",
            collection, existing
        );
        return Ok(0);
    }

    let inserted = insert_batch(store, collection, records).await?;
    info!("Inserted {} example documents into '{}'", inserted, collection);
    Ok(inserted)
}

/// Create missing collections, declare the core indexes and insert fixtures.
///
/// Running it against an initialized database changes nothing: existing
/// collections are kept, identical index declarations are no-ops and
/// collections that already hold documents receive no fixtures.
pub async fn initialize_database<S>(
    store: &S,
    catalog: &IndexCatalog,
    profile: &SeedProfile,
    anchor: DateTime<Utc>,
) -> Result<InitReport, PopulatorError>
where
    S: DocumentStore + ?Sized,
{
    info!("Initializing cinema database");
    let mut report = InitReport::default();

    let existing = store.collection_names().await?;
    for &collection in catalog.collections() {
        if existing.iter().any(|n| n == collection.name()) {
            info!("Collection '{}' already exists", collection);
        } else {
            store.create_collection(collection.name()).await?;
            info!("Created collection '{}'", collection);
            report.collections_created.push(collection);
        }
    }

    for index in catalog.core_indexes() {
        store.create_index(index).await?;
        report.indexes_declared += 1;
    }
    info!("Declared {} indexes", report.indexes_declared);

    let customers = fixtures::customers(anchor);
    let movies = fixtures::movies(profile, anchor);
    let rooms = fixtures::rooms(profile);
    let showtimes = fixtures::showtimes(&movies, &rooms, profile, anchor);

    report.customers = insert_fixtures(store, Collection::Customers, &customers).await?;
    report.movies = insert_fixtures(store, Collection::Movies, &movies).await?;
    report.rooms = insert_fixtures(store, Collection::Rooms, &rooms).await?;
    report.showtimes = insert_fixtures(store, Collection::Showtimes, &showtimes).await?;

    info!(
        "Initialization complete: {} collections created, {} example documents",
        report.collections_created.len(),
        report.fixtures_inserted()
    );
    Ok(report)
}
