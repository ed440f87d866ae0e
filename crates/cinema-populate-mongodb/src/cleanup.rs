//! Destructive reset of the cinema collections.

use crate::error::PopulatorError;
use crate::store::DocumentStore;
use cinema_core::{Collection, IndexCatalog};
use tracing::{info, warn};

/// Outcome of cleaning one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupEntry {
    pub collection: Collection,
    /// Whether the collection existed before the drop.
    pub existed: bool,
    /// Documents it held when dropped.
    pub documents_removed: u64,
    /// Documents counted after every drop finished.
    pub remaining: u64,
}

/// Outcome of [`clean_database`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub entries: Vec<CleanupEntry>,
}

impl CleanupReport {
    pub fn total_removed(&self) -> u64 {
        self.entries.iter().map(|e| e.documents_removed).sum()
    }

    /// True when no collection holds documents anymore.
    pub fn is_clean(&self) -> bool {
        self.entries.iter().all(|e| e.remaining == 0)
    }
}

/// Drop every cinema collection, then verify they are empty.
///
/// A missing collection is logged and counted as zero removed. Any other
/// failure aborts; collections dropped before it stay dropped.
pub async fn clean_database<S>(
    store: &S,
    catalog: &IndexCatalog,
) -> Result<CleanupReport, PopulatorError>
where
    S: DocumentStore + ?Sized,
{
    info!("Starting database cleanup");
    let existing = store.collection_names().await?;
    let mut report = CleanupReport::default();

    for &collection in catalog.collections() {
        let name = collection.name();
        let existed = existing.iter().any(|n| n == name);

        let documents_removed = if existed {
            let count = store.count_documents(name).await?;
            store.drop_collection(name).await?;
            info!("Dropped collection '{}' ({} documents)", name, count);
            count
        } else {
            warn!("Collection '{}' does not exist, skipping", name);
            0
        };

        report.entries.push(CleanupEntry {
            collection,
            existed,
            documents_removed,
            remaining: 0,
        });
    }

    info!("Verifying cleanup");
    for entry in &mut report.entries {
        entry.remaining = store.count_documents(entry.collection.name()).await?;
        info!("  {}: {} documents", entry.collection, entry.remaining);
    }

    info!(
        "Cleanup complete: {} documents removed",
        report.total_removed()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use bson::doc;

    #[tokio::test]
    async fn test_clean_empty_store() {
        let store = MemoryStore::new();
        let report = clean_database(&store, &IndexCatalog::default())
            .await
            .unwrap();

        assert_eq!(report.entries.len(), 5);
        assert!(report.entries.iter().all(|e| !e.existed));
        assert_eq!(report.total_removed(), 0);
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn test_clean_drops_and_counts() {
        let store = MemoryStore::new();
        store
            .insert_many("movies", vec![doc! { "_id": "a" }, doc! { "_id": "b" }])
            .await
            .unwrap();
        store
            .insert_many("unrelated", vec![doc! { "_id": "x" }])
            .await
            .unwrap();

        let report = clean_database(&store, &IndexCatalog::default())
            .await
            .unwrap();

        let movies = report
            .entries
            .iter()
            .find(|e| e.collection == Collection::Movies)
            .unwrap();
        assert!(movies.existed);
        assert_eq!(movies.documents_removed, 2);
        assert_eq!(report.total_removed(), 2);
        assert!(!store.collection_exists("movies").await.unwrap());
        assert_eq!(store.count_documents("unrelated").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clean_twice_is_idempotent() {
        let store = MemoryStore::new();
        store
            .insert_many("rooms", vec![doc! { "_id": "r" }])
            .await
            .unwrap();

        let catalog = IndexCatalog::default();
        let first = clean_database(&store, &catalog).await.unwrap();
        let second = clean_database(&store, &catalog).await.unwrap();

        assert_eq!(first.total_removed(), 1);
        assert_eq!(second.total_removed(), 0);
        assert!(first.is_clean() && second.is_clean());
        assert!(store.collection_names().await.unwrap().is_empty());
    }
}
