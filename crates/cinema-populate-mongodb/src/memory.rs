//! In-process document store.
//!
//! Mirrors the parts of MongoDB behavior the seeding tools rely on: implicit
//! collection creation on insert, ordered bulk inserts, `_id` uniqueness and
//! unique secondary indexes. It also records the size of every bulk write so
//! batching can be observed.

use crate::store::{DocumentStore, StoreError};
use async_trait::async_trait;
use bson::{Bson, Document};
use cinema_core::IndexSpec;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tokio::sync::Mutex;

const ID_INDEX: &str = "_id_";

#[derive(Debug, Default)]
struct MemoryCollection {
    documents: Vec<Document>,
    indexes: Vec<IndexSpec>,
    /// Seen keys per unique index name, `_id_` included.
    unique_keys: HashMap<String, HashSet<String>>,
    batch_sizes: Vec<usize>,
}

#[derive(Debug, Default)]
struct State {
    collections: BTreeMap<String, MemoryCollection>,
    rejected: BTreeSet<String>,
}

/// Document store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

/// Resolve a dotted field path inside a document.
fn lookup<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut parts = path.split('.');
    let mut current = document.get(parts.next()?)?;
    for part in parts {
        current = match current {
            Bson::Document(inner) => inner.get(part)?,
            _ => return None,
        };
    }
    Some(current)
}

fn key_for(document: &Document, fields: &[&str]) -> String {
    fields
        .iter()
        .map(|field| lookup(document, field).cloned().unwrap_or(Bson::Null).to_string())
        .collect::<Vec<_>>()
        .join("|")
}

fn unique_fields(index: &IndexSpec) -> Vec<&str> {
    index.keys.iter().map(|k| k.field.as_str()).collect()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later insert into `collection` fail.
    pub async fn reject_writes_to(&self, collection: &str) {
        self.state.lock().await.rejected.insert(collection.to_string());
    }

    /// Copy of the documents of a collection, in insertion order.
    pub async fn documents(&self, collection: &str) -> Vec<Document> {
        self.state
            .lock()
            .await
            .collections
            .get(collection)
            .map(|c| c.documents.clone())
            .unwrap_or_default()
    }

    /// Size of every bulk write received by a collection, in order.
    pub async fn batch_sizes(&self, collection: &str) -> Vec<usize> {
        self.state
            .lock()
            .await
            .collections
            .get(collection)
            .map(|c| c.batch_sizes.clone())
            .unwrap_or_default()
    }

    /// Indexes declared on a collection.
    pub async fn indexes(&self, collection: &str) -> Vec<IndexSpec> {
        self.state
            .lock()
            .await
            .collections
            .get(collection)
            .map(|c| c.indexes.clone())
            .unwrap_or_default()
    }
}

impl MemoryCollection {
    /// Check a document against every unique index and record its keys.
    fn admit(&mut self, collection: &str, document: &Document) -> Result<(), StoreError> {
        let mut pending: Vec<(String, String)> = Vec::new();

        if document.contains_key("_id") {
            pending.push((ID_INDEX.to_string(), key_for(document, &["_id"])));
        }
        for index in self.indexes.iter().filter(|i| i.unique) {
            pending.push((index.name(), key_for(document, &unique_fields(index))));
        }

        for (index, key) in &pending {
            let seen = self.unique_keys.get(index).is_some_and(|keys| keys.contains(key));
            if seen {
                return Err(StoreError::DuplicateKey {
                    collection: collection.to_string(),
                    index: index.clone(),
                    key: key.clone(),
                });
            }
        }
        for (index, key) in pending {
            self.unique_keys.entry(index).or_default().insert(key);
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.state.lock().await.collections.keys().cloned().collect())
    }

    async fn create_collection(&self, name: &str) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        if state.collections.contains_key(name) {
            return Err(StoreError::CollectionExists(name.to_string()));
        }
        state
            .collections
            .insert(name.to_string(), MemoryCollection::default());
        Ok(())
    }

    async fn drop_collection(&self, name: &str) -> Result<(), StoreError> {
        self.state.lock().await.collections.remove(name);
        Ok(())
    }

    async fn count_documents(&self, name: &str) -> Result<u64, StoreError> {
        Ok(self
            .state
            .lock()
            .await
            .collections
            .get(name)
            .map(|c| c.documents.len() as u64)
            .unwrap_or(0))
    }

    async fn insert_many(&self, name: &str, documents: Vec<Document>) -> Result<u64, StoreError> {
        let mut state = self.state.lock().await;
        if state.rejected.contains(name) {
            return Err(StoreError::WriteRejected {
                collection: name.to_string(),
                reason: "writes disabled".to_string(),
            });
        }

        let collection = state.collections.entry(name.to_string()).or_default();
        collection.batch_sizes.push(documents.len());

        // Ordered insert: documents before the first violation stay written.
        let mut inserted = 0u64;
        for document in documents {
            collection.admit(name, &document)?;
            collection.documents.push(document);
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn create_index(&self, index: &IndexSpec) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        let name = index.collection.name();
        let collection = state.collections.entry(name.to_string()).or_default();

        if collection.indexes.contains(index) {
            return Ok(());
        }

        if index.unique {
            let fields = unique_fields(index);
            let mut keys = HashSet::new();
            for document in &collection.documents {
                let key = key_for(document, &fields);
                if !keys.insert(key.clone()) {
                    return Err(StoreError::DuplicateKey {
                        collection: name.to_string(),
                        index: index.name(),
                        key,
                    });
                }
            }
            collection.unique_keys.insert(index.name(), keys);
        }

        collection.indexes.push(index.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use cinema_core::Collection;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_insert_creates_collection() {
        let store = MemoryStore::new();
        assert!(!assert_ok!(store.collection_exists("movies").await));

        let inserted = store
            .insert_many("movies", vec![doc! { "_id": "m1" }, doc! { "_id": "m2" }])
            .await
            .unwrap();

        assert_eq!(inserted, 2);
        assert!(assert_ok!(store.collection_exists("movies").await));
        assert_eq!(store.count_documents("movies").await.unwrap(), 2);
        assert_eq!(store.batch_sizes("movies").await, vec![2]);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected_after_prefix() {
        let store = MemoryStore::new();
        let result = store
            .insert_many(
                "rooms",
                vec![doc! { "_id": "r1" }, doc! { "_id": "r2" }, doc! { "_id": "r1" }],
            )
            .await;

        assert!(matches!(result, Err(StoreError::DuplicateKey { ref index, .. }) if index == "_id_"));
        assert_eq!(store.count_documents("rooms").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unique_index_enforced() {
        let store = MemoryStore::new();
        let index = IndexSpec::ascending(Collection::Customers, "email").unique();
        assert_ok!(store.create_index(&index).await);

        assert_ok!(
            store
                .insert_many("customers", vec![doc! { "_id": 1, "email": "a@x.com" }])
                .await
        );
        let result = store
            .insert_many("customers", vec![doc! { "_id": 2, "email": "a@x.com" }])
            .await;

        assert!(matches!(result, Err(StoreError::DuplicateKey { ref index, .. }) if index == "email_1"));
    }

    #[tokio::test]
    async fn test_unique_index_on_existing_duplicates_fails() {
        let store = MemoryStore::new();
        store
            .insert_many(
                "customers",
                vec![
                    doc! { "_id": 1, "email": "a@x.com" },
                    doc! { "_id": 2, "email": "a@x.com" },
                ],
            )
            .await
            .unwrap();

        let index = IndexSpec::ascending(Collection::Customers, "email").unique();
        assert_err!(store.create_index(&index).await);
        assert!(store.indexes("customers").await.is_empty());
    }

    #[tokio::test]
    async fn test_create_index_idempotent() {
        let store = MemoryStore::new();
        let index = IndexSpec::ascending(Collection::Showtimes, "room.id");

        assert_ok!(store.create_index(&index).await);
        assert_ok!(store.create_index(&index).await);
        assert_eq!(store.indexes("showtimes").await, vec![index]);
    }

    #[tokio::test]
    async fn test_create_collection_twice_fails() {
        let store = MemoryStore::new();
        assert_ok!(store.create_collection("rooms").await);
        assert!(matches!(
            store.create_collection("rooms").await,
            Err(StoreError::CollectionExists(_))
        ));
    }

    #[tokio::test]
    async fn test_drop_missing_collection_is_noop() {
        let store = MemoryStore::new();
        assert_ok!(store.drop_collection("nothing").await);
        assert_eq!(store.count_documents("nothing").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_rejected_writes() {
        let store = MemoryStore::new();
        store.reject_writes_to("transactions").await;

        let result = store
            .insert_many("transactions", vec![doc! { "_id": "t1" }])
            .await;
        assert!(matches!(result, Err(StoreError::WriteRejected { .. })));
    }

    #[test]
    fn test_lookup_dotted_path() {
        let document = doc! { "room": { "id": "room_000001" }, "status": "scheduled" };

        assert_eq!(
            lookup(&document, "room.id"),
            Some(&Bson::String("room_000001".to_string()))
        );
        assert_eq!(lookup(&document, "status.id"), None);
        assert_eq!(lookup(&document, "missing"), None);
    }
}
