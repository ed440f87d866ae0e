//! Collections and index declarations of the cinema database.
//!
//! Both `init` and `generate` declare indexes from this catalog so the two
//! never drift apart. The bulk set is the core set plus a few indexes that
//! only pay off on large datasets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical record categories, each backed by one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Customers,
    Movies,
    Showtimes,
    Transactions,
    Rooms,
}

impl Collection {
    /// Every collection, in the order cleanup visits them.
    pub const ALL: [Collection; 5] = [
        Collection::Customers,
        Collection::Movies,
        Collection::Showtimes,
        Collection::Transactions,
        Collection::Rooms,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Customers => "customers",
            Collection::Movies => "movies",
            Collection::Showtimes => "showtimes",
            Collection::Transactions => "transactions",
            Collection::Rooms => "rooms",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a single key participates in an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    Ascending,
    Descending,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexKey {
    /// Field path, dotted for embedded documents (`room.id`).
    pub field: String,
    pub kind: IndexKind,
}

/// One index on one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSpec {
    pub collection: Collection,
    pub keys: Vec<IndexKey>,
    pub unique: bool,
}

impl IndexSpec {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            keys: Vec::new(),
            unique: false,
        }
    }

    pub fn ascending(collection: Collection, field: &str) -> Self {
        Self::new(collection).key(field, IndexKind::Ascending)
    }

    pub fn descending(collection: Collection, field: &str) -> Self {
        Self::new(collection).key(field, IndexKind::Descending)
    }

    pub fn key(mut self, field: &str, kind: IndexKind) -> Self {
        self.keys.push(IndexKey {
            field: field.to_string(),
            kind,
        });
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn is_text(&self) -> bool {
        self.keys.iter().any(|k| k.kind == IndexKind::Text)
    }

    /// Name following the server's default convention, e.g. `email_1`.
    pub fn name(&self) -> String {
        self.keys
            .iter()
            .map(|k| {
                let suffix = match k.kind {
                    IndexKind::Ascending => "1",
                    IndexKind::Descending => "-1",
                    IndexKind::Text => "text",
                };
                format!("{}_{}", k.field, suffix)
            })
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// Source of every index declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCatalog {
    core: Vec<IndexSpec>,
    bulk_extra: Vec<IndexSpec>,
}

impl Default for IndexCatalog {
    fn default() -> Self {
        use Collection::*;

        let core = vec![
            IndexSpec::ascending(Customers, "email").unique(),
            IndexSpec::ascending(Customers, "tier"),
            IndexSpec::ascending(Customers, "active"),
            IndexSpec::new(Movies)
                .key("title", IndexKind::Text)
                .key("synopsis", IndexKind::Text),
            IndexSpec::ascending(Movies, "genres"),
            IndexSpec::descending(Movies, "release_date"),
            IndexSpec::ascending(Movies, "active"),
            IndexSpec::ascending(Showtimes, "movie_id"),
            IndexSpec::ascending(Showtimes, "starts_at"),
            IndexSpec::ascending(Showtimes, "status"),
            IndexSpec::ascending(Transactions, "customer_id"),
            IndexSpec::ascending(Transactions, "showtime_id"),
            IndexSpec::ascending(Transactions, "status"),
            IndexSpec::descending(Transactions, "created_at"),
            IndexSpec::ascending(Transactions, "invoice_number").unique(),
        ];

        let bulk_extra = vec![
            IndexSpec::ascending(Movies, "director"),
            IndexSpec::ascending(Showtimes, "room.id"),
        ];

        Self { core, bulk_extra }
    }
}

impl IndexCatalog {
    /// Indexes declared when the database is initialized.
    pub fn core_indexes(&self) -> &[IndexSpec] {
        &self.core
    }

    /// Indexes declared after bulk generation.
    pub fn bulk_indexes(&self) -> Vec<IndexSpec> {
        self.core
            .iter()
            .chain(self.bulk_extra.iter())
            .cloned()
            .collect()
    }

    /// Collections the database consists of.
    pub fn collections(&self) -> &'static [Collection] {
        &Collection::ALL
    }
}
