//! Cleaning, initialization and bulk population of the cinema database.
//!
//! Every operation takes the destination as a [`DocumentStore`]. The
//! production store is [`MongoStore`]; [`MemoryStore`] holds everything in
//! process and backs the test suites.
//!
//! ```text
//! clean_database ──────┐
//! initialize_database ─┼──► DocumentStore ──► MongoStore | MemoryStore
//! CinemaPopulator ─────┘          ▲
//!        │                        │ insert_many, one call per batch
//!        ▼                        │
//!  CinemaGenerator ──────► BatchWriter
//! ```

pub mod args;
pub mod cleanup;
pub mod document;
pub mod error;
pub mod fixtures;
pub mod init;
pub mod insert;
pub mod memory;
pub mod mongo;
pub mod populator;
pub mod store;

pub use args::{GenerateArgs, MongoDBArgs};
pub use cleanup::{clean_database, CleanupEntry, CleanupReport};
pub use document::ToDocument;
pub use error::PopulatorError;
pub use init::{initialize_database, InitReport};
pub use insert::{insert_batch, BatchWriter, PopulateMetrics};
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use populator::{CinemaPopulator, GenerationReport};
pub use store::{DocumentStore, StoreError};
