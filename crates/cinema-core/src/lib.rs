//! Core types for the cinema-seed tools.
//!
//! This crate provides the types shared by the generator and the populator:
//!
//! - [`model`] - Domain records (rooms, movies, customers, showtimes, transactions)
//! - [`SeedProfile`] - Volumes, vocabularies and constants, loadable from YAML
//! - [`IndexCatalog`] - Collections and the index declarations for each
//!
//! # Architecture
//!
//! ```text
//! cinema-core (this crate)
//!    │
//!    ├─── cinema-generator         (samples records from a SeedProfile)
//!    │
//!    └─── cinema-populate-mongodb  (writes records, declares indexes)
//! ```

pub mod catalog;
pub mod model;
pub mod profile;

// Re-exports for convenience
pub use catalog::{Collection, IndexCatalog, IndexKey, IndexKind, IndexSpec};
pub use model::{
    Customer, CustomerTier, Movie, PaymentDetails, PaymentMethod, Room, RoomCategory, Seat,
    SeatKind, Showtime, ShowtimeStatus, Transaction, TransactionStatus,
};
pub use profile::{
    Pricing, ProfileError, Schedule, SeedProfile, Volumes, Vocabulary, DEFAULT_BATCH_SIZE,
    MAX_PRICE, MAX_SHOWTIME_HORIZON_DAYS, MAX_TURNAROUND_MINUTES, SCHEDULE_YEARS,
};
