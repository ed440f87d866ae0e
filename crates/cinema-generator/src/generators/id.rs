//! Identifier generators.
//!
//! Identifiers are unique within a run because they derive from a
//! monotonically increasing per-category index, never from randomness.

pub const ROOM_PREFIX: &str = "room";
pub const MOVIE_PREFIX: &str = "movie";
pub const CUSTOMER_PREFIX: &str = "customer";
pub const SHOWTIME_PREFIX: &str = "showtime";
pub const TRANSACTION_PREFIX: &str = "trx";

/// Format a record identifier, e.g. `movie_000042`.
///
/// Indices wider than six digits are kept whole, so ids stay unique past
/// `999999`.
pub fn record_id(prefix: &str, index: u64) -> String {
    format!("{prefix}_{index:06}")
}

/// Format an invoice number, e.g. `CIN-00000042`.
pub fn invoice_number(index: u64) -> String {
    format!("CIN-{index:08}")
}
