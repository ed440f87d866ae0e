//! Error types for the cinema populator.

use crate::store::StoreError;
use cinema_generator::GeneratorError;
use thiserror::Error;

/// Errors that can occur while cleaning, initializing or populating.
#[derive(Error, Debug)]
pub enum PopulatorError {
    /// Store connection, query or write error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Generator error.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
