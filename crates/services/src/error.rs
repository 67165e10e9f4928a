//! Shared error types for the services crate.

use thiserror::Error;

use storage::sqlite::SqliteInitError;
use talents_core::deck::DeckError;

/// Errors emitted by the quiz services.
///
/// Persistence failures never show up here: reads degrade to defaults and
/// writes are logged and dropped.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no saved results to show")]
    NoSavedResults,
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
