use thiserror::Error;

use crate::deck::DeckError;
use crate::model::CatalogError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
