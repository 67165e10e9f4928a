#![forbid(unsafe_code)]

pub mod local;
pub mod repository;
pub mod sqlite;

pub use local::LocalQuizStore;
pub use repository::{InMemoryStore, KeyValueStore, QuizStateRepository, Storage, StorageError};
