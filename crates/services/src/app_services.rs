use std::sync::Arc;

use storage::repository::Storage;
use talents_core::model::Catalog;

use crate::config::QuizConfig;
use crate::error::AppServicesError;
use crate::quiz::QuizLoopService;
use crate::Clock;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<Catalog>,
    config: QuizConfig,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database cannot be opened or migrated.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        catalog: Catalog,
        config: QuizConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, catalog, config))
    }

    /// Services over a process-local store; nothing survives a restart.
    #[must_use]
    pub fn in_memory(clock: Clock, catalog: Catalog, config: QuizConfig) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, catalog, config)
    }

    #[must_use]
    pub fn from_storage(
        storage: &Storage,
        clock: Clock,
        catalog: Catalog,
        config: QuizConfig,
    ) -> Self {
        let dangling = catalog.dangling_questions().count();
        if dangling > 0 {
            tracing::warn!(
                count = dangling,
                "catalog has questions without a matching talent"
            );
        }

        let catalog = Arc::new(catalog);
        let quiz_loop = Arc::new(
            QuizLoopService::new(clock, Arc::clone(&catalog), Arc::clone(&storage.quiz))
                .with_config(config),
        );

        Self {
            catalog,
            config,
            quiz_loop,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn config(&self) -> QuizConfig {
        self.config
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}
