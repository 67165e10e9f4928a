use std::sync::Arc;

use services::{AppServices, QuizConfig, QuizLoopService};
use talents_core::model::Catalog;

/// What the views need from the composition root.
pub trait UiApp: Send + Sync {
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn catalog(&self) -> Arc<Catalog>;
    fn config(&self) -> QuizConfig;
}

impl UiApp for AppServices {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        AppServices::quiz_loop(self)
    }

    fn catalog(&self) -> Arc<Catalog> {
        AppServices::catalog(self)
    }

    fn config(&self) -> QuizConfig {
        AppServices::config(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    quiz_loop: Arc<QuizLoopService>,
    catalog: Arc<Catalog>,
    config: QuizConfig,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz_loop: app.quiz_loop(),
            catalog: app.catalog(),
            config: app.config(),
        }
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn config(&self) -> QuizConfig {
        self.config
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
