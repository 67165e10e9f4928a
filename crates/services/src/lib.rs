#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod quiz;

pub use talents_core::Clock;

pub use app_services::AppServices;
pub use config::QuizConfig;
pub use error::{AppServicesError, QuizError};

pub use quiz::{
    CompletionReport, DecisionOutcome, QuizLoopService, QuizProgress, QuizSession, SettleOutcome,
};
