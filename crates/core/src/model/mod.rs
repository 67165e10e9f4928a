mod catalog;
mod ids;
mod question;
mod records;
mod swipe;
mod talent;

pub use catalog::{Catalog, CatalogError};
pub use ids::{ParseIdError, QuestionId, TalentId};
pub use question::{DEFAULT_ACCENT, Question};
pub use records::{ProgressRecord, ResultsRecord, SavedResultsInfo};
pub use swipe::{SwipeAction, SwipeDirection};
pub use talent::Talent;
