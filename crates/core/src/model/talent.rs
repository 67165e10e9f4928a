use serde::{Deserialize, Serialize};

use crate::model::ids::TalentId;
use crate::model::question::DEFAULT_ACCENT;

/// A static category the quiz can surface as a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Talent {
    pub id: TalentId,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Talent {
    #[must_use]
    pub fn new(id: TalentId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            color: None,
            image: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn display_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_ACCENT)
    }
}
