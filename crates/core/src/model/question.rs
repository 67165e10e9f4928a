use serde::{Deserialize, Serialize};

use crate::model::ids::{QuestionId, TalentId};

/// Fallback accent used when a question or talent carries no color of its own.
pub const DEFAULT_ACCENT: &str = "var(--ksa-blue)";

/// A yes/no prompt linked to exactly one talent.
///
/// Serialized with camelCase keys so persisted history entries keep the
/// `{id, text, talentId, color}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub talent_id: TalentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Question {
    #[must_use]
    pub fn new(id: QuestionId, text: impl Into<String>, talent_id: TalentId) -> Self {
        Self {
            id,
            text: text.into(),
            talent_id,
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Card background, falling back to the theme accent.
    #[must_use]
    pub fn display_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_ACCENT)
    }
}
