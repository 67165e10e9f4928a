use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::question::Question;

//
// ─── DIRECTION ─────────────────────────────────────────────────────────────────
//

/// Outcome of a swipe: left rejects the prompt, right accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    #[must_use]
    pub fn is_right(self) -> bool {
        matches!(self, SwipeDirection::Right)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
        }
    }
}

//
// ─── HISTORY ENTRY ─────────────────────────────────────────────────────────────
//

/// One recorded decision. History is append-only and only ever truncated by a reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeAction {
    pub question: Question,
    pub direction: SwipeDirection,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl SwipeAction {
    #[must_use]
    pub fn new(question: Question, direction: SwipeDirection, timestamp: DateTime<Utc>) -> Self {
        Self {
            question,
            direction,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionId, TalentId};
    use crate::time::fixed_now;

    #[test]
    fn action_serializes_with_lowercase_direction_and_millis() {
        let action = SwipeAction::new(
            Question::new(QuestionId::new(1), "Q", TalentId::new(1)),
            SwipeDirection::Right,
            fixed_now(),
        );
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["direction"], "right");
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
    }

    #[test]
    fn unknown_direction_is_rejected() {
        let raw = r#"{"question":{"id":1,"text":"Q","talentId":1},"direction":"up","timestamp":0}"#;
        assert!(serde_json::from_str::<SwipeAction>(raw).is_err());
    }
}
