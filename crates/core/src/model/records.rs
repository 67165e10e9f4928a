use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::swipe::{SwipeAction, SwipeDirection};
use crate::model::talent::Talent;
use crate::time::{parse_iso, to_iso_string};

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// In-flight quiz state, persisted after every decision.
///
/// `history.len() == current_index` holds for every record the deck produces.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub current_index: usize,
    #[serde(default)]
    pub history: Vec<SwipeAction>,
}

impl ProgressRecord {
    #[must_use]
    pub fn new(current_index: usize, history: Vec<SwipeAction>) -> Self {
        Self {
            current_index,
            history,
        }
    }

    /// Whether this record can seed a deck of `question_count` questions.
    ///
    /// Records pointing at or past the end of the deck, or whose history length
    /// disagrees with the index, are stale and must be ignored.
    #[must_use]
    pub fn is_resumable(&self, question_count: usize) -> bool {
        self.current_index < question_count && self.history.len() == self.current_index
    }

    #[must_use]
    pub fn right_count(&self) -> usize {
        self.history
            .iter()
            .filter(|action| action.direction == SwipeDirection::Right)
            .count()
    }
}

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// Final outcome of a completed quiz. Written once, only when talents were selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsRecord {
    pub talents: Vec<Talent>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub date: String,
}

impl ResultsRecord {
    #[must_use]
    pub fn new(talents: Vec<Talent>, at: DateTime<Utc>) -> Self {
        Self {
            talents,
            timestamp: at,
            date: to_iso_string(at),
        }
    }

    #[must_use]
    pub fn talent_count(&self) -> usize {
        self.talents.len()
    }

    #[must_use]
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        parse_iso(&self.date)
    }
}

/// What the quiz screen needs to know about a previously saved result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SavedResultsInfo {
    pub has_saved_results: bool,
    pub talent_count: usize,
    pub date: Option<DateTime<Utc>>,
}

impl SavedResultsInfo {
    #[must_use]
    pub fn from_record(record: Option<&ResultsRecord>) -> Self {
        match record {
            Some(record) => Self {
                has_saved_results: record.talent_count() > 0,
                talent_count: record.talent_count(),
                date: record.saved_at(),
            },
            None => Self::default(),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, QuestionId, TalentId};
    use crate::time::fixed_now;

    fn action(id: u64, direction: SwipeDirection) -> SwipeAction {
        SwipeAction::new(
            Question::new(QuestionId::new(id), format!("Q{id}"), TalentId::new(id)),
            direction,
            fixed_now(),
        )
    }

    #[test]
    fn resumable_only_inside_deck_and_consistent() {
        let record = ProgressRecord::new(
            2,
            vec![action(1, SwipeDirection::Left), action(2, SwipeDirection::Right)],
        );
        assert!(record.is_resumable(8));
        assert!(!record.is_resumable(2));
        assert!(!ProgressRecord::new(2, Vec::new()).is_resumable(8));
        assert_eq!(record.right_count(), 1);
    }

    #[test]
    fn progress_reads_camel_case_and_defaults_history() {
        let record: ProgressRecord = serde_json::from_str(r#"{"currentIndex":0}"#).unwrap();
        assert_eq!(record, ProgressRecord::default());
    }

    #[test]
    fn results_record_keeps_timestamp_and_iso_date() {
        let record = ResultsRecord::new(
            vec![Talent::new(TalentId::new(1), "Leiderschap", "Leid")],
            fixed_now(),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
        assert_eq!(json["date"], "2023-11-14T22:13:20.000Z");
        assert_eq!(record.saved_at(), Some(fixed_now()));
    }

    #[test]
    fn saved_info_reflects_record() {
        assert!(!SavedResultsInfo::from_record(None).has_saved_results);

        let empty = ResultsRecord::new(Vec::new(), fixed_now());
        let info = SavedResultsInfo::from_record(Some(&empty));
        assert!(!info.has_saved_results);
        assert_eq!(info.date, Some(fixed_now()));

        let full = ResultsRecord::new(
            vec![
                Talent::new(TalentId::new(1), "A", "a"),
                Talent::new(TalentId::new(2), "B", "b"),
            ],
            fixed_now(),
        );
        let info = SavedResultsInfo::from_record(Some(&full));
        assert!(info.has_saved_results);
        assert_eq!(info.talent_count, 2);
    }
}
