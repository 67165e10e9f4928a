use crate::model::{Catalog, Question, SwipeAction, SwipeDirection, Talent};

/// Talents picked so far, deduplicated by id, in first-selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TalentSelection {
    talents: Vec<Talent>,
}

impl TalentSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replays the right swipes of a persisted history.
    #[must_use]
    pub fn from_history(catalog: &Catalog, history: &[SwipeAction]) -> Self {
        let mut selection = Self::new();
        for action in history {
            selection.apply(catalog, action.direction, &action.question);
        }
        selection
    }

    /// Adds the question's talent. Returns `true` if the selection grew.
    ///
    /// A question pointing at an unknown talent selects nothing.
    pub fn record_right_swipe(&mut self, catalog: &Catalog, question: &Question) -> bool {
        let Some(talent) = catalog.talent(question.talent_id) else {
            tracing::warn!(
                question_id = %question.id,
                talent_id = %question.talent_id,
                "question references unknown talent"
            );
            return false;
        };
        self.insert(talent.clone())
    }

    /// Rejections never change the selection.
    pub fn record_left_swipe(&mut self, _question: &Question) {}

    pub fn apply(&mut self, catalog: &Catalog, direction: SwipeDirection, question: &Question) {
        match direction {
            SwipeDirection::Right => {
                self.record_right_swipe(catalog, question);
            }
            SwipeDirection::Left => self.record_left_swipe(question),
        }
    }

    fn insert(&mut self, talent: Talent) -> bool {
        if self.talents.iter().any(|existing| existing.id == talent.id) {
            return false;
        }
        self.talents.push(talent);
        true
    }

    #[must_use]
    pub fn talents(&self) -> &[Talent] {
        &self.talents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.talents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.talents.is_empty()
    }

    pub fn clear(&mut self) {
        self.talents.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionId, TalentId};
    use crate::time::fixed_now;

    fn question(id: u64, talent: u64) -> Question {
        Question::new(QuestionId::new(id), format!("Q{id}"), TalentId::new(talent))
    }

    #[test]
    fn repeated_right_swipes_do_not_duplicate() {
        let catalog = Catalog::builtin();
        let mut selection = TalentSelection::new();
        assert!(selection.record_right_swipe(&catalog, &question(1, 1)));
        assert!(!selection.record_right_swipe(&catalog, &question(1, 1)));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn keeps_first_selection_order() {
        let catalog = Catalog::builtin();
        let mut selection = TalentSelection::new();
        for talent in [5, 1, 3, 1] {
            selection.record_right_swipe(&catalog, &question(talent, talent));
        }
        let ids: Vec<_> = selection.talents().iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![5, 1, 3]);
    }

    #[test]
    fn unknown_talent_and_left_swipes_are_no_ops() {
        let catalog = Catalog::builtin();
        let mut selection = TalentSelection::new();
        assert!(!selection.record_right_swipe(&catalog, &question(1, 99)));
        selection.record_left_swipe(&question(2, 2));
        assert!(selection.is_empty());
    }

    #[test]
    fn rebuilds_from_history() {
        let catalog = Catalog::builtin();
        let history = vec![
            SwipeAction::new(question(1, 1), SwipeDirection::Right, fixed_now()),
            SwipeAction::new(question(2, 2), SwipeDirection::Left, fixed_now()),
            SwipeAction::new(question(3, 3), SwipeDirection::Right, fixed_now()),
        ];
        let selection = TalentSelection::from_history(&catalog, &history);
        let ids: Vec<_> = selection.talents().iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
