use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use talents_core::deck::{Decision, DeckPhase, PendingTransition, Settled, SwipeDeck};
use talents_core::model::{Catalog, ProgressRecord, Question, SwipeAction, SwipeDirection, Talent};
use talents_core::selection::TalentSelection;

use super::progress::QuizProgress;
use crate::error::QuizError;

/// In-memory quiz over a catalog: the swipe deck plus the talents selected so far.
///
/// Holds no storage handles; [`super::QuizLoopService`] drives it and persists
/// what it produces.
#[derive(Clone)]
pub struct QuizSession {
    catalog: Arc<Catalog>,
    deck: SwipeDeck,
    selection: TalentSelection,
}

impl QuizSession {
    /// A fresh quiz at the first question.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::resume(catalog, None)
    }

    /// Rehydrates from persisted progress, rebuilding the selection from its history.
    #[must_use]
    pub fn resume(catalog: Arc<Catalog>, progress: Option<ProgressRecord>) -> Self {
        let deck = SwipeDeck::resume(catalog.questions().to_vec(), progress);
        let selection = TalentSelection::from_history(&catalog, deck.history());
        Self {
            catalog,
            deck,
            selection,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn phase(&self) -> DeckPhase {
        self.deck.phase()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.deck.current_question()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.deck.current_index()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.deck.question_count()
    }

    #[must_use]
    pub fn history(&self) -> &[SwipeAction] {
        self.deck.history()
    }

    #[must_use]
    pub fn selected_talents(&self) -> &[Talent] {
        self.selection.talents()
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.deck.is_transitioning()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.deck.is_complete()
    }

    #[must_use]
    pub fn is_showing_saved_results(&self) -> bool {
        matches!(self.deck.phase(), DeckPhase::ShowingSavedResults(_))
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let history = self.deck.history();
        QuizProgress {
            total: self.deck.question_count(),
            answered: history.len(),
            current_index: self.deck.current_index(),
            right_count: history
                .iter()
                .filter(|action| action.direction.is_right())
                .count(),
            is_complete: self.deck.is_complete(),
        }
    }

    /// Records the decision on the deck and folds it into the selection.
    ///
    /// Returns the deck decision and whether a new talent was selected.
    pub(crate) fn decide(
        &mut self,
        direction: SwipeDirection,
        at: DateTime<Utc>,
    ) -> Result<(Decision, bool), QuizError> {
        let decision = self.deck.decide(direction, at)?;
        let question = decision.event.question();
        let grew = match direction {
            SwipeDirection::Right => self.selection.record_right_swipe(&self.catalog, question),
            SwipeDirection::Left => {
                self.selection.record_left_swipe(question);
                false
            }
        };
        Ok((decision, grew))
    }

    pub(crate) fn settle(&mut self, transition: PendingTransition) -> Settled {
        self.deck.settle(transition)
    }

    pub(crate) fn mark_completed(&mut self) -> Result<(), QuizError> {
        Ok(self.deck.mark_completed()?)
    }

    pub(crate) fn show_saved_results(&mut self) -> Result<(), QuizError> {
        Ok(self.deck.show_saved_results()?)
    }

    pub(crate) fn return_to_quiz(&mut self) -> Result<(), QuizError> {
        Ok(self.deck.return_to_quiz()?)
    }

    pub(crate) fn reset(&mut self) {
        self.deck.reset();
        self.selection.clear();
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.deck.phase())
            .field("questions_len", &self.deck.question_count())
            .field("history_len", &self.deck.history().len())
            .field("selected_len", &self.selection.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use talents_core::time::fixed_now;

    fn session() -> QuizSession {
        QuizSession::new(Arc::new(Catalog::builtin()))
    }

    #[test]
    fn right_swipe_selects_linked_talent() {
        let mut session = session();
        let (decision, grew) = session.decide(SwipeDirection::Right, fixed_now()).unwrap();
        assert!(grew);
        assert_eq!(decision.progress.current_index, 1);
        assert_eq!(session.selected_talents()[0].title, "Leiderschap");
        assert!(session.is_transitioning());
    }

    #[test]
    fn left_swipe_selects_nothing() {
        let mut session = session();
        let (_, grew) = session.decide(SwipeDirection::Left, fixed_now()).unwrap();
        assert!(!grew);
        assert!(session.selected_talents().is_empty());
        assert_eq!(session.progress().answered, 1);
        assert_eq!(session.progress().right_count, 0);
    }

    #[test]
    fn resume_rebuilds_selection_from_history() {
        let catalog = Arc::new(Catalog::builtin());
        let mut seed = QuizSession::new(Arc::clone(&catalog));
        for direction in [SwipeDirection::Left, SwipeDirection::Right, SwipeDirection::Right] {
            let (decision, _) = seed.decide(direction, fixed_now()).unwrap();
            seed.settle(decision.transition);
        }

        let resumed = QuizSession::resume(catalog, Some(seed.deck.progress()));
        assert_eq!(resumed.phase(), DeckPhase::InProgress(3));
        let ids: Vec<_> = resumed
            .selected_talents()
            .iter()
            .map(|t| t.id.value())
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn reset_clears_selection_and_history() {
        let mut session = session();
        let (decision, _) = session.decide(SwipeDirection::Right, fixed_now()).unwrap();
        session.settle(decision.transition);
        session.reset();
        assert!(session.selected_talents().is_empty());
        assert!(session.history().is_empty());
        assert_eq!(session.current_index(), 0);
    }
}
