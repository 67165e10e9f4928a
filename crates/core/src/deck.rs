//! Swipe deck state machine.
//!
//! Walks an ordered question list one decision at a time:
//!
//! ```text
//! InProgress(i) --decide--> Transitioning(i) --settle--> InProgress(i + 1)
//!                                             \--settle--> AwaitingCompletion --mark_completed--> Completed
//! InProgress(i) <--return_to_quiz-- ShowingSavedResults(i) <--show_saved_results-- InProgress(i)
//! any --reset--> InProgress(0)
//! ```
//!
//! The deck performs no I/O. Each decision hands back the progress record to
//! persist and a [`PendingTransition`] token; the caller waits out the settle
//! delay and then calls [`SwipeDeck::settle`]. Tokens carry the deck generation,
//! so a reset in the meantime turns the late settle into a no-op.

use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{ProgressRecord, Question, SwipeAction, SwipeDirection};

/// Delay between a decision and the next card becoming active.
pub const TRANSITION_DELAY: Duration = Duration::from_millis(300);

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("a decision is already in flight")]
    Busy,

    #[error("deck is not accepting decisions")]
    NotInProgress,

    #[error("saved results can only be opened from an active quiz")]
    SavedResultsUnavailable,

    #[error("deck is not showing saved results")]
    NotShowingSavedResults,

    #[error("deck is not awaiting completion")]
    NotAwaitingCompletion,
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckPhase {
    InProgress(usize),
    Transitioning(usize),
    AwaitingCompletion,
    Completed,
    ShowingSavedResults(usize),
}

/// Handle for a scheduled settle. Only valid for the generation it was minted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    generation: u64,
    index: usize,
}

impl PendingTransition {
    /// Index of the question whose decision started this transition.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// The next question is now active.
    Advanced(usize),
    /// The last question was answered; the deck awaits finalization.
    AllProcessed,
    /// The token predates a reset or no longer matches the deck state.
    Stale,
}

/// Emitted for every decision, consumed by whoever accumulates and persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckEvent {
    SwipedLeft(Question),
    SwipedRight(Question),
}

impl DeckEvent {
    #[must_use]
    pub fn question(&self) -> &Question {
        match self {
            DeckEvent::SwipedLeft(question) | DeckEvent::SwipedRight(question) => question,
        }
    }

    #[must_use]
    pub fn direction(&self) -> SwipeDirection {
        match self {
            DeckEvent::SwipedLeft(_) => SwipeDirection::Left,
            DeckEvent::SwipedRight(_) => SwipeDirection::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub event: DeckEvent,
    pub progress: ProgressRecord,
    pub transition: PendingTransition,
}

//
// ─── DECK ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct SwipeDeck {
    questions: Vec<Question>,
    phase: DeckPhase,
    history: Vec<SwipeAction>,
    generation: u64,
}

impl SwipeDeck {
    /// A fresh deck. An empty question list is complete from the start.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        let phase = Self::initial_phase(questions.len());
        Self {
            questions,
            phase,
            history: Vec::new(),
            generation: 0,
        }
    }

    /// Rehydrates from a persisted record when it fits this deck, otherwise starts fresh.
    #[must_use]
    pub fn resume(questions: Vec<Question>, progress: Option<ProgressRecord>) -> Self {
        let mut deck = Self::new(questions);
        if let Some(progress) = progress {
            if progress.is_resumable(deck.question_count()) {
                deck.phase = DeckPhase::InProgress(progress.current_index);
                deck.history = progress.history;
            } else {
                tracing::debug!(
                    saved_index = progress.current_index,
                    question_count = deck.question_count(),
                    "ignoring stale progress record"
                );
            }
        }
        deck
    }

    fn initial_phase(question_count: usize) -> DeckPhase {
        if question_count == 0 {
            DeckPhase::Completed
        } else {
            DeckPhase::InProgress(0)
        }
    }

    #[must_use]
    pub fn phase(&self) -> DeckPhase {
        self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn history(&self) -> &[SwipeAction] {
        &self.history
    }

    /// Index of the question on screen; equals the question count once finished.
    #[must_use]
    pub fn current_index(&self) -> usize {
        match self.phase {
            DeckPhase::InProgress(i)
            | DeckPhase::Transitioning(i)
            | DeckPhase::ShowingSavedResults(i) => i,
            DeckPhase::AwaitingCompletion | DeckPhase::Completed => self.questions.len(),
        }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            DeckPhase::InProgress(i) | DeckPhase::Transitioning(i) => self.questions.get(i),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, DeckPhase::Transitioning(_))
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self.phase, DeckPhase::Completed)
    }

    /// Progress as it should be persisted right now.
    #[must_use]
    pub fn progress(&self) -> ProgressRecord {
        ProgressRecord::new(self.history.len(), self.history.clone())
    }

    /// Records a decision on the current question and enters `Transitioning`.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::Busy` while a previous decision is settling, or
    /// `DeckError::NotInProgress` in any other non-active phase.
    pub fn decide(
        &mut self,
        direction: SwipeDirection,
        at: DateTime<Utc>,
    ) -> Result<Decision, DeckError> {
        let index = match self.phase {
            DeckPhase::InProgress(i) => i,
            DeckPhase::Transitioning(_) => return Err(DeckError::Busy),
            _ => return Err(DeckError::NotInProgress),
        };
        let question = self
            .questions
            .get(index)
            .cloned()
            .ok_or(DeckError::NotInProgress)?;

        self.history
            .push(SwipeAction::new(question.clone(), direction, at));
        self.phase = DeckPhase::Transitioning(index);

        let event = match direction {
            SwipeDirection::Left => DeckEvent::SwipedLeft(question),
            SwipeDirection::Right => DeckEvent::SwipedRight(question),
        };

        Ok(Decision {
            event,
            progress: ProgressRecord::new(index + 1, self.history.clone()),
            transition: PendingTransition {
                generation: self.generation,
                index,
            },
        })
    }

    /// Completes a transition started by [`SwipeDeck::decide`].
    pub fn settle(&mut self, transition: PendingTransition) -> Settled {
        if transition.generation != self.generation
            || self.phase != DeckPhase::Transitioning(transition.index)
        {
            return Settled::Stale;
        }

        let next = transition.index + 1;
        if next < self.questions.len() {
            self.phase = DeckPhase::InProgress(next);
            Settled::Advanced(next)
        } else {
            self.phase = DeckPhase::AwaitingCompletion;
            Settled::AllProcessed
        }
    }

    /// # Errors
    ///
    /// Returns `DeckError::NotAwaitingCompletion` unless the last settle reported `AllProcessed`.
    pub fn mark_completed(&mut self) -> Result<(), DeckError> {
        if self.phase != DeckPhase::AwaitingCompletion {
            return Err(DeckError::NotAwaitingCompletion);
        }
        self.phase = DeckPhase::Completed;
        Ok(())
    }

    /// Switches to the saved-results view without touching index or history.
    ///
    /// # Errors
    ///
    /// Returns `DeckError::SavedResultsUnavailable` outside `InProgress`.
    pub fn show_saved_results(&mut self) -> Result<(), DeckError> {
        match self.phase {
            DeckPhase::InProgress(i) => {
                self.phase = DeckPhase::ShowingSavedResults(i);
                Ok(())
            }
            _ => Err(DeckError::SavedResultsUnavailable),
        }
    }

    /// # Errors
    ///
    /// Returns `DeckError::NotShowingSavedResults` if the saved view is not open.
    pub fn return_to_quiz(&mut self) -> Result<(), DeckError> {
        match self.phase {
            DeckPhase::ShowingSavedResults(i) => {
                self.phase = DeckPhase::InProgress(i);
                Ok(())
            }
            _ => Err(DeckError::NotShowingSavedResults),
        }
    }

    /// Back to the first question with empty history, invalidating pending settles.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.history.clear();
        self.phase = Self::initial_phase(self.questions.len());
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
