use std::sync::Arc;

use chrono::{DateTime, Utc};
use storage::repository::QuizStateRepository;
use talents_core::deck::{DeckEvent, PendingTransition, Settled};
use talents_core::model::{
    Catalog, ProgressRecord, ResultsRecord, SavedResultsInfo, SwipeDirection, Talent,
};
use talents_core::selection::TalentSelection;

use super::session::QuizSession;
use crate::config::QuizConfig;
use crate::error::QuizError;
use crate::Clock;

/// Result of a single swipe decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub event: DeckEvent,
    /// Settle this after the transition delay.
    pub transition: PendingTransition,
    pub selected_new_talent: bool,
    pub progress_saved: bool,
}

/// What the completion side effect wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionReport {
    pub completed_at: DateTime<Utc>,
    pub talent_count: usize,
    pub results_saved: bool,
    pub marker_saved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    Advanced(usize),
    Completed(CompletionReport),
    /// The session was reset while the transition was pending.
    Stale,
}

/// Orchestrates quiz decisions against persisted state.
///
/// Storage is best-effort throughout: failed reads fall back to a fresh quiz,
/// failed writes are logged and the quiz carries on in memory.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    catalog: Arc<Catalog>,
    quiz: Arc<dyn QuizStateRepository>,
    config: QuizConfig,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<Catalog>, quiz: Arc<dyn QuizStateRepository>) -> Self {
        Self {
            clock,
            catalog,
            quiz,
            config: QuizConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: QuizConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> QuizConfig {
        self.config
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Opens the quiz, resuming saved progress when it fits the catalog.
    ///
    /// A quiz whose last answer was stored but whose completion was never
    /// written is finished here before a fresh quiz is returned.
    pub async fn start_quiz(&self) -> QuizSession {
        let progress = match self.quiz.load_progress().await {
            Ok(progress) => progress,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load progress, starting fresh");
                None
            }
        };
        if let Some(progress) = progress.as_ref() {
            self.finish_interrupted(progress).await;
        }
        let session = QuizSession::resume(self.catalog(), progress);
        tracing::debug!(index = session.current_index(), "quiz started");
        session
    }

    /// Records a decision on the current question and persists the new progress
    /// before returning, so a reload during the transition resumes past it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Deck` if a decision is already in flight or the quiz
    /// is not on an active question.
    pub async fn decide(
        &self,
        session: &mut QuizSession,
        direction: SwipeDirection,
    ) -> Result<DecisionOutcome, QuizError> {
        let (decision, selected_new_talent) = session.decide(direction, self.clock.now())?;
        tracing::info!(
            question_id = %decision.event.question().id,
            direction = direction.as_str(),
            "question swiped"
        );

        let progress_saved = match self.quiz.save_progress(&decision.progress).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "failed to save progress");
                false
            }
        };

        Ok(DecisionOutcome {
            event: decision.event,
            transition: decision.transition,
            selected_new_talent,
            progress_saved,
        })
    }

    /// Sleeps for the configured transition delay.
    pub async fn wait_transition(&self) {
        tokio::time::sleep(self.config.transition_delay).await;
    }

    /// Finishes a pending transition. On the last question this runs the
    /// completion side effect: results are written only when talents were
    /// selected, the completion marker always.
    pub async fn settle(
        &self,
        session: &mut QuizSession,
        transition: PendingTransition,
    ) -> SettleOutcome {
        match session.settle(transition) {
            Settled::Advanced(index) => SettleOutcome::Advanced(index),
            Settled::Stale => {
                tracing::debug!(index = transition.index(), "dropping stale transition");
                SettleOutcome::Stale
            }
            Settled::AllProcessed => {
                let report = self.finalize(session.selected_talents()).await;
                if let Err(err) = session.mark_completed() {
                    tracing::warn!(error = %err, "quiz completion out of order");
                }
                tracing::info!(talents = report.talent_count, "all questions processed");
                SettleOutcome::Completed(report)
            }
        }
    }

    /// Runs the completion write for progress that answered every question
    /// but has no completion marker at or after its last answer.
    async fn finish_interrupted(&self, progress: &ProgressRecord) {
        let count = self.catalog.question_count();
        if count == 0 || progress.current_index != count || progress.history.len() != count {
            return;
        }
        let Some(last_answer) = progress.history.last().map(|action| action.timestamp) else {
            return;
        };
        if self
            .last_completed()
            .await
            .is_some_and(|completed_at| completed_at >= last_answer)
        {
            return;
        }

        let selection = TalentSelection::from_history(&self.catalog, &progress.history);
        let report = self.finalize(selection.talents()).await;
        tracing::info!(
            talents = report.talent_count,
            "finished quiz interrupted during its last transition"
        );
    }

    async fn finalize(&self, talents: &[Talent]) -> CompletionReport {
        let completed_at = self.clock.now();

        let results_saved = if talents.is_empty() {
            false
        } else {
            let record = ResultsRecord::new(talents.to_vec(), completed_at);
            match self.quiz.save_results(&record).await {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to save results");
                    false
                }
            }
        };

        let marker_saved = match self.quiz.save_last_completed(completed_at).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "failed to save completion marker");
                false
            }
        };

        CompletionReport {
            completed_at,
            talent_count: talents.len(),
            results_saved,
            marker_saved,
        }
    }

    /// Clears every persisted record and returns the session to the first question.
    pub async fn restart(&self, session: &mut QuizSession) {
        if let Err(err) = self.quiz.clear_all().await {
            tracing::warn!(error = %err, "failed to clear stored quiz state");
        }
        session.reset();
        tracing::info!("quiz restarted");
    }

    /// The saved results record, if one exists and parses.
    pub async fn saved_results(&self) -> Option<ResultsRecord> {
        match self.quiz.load_results().await {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load results");
                None
            }
        }
    }

    pub async fn saved_results_info(&self) -> SavedResultsInfo {
        SavedResultsInfo::from_record(self.saved_results().await.as_ref())
    }

    pub async fn last_completed(&self) -> Option<DateTime<Utc>> {
        match self.quiz.load_last_completed().await {
            Ok(at) => at,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load completion marker");
                None
            }
        }
    }

    /// Opens the saved-results view. Index and history are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoSavedResults` when nothing non-empty is stored, or
    /// `QuizError::Deck` when the quiz is not on an active question.
    pub async fn view_saved_results(
        &self,
        session: &mut QuizSession,
    ) -> Result<ResultsRecord, QuizError> {
        let results = self
            .saved_results()
            .await
            .filter(|record| record.talent_count() > 0)
            .ok_or(QuizError::NoSavedResults)?;
        session.show_saved_results()?;
        Ok(results)
    }

    /// # Errors
    ///
    /// Returns `QuizError::Deck` if the saved-results view is not open.
    pub fn return_to_quiz(&self, session: &mut QuizSession) -> Result<(), QuizError> {
        session.return_to_quiz()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::{KeyValueStore, Storage, StorageError};
    use talents_core::deck::DeckPhase;
    use talents_core::time::{fixed_clock, fixed_now};

    fn service(storage: &Storage) -> QuizLoopService {
        QuizLoopService::new(
            fixed_clock(),
            Arc::new(Catalog::builtin()),
            Arc::clone(&storage.quiz),
        )
    }

    #[tokio::test]
    async fn decision_persists_progress_before_settle() {
        let storage = Storage::in_memory();
        let svc = service(&storage);
        let mut session = svc.start_quiz().await;

        let outcome = svc.decide(&mut session, SwipeDirection::Right).await.unwrap();
        assert!(outcome.progress_saved);
        assert!(outcome.selected_new_talent);

        let saved = storage.quiz.load_progress().await.unwrap().unwrap();
        assert_eq!(saved.current_index, 1);
        assert_eq!(saved.history.len(), 1);
        assert_eq!(session.phase(), DeckPhase::Transitioning(0));
    }

    #[tokio::test]
    async fn rapid_second_decision_is_rejected() {
        let storage = Storage::in_memory();
        let svc = service(&storage);
        let mut session = svc.start_quiz().await;

        svc.decide(&mut session, SwipeDirection::Left).await.unwrap();
        let err = svc
            .decide(&mut session, SwipeDirection::Left)
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::Deck(_)));
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn settle_after_restart_is_stale() {
        let storage = Storage::in_memory();
        let svc = service(&storage);
        let mut session = svc.start_quiz().await;

        let outcome = svc.decide(&mut session, SwipeDirection::Right).await.unwrap();
        svc.restart(&mut session).await;
        let settled = svc.settle(&mut session, outcome.transition).await;
        assert_eq!(settled, SettleOutcome::Stale);
        assert_eq!(session.phase(), DeckPhase::InProgress(0));
        assert!(storage.quiz.load_progress().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn view_saved_results_requires_non_empty_record() {
        let storage = Storage::in_memory();
        let svc = service(&storage);
        let mut session = svc.start_quiz().await;

        let err = svc.view_saved_results(&mut session).await.unwrap_err();
        assert!(matches!(err, QuizError::NoSavedResults));

        storage
            .quiz
            .save_results(&ResultsRecord::new(Vec::new(), fixed_now()))
            .await
            .unwrap();
        assert!(svc.view_saved_results(&mut session).await.is_err());
        assert_eq!(session.phase(), DeckPhase::InProgress(0));
    }

    struct FailingStore;

    #[async_trait::async_trait]
    impl KeyValueStore for FailingStore {
        async fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Connection("offline".into()))
        }

        async fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::QuotaExceeded)
        }

        async fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("offline".into()))
        }
    }

    #[tokio::test]
    async fn storage_failures_never_block_the_quiz() {
        let storage = Storage::from_store(Arc::new(FailingStore));
        let svc = service(&storage);
        let mut session = svc.start_quiz().await;
        assert_eq!(session.phase(), DeckPhase::InProgress(0));

        let mut last = None;
        for _ in 0..session.question_count() {
            let outcome = svc.decide(&mut session, SwipeDirection::Right).await.unwrap();
            assert!(!outcome.progress_saved);
            last = Some(svc.settle(&mut session, outcome.transition).await);
        }

        let Some(SettleOutcome::Completed(report)) = last else {
            panic!("quiz did not complete: {last:?}");
        };
        assert_eq!(report.talent_count, 8);
        assert!(!report.results_saved);
        assert!(!report.marker_saved);
        assert!(session.is_complete());
        assert_eq!(session.selected_talents().len(), 8);

        assert!(svc.saved_results().await.is_none());
        assert!(svc.last_completed().await.is_none());
        svc.restart(&mut session).await;
        assert_eq!(session.phase(), DeckPhase::InProgress(0));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_transition_uses_configured_delay() {
        let storage = Storage::in_memory();
        let delay = std::time::Duration::from_millis(300);
        let svc = service(&storage).with_config(QuizConfig::default().with_transition_delay(delay));
        let started = tokio::time::Instant::now();
        svc.wait_transition().await;
        assert!(started.elapsed() >= delay);
    }
}
