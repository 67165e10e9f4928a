use chrono::Local;
use services::{QuizError, QuizLoopService, QuizSession, SettleOutcome};
use talents_core::deck::{DeckPhase, PendingTransition};
use talents_core::model::{ResultsRecord, SavedResultsInfo, SwipeDirection, Talent};

use crate::vm::talent_vm::{TalentCardVm, map_talent_cards, talent_count_label};
use crate::vm::time_fmt::format_saved_date;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Swipe(SwipeDirection),
    ViewSavedResults,
    ReturnToQuiz,
    Restart,
}

/// Which screen the discover page shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    Question,
    Results,
    SavedResults,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DotState {
    Answered,
    Current,
    Upcoming,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Continue,
    Completed { talent_count: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedBannerVm {
    pub count_label: String,
    pub aria_label: String,
}

#[derive(Clone)]
pub struct QuizVm {
    session: QuizSession,
    saved: SavedResultsInfo,
    shown_results: Option<ResultsRecord>,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession, saved: SavedResultsInfo) -> Self {
        Self {
            session,
            saved,
            shown_results: None,
        }
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreen {
        match self.session.phase() {
            DeckPhase::InProgress(_) | DeckPhase::Transitioning(_) => QuizScreen::Question,
            DeckPhase::AwaitingCompletion | DeckPhase::Completed => QuizScreen::Results,
            DeckPhase::ShowingSavedResults(_) => QuizScreen::SavedResults,
        }
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.session.is_transitioning()
    }

    #[must_use]
    pub fn question_text(&self) -> Option<&str> {
        self.session.current_question().map(|q| q.text.as_str())
    }

    #[must_use]
    pub fn question_color(&self) -> &str {
        self.session
            .current_question()
            .map_or(talents_core::model::DEFAULT_ACCENT, |q| q.display_color())
    }

    #[must_use]
    pub fn counter_label(&self) -> String {
        format!(
            "Vraag {} van {}",
            self.session.current_index() + 1,
            self.session.question_count()
        )
    }

    #[must_use]
    pub fn progress_dots(&self) -> Vec<DotState> {
        let current = self.session.current_index();
        (0..self.session.question_count())
            .map(|index| match index.cmp(&current) {
                std::cmp::Ordering::Less => DotState::Answered,
                std::cmp::Ordering::Equal => DotState::Current,
                std::cmp::Ordering::Greater => DotState::Upcoming,
            })
            .collect()
    }

    /// Banner offering the previous results; only on the question screen.
    #[must_use]
    pub fn saved_banner(&self) -> Option<SavedBannerVm> {
        if self.screen() != QuizScreen::Question || !self.saved.has_saved_results {
            return None;
        }
        let count = self.saved.talent_count;
        Some(SavedBannerVm {
            count_label: format!("{} gevonden", talent_count_label(count)),
            aria_label: format!("Bekijk vorige resultaten met {count} gevonden talenten"),
        })
    }

    fn result_source(&self) -> &[Talent] {
        match (&self.shown_results, self.screen()) {
            (Some(record), QuizScreen::SavedResults) => &record.talents,
            _ => self.session.selected_talents(),
        }
    }

    #[must_use]
    pub fn result_cards(&self) -> Vec<TalentCardVm> {
        map_talent_cards(self.result_source())
    }

    #[must_use]
    pub fn results_title(&self) -> &'static str {
        if self.screen() == QuizScreen::SavedResults {
            "Jouw Opgeslagen Resultaten"
        } else {
            "Jouw Geselecteerde Talenten"
        }
    }

    #[must_use]
    pub fn results_subtitle(&self) -> &'static str {
        if self.screen() == QuizScreen::SavedResults {
            "Dit zijn je eerder opgeslagen resultaten"
        } else {
            "Dit zijn de talenten die bij jou passen op basis van de vragenlijst"
        }
    }

    /// "3 van de 8 talenten", or `None` when nothing was selected.
    #[must_use]
    pub fn profile_summary(&self) -> Option<String> {
        let count = self.result_source().len();
        (count > 0).then(|| {
            format!(
                "{count} van de {} talenten",
                self.session.catalog().talent_count()
            )
        })
    }

    #[must_use]
    pub fn saved_date_label(&self) -> Option<String> {
        if self.screen() != QuizScreen::SavedResults {
            return None;
        }
        self.shown_results
            .as_ref()
            .and_then(ResultsRecord::saved_at)
            .map(|at| format!("Opgeslagen op {}", format_saved_date(&at.with_timezone(&Local))))
    }

    #[must_use]
    pub fn answers_label(&self) -> String {
        let progress = self.session.progress();
        format!(
            "Jouw antwoorden: {} van {} vragen",
            progress.right_count, progress.answered
        )
    }

    /// Records a swipe. The caller waits out the transition and then calls [`Self::settle`].
    ///
    /// Returns `None` when the quiz is not accepting decisions.
    pub async fn swipe(
        &mut self,
        quiz_loop: &QuizLoopService,
        direction: SwipeDirection,
    ) -> Option<PendingTransition> {
        match quiz_loop.decide(&mut self.session, direction).await {
            Ok(outcome) => Some(outcome.transition),
            Err(err) => {
                ignore_rejected("swipe", &err);
                None
            }
        }
    }

    pub async fn settle(
        &mut self,
        quiz_loop: &QuizLoopService,
        transition: PendingTransition,
    ) -> QuizOutcome {
        match quiz_loop.settle(&mut self.session, transition).await {
            SettleOutcome::Completed(report) => {
                self.saved = quiz_loop.saved_results_info().await;
                QuizOutcome::Completed {
                    talent_count: report.talent_count,
                }
            }
            SettleOutcome::Advanced(_) | SettleOutcome::Stale => QuizOutcome::Continue,
        }
    }

    /// Opens the stored results. Stays on the current screen if there are none.
    pub async fn view_saved_results(&mut self, quiz_loop: &QuizLoopService) {
        match quiz_loop.view_saved_results(&mut self.session).await {
            Ok(record) => self.shown_results = Some(record),
            Err(err) => ignore_rejected("view saved results", &err),
        }
    }

    pub fn return_to_quiz(&mut self, quiz_loop: &QuizLoopService) {
        match quiz_loop.return_to_quiz(&mut self.session) {
            Ok(()) => self.shown_results = None,
            Err(err) => ignore_rejected("return to quiz", &err),
        }
    }

    pub async fn restart(&mut self, quiz_loop: &QuizLoopService) {
        quiz_loop.restart(&mut self.session).await;
        self.shown_results = None;
        self.saved = quiz_loop.saved_results_info().await;
    }
}

// Rejections come from intents racing a transition or a restart; the screen
// already reflects the state that won.
fn ignore_rejected(intent: &'static str, err: &QuizError) {
    tracing::debug!(intent, error = %err, "quiz intent rejected");
}

/// Opens the quiz where the user left off, with the saved-results banner state.
pub async fn start_quiz(quiz_loop: &QuizLoopService) -> QuizVm {
    let session = quiz_loop.start_quiz().await;
    let saved = quiz_loop.saved_results_info().await;
    QuizVm::new(session, saved)
}
