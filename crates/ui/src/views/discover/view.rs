use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use talents_core::model::SwipeDirection;

use super::card::SwipeableCard;
use super::results::{ResultsData, ResultsPanel};
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::drag::DragCapture;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DotState, QuizIntent, QuizOutcome, QuizScreen, QuizVm, start_quiz};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const BUSY_POLL: Duration = Duration::from_millis(10);

fn dot_class(state: DotState) -> &'static str {
    match state {
        DotState::Answered => "dot answered",
        DotState::Current => "dot current",
        DotState::Upcoming => "dot",
    }
}

fn results_data(vm: &QuizVm) -> ResultsData {
    ResultsData {
        title: vm.results_title(),
        subtitle: vm.results_subtitle(),
        cards: vm.result_cards(),
        summary: vm.profile_summary(),
        saved_date: vm.saved_date_label(),
        answers: vm.answers_label(),
        can_return: vm.screen() == QuizScreen::SavedResults,
    }
}

/// Copy of the quiz to run an intent on. The signal keeps the current screen
/// rendered until the copy is stored back.
fn snapshot(vm: Signal<Option<QuizVm>>) -> Option<QuizVm> {
    vm.peek().clone()
}

#[component]
pub fn DiscoverView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_loop = ctx.quiz_loop();
    let capture = use_context::<DragCapture>();

    let error = use_signal(|| None::<ViewError>);
    let vm = use_signal(|| None::<QuizVm>);
    // An intent is awaiting storage; further input waits for it.
    let busy = use_signal(|| false);

    let quiz_loop_for_resource = quiz_loop.clone();
    let resource = use_resource(move || {
        let quiz_loop = quiz_loop_for_resource.clone();
        let mut vm = vm;
        async move {
            let started = start_quiz(&quiz_loop).await;
            vm.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    use_effect(move || {
        let locked = busy() || vm.read().as_ref().is_none_or(QuizVm::is_transitioning);
        let mut detector = capture.detector();
        if detector.peek().is_disabled() != locked {
            detector.write().set_disabled(locked);
        }
    });

    let dispatch_intent = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |intent: QuizIntent| {
            let mut error = error;
            let mut vm = vm;
            let mut busy = busy;
            if *busy.peek() {
                tracing::debug!(?intent, "ignoring intent while busy");
                return;
            }

            match intent {
                QuizIntent::ReturnToQuiz => {
                    if let Some(quiz) = vm.write().as_mut() {
                        quiz.return_to_quiz(&quiz_loop);
                    } else {
                        error.set(Some(ViewError::Unknown));
                    }
                }
                QuizIntent::Swipe(direction) => {
                    let Some(mut quiz) = snapshot(vm) else {
                        error.set(Some(ViewError::Unknown));
                        return;
                    };
                    busy.set(true);
                    let quiz_loop = quiz_loop.clone();
                    spawn(async move {
                        let transition = quiz.swipe(&quiz_loop, direction).await;
                        vm.set(Some(quiz));
                        busy.set(false);
                        let Some(transition) = transition else {
                            return;
                        };

                        quiz_loop.wait_transition().await;

                        // A restart or saved-results intent may still be writing.
                        while *busy.peek() {
                            tokio::time::sleep(BUSY_POLL).await;
                        }
                        let Some(mut quiz) = snapshot(vm) else {
                            tracing::warn!("quiz unavailable when settling transition");
                            return;
                        };
                        busy.set(true);
                        let outcome = quiz.settle(&quiz_loop, transition).await;
                        vm.set(Some(quiz));
                        busy.set(false);
                        if let QuizOutcome::Completed { talent_count } = outcome {
                            tracing::info!(talent_count, "quiz finished");
                        }
                    });
                }
                QuizIntent::ViewSavedResults | QuizIntent::Restart => {
                    let Some(mut quiz) = snapshot(vm) else {
                        error.set(Some(ViewError::Unknown));
                        return;
                    };
                    busy.set(true);
                    let quiz_loop = quiz_loop.clone();
                    spawn(async move {
                        if intent == QuizIntent::Restart {
                            quiz.restart(&quiz_loop).await;
                        } else {
                            quiz.view_saved_results(&quiz_loop).await;
                        }
                        vm.set(Some(quiz));
                        busy.set(false);
                    });
                }
            }
        })
    };

    let on_swipe = use_callback(move |direction: SwipeDirection| {
        dispatch_intent.call(QuizIntent::Swipe(direction));
    });
    use_hook(move || capture.attach(on_swipe));
    use_drop(move || capture.detach());

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<DiscoverTestHandles>() {
                handles.register(dispatch_intent, vm, capture);
            }
        }
    }

    let on_overview = use_callback(move |()| {
        navigator.push(Route::Overview {});
    });
    let retry = use_callback(move |()| {
        let mut error = error;
        let mut resource = resource;
        error.set(None);
        resource.restart();
    });

    let locked = busy() || vm.read().as_ref().is_none_or(QuizVm::is_transitioning);
    let error_message = error().map(ViewError::message);

    let vm_guard = vm.read();
    let body = match (state, vm_guard.as_ref()) {
        (ViewState::Error(err), _) => rsx! {
            p { "{err.message()}" }
            button { class: "ksa-button", onclick: move |_| retry.call(()), "Opnieuw proberen" }
        },
        (ViewState::Ready(()), Some(quiz)) if quiz.screen() != QuizScreen::Question => rsx! {
            ResultsPanel {
                data: results_data(quiz),
                on_return: move |()| dispatch_intent.call(QuizIntent::ReturnToQuiz),
                on_restart: move |()| dispatch_intent.call(QuizIntent::Restart),
                on_overview: move |()| on_overview.call(()),
            }
        },
        (ViewState::Ready(()), Some(quiz)) => {
            let banner = quiz.saved_banner();
            let question = quiz.question_text().unwrap_or_default().to_string();
            let color = quiz.question_color().to_string();
            let dots = quiz.progress_dots();
            let counter = quiz.counter_label();
            rsx! {
                if let Some(banner) = banner {
                    div { class: "saved-banner",
                        p { class: "notice", "Je hebt al een keer de vragenlijst ingevuld!" }
                        button {
                            class: "saved-button",
                            id: "discover-saved-results",
                            aria_label: "{banner.aria_label}",
                            disabled: locked,
                            onclick: move |_| dispatch_intent.call(QuizIntent::ViewSavedResults),
                            span { "📊 Bekijk Mijn Vorige Resultaten" }
                            span { class: "small", "{banner.count_label}" }
                        }
                    }
                }
                div { class: "card-stage",
                    SwipeableCard { disabled: locked,
                        div { class: "question-card", style: "background: {color};",
                            div { class: "question-body",
                                div { class: "emoji", "🤔" }
                                h3 { "{question}" }
                                p { class: "hint", "Swipe naar rechts voor \"Ja\" of naar links voor \"Nee\"" }
                            }
                            div { class: "question-actions",
                                button {
                                    id: "discover-no",
                                    disabled: locked,
                                    onclick: move |_| dispatch_intent.call(QuizIntent::Swipe(SwipeDirection::Left)),
                                    "👎 Nee"
                                }
                                button {
                                    id: "discover-yes",
                                    disabled: locked,
                                    onclick: move |_| dispatch_intent.call(QuizIntent::Swipe(SwipeDirection::Right)),
                                    "👍 Ja"
                                }
                            }
                        }
                    }
                }
                div { class: "progress-dots",
                    for (index, dot) in dots.into_iter().enumerate() {
                        span { key: "{index}", class: dot_class(dot) }
                    }
                }
                p { class: "counter", "{counter}" }
            }
        }
        _ => rsx! {
            p { class: "muted", "Laden..." }
        },
    };
    drop(vm_guard);

    rsx! {
        div { class: "page discover",
            if let Some(message) = error_message {
                p { class: "alert", role: "alert", "{message}" }
            }
            {body}
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct DiscoverTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
    capture: Rc<RefCell<Option<DragCapture>>>,
}

#[cfg(test)]
impl DiscoverTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<QuizIntent>,
        vm: Signal<Option<QuizVm>>,
        capture: DragCapture,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
        *self.capture.borrow_mut() = Some(capture);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("discover dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("discover vm registered")
    }

    pub(crate) fn capture(&self) -> DragCapture {
        (*self.capture.borrow()).expect("drag capture registered")
    }
}
