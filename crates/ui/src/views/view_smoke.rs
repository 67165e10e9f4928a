use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dioxus::prelude::ReadableExt;
use storage::local::RESULTS_KEY;
use storage::repository::{InMemoryStore, KeyValueStore, Storage, StorageError};
use talents_core::gesture::{InputSource, Point};
use talents_core::model::{
    Catalog, ProgressRecord, ResultsRecord, SwipeAction, SwipeDirection,
};
use talents_core::time::fixed_now;
use tokio::sync::Notify;

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};
use crate::vm::{QuizIntent, QuizScreen};

#[tokio::test(flavor = "current_thread")]
async fn welcome_view_smoke_renders_entry_points() {
    let mut harness = setup_view_harness(ViewKind::Welcome);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("KSA Oost-Vlaanderen"), "missing brand in {html}");
    assert!(html.contains("Start met Ontdekken"), "missing start button in {html}");
    assert!(html.contains("Bekijk Alle Talenten"), "missing overview button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn overview_view_smoke_lists_every_talent() {
    let mut harness = setup_view_harness(ViewKind::Overview);
    harness.rebuild();
    let html = harness.render();
    for talent in Catalog::builtin().talents() {
        assert!(html.contains(&talent.title), "missing {} in {html}", talent.title);
    }
    assert!(html.contains("8 talenten om te ontdekken"), "missing footer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn discover_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Discover);
    harness.rebuild();
    harness.settle_tasks().await;
    let html = harness.render();
    assert!(html.contains("Vraag 1 van 8"), "missing counter in {html}");
    assert!(
        html.contains("Neem je graag de leiding tijdens groepsactiviteiten?"),
        "missing question in {html}"
    );
    assert!(!html.contains("Bekijk Mijn Vorige Resultaten"), "unexpected banner in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn discover_view_smoke_resumes_saved_progress() {
    let storage = Storage::in_memory();
    let questions = Catalog::builtin().questions().to_vec();
    let history = questions[..3]
        .iter()
        .map(|q| SwipeAction::new(q.clone(), SwipeDirection::Left, fixed_now()))
        .collect();
    storage
        .quiz
        .save_progress(&ProgressRecord::new(3, history))
        .await
        .unwrap();

    let mut harness = setup_view_harness_with_storage(ViewKind::Discover, storage);
    harness.rebuild();
    harness.settle_tasks().await;
    let html = harness.render();
    assert!(html.contains("Vraag 4 van 8"), "missing resumed counter in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn discover_view_smoke_offers_saved_results() {
    let storage = Storage::in_memory();
    let talents = Catalog::builtin().talents()[..3].to_vec();
    storage
        .quiz
        .save_results(&ResultsRecord::new(talents, fixed_now()))
        .await
        .unwrap();

    let mut harness = setup_view_harness_with_storage(ViewKind::Discover, storage);
    harness.rebuild();
    harness.settle_tasks().await;
    let html = harness.render();
    assert!(html.contains("Bekijk Mijn Vorige Resultaten"), "missing banner in {html}");
    assert!(html.contains("3 talenten gevonden"), "missing count in {html}");

    harness.handles().dispatch().call(QuizIntent::ViewSavedResults);
    harness.settle_tasks().await;
    let html = harness.render();
    assert!(html.contains("Jouw Opgeslagen Resultaten"), "missing saved title in {html}");
    assert!(html.contains("Terug naar Vragenlijst"), "missing return button in {html}");
    assert!(html.contains("3 van de 8 talenten"), "missing profile summary in {html}");

    harness.handles().dispatch().call(QuizIntent::ReturnToQuiz);
    harness.settle_tasks().await;
    assert!(harness.render().contains("Vraag 1 van 8"));
}

#[tokio::test(flavor = "current_thread")]
async fn discover_view_smoke_swipes_through_to_results() {
    let mut harness = setup_view_harness(ViewKind::Discover);
    harness.rebuild();
    harness.settle_tasks().await;

    for index in 0..8 {
        let direction = if index == 0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        };
        harness.handles().dispatch().call(QuizIntent::Swipe(direction));
        harness.settle_tasks().await;
    }

    let screen = harness
        .handles()
        .vm()
        .read()
        .as_ref()
        .map(crate::vm::QuizVm::screen);
    assert_eq!(screen, Some(QuizScreen::Results));
    let html = harness.render();
    assert!(html.contains("Jouw Geselecteerde Talenten"), "missing results title in {html}");
    assert!(html.contains("Leiderschap"), "missing selected talent in {html}");
    assert!(html.contains("1 van de 8 talenten"), "missing summary in {html}");

    let stored = harness.storage.local.get_item(RESULTS_KEY).await.unwrap();
    assert!(stored.is_some(), "results were not persisted");

    harness.handles().dispatch().call(QuizIntent::Restart);
    harness.settle_tasks().await;
    assert!(harness.render().contains("Vraag 1 van 8"));
    assert!(harness.storage.local.get_item(RESULTS_KEY).await.unwrap().is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn discover_view_drag_released_off_the_card_still_swipes() {
    let mut harness = setup_view_harness(ViewKind::Discover);
    harness.rebuild();
    harness.settle_tasks().await;
    let capture = harness.handles().capture();

    capture.begin(InputSource::Mouse, Point::new(200.0, 300.0));
    // Released over the bottom navigation, far outside the page column.
    capture.track(InputSource::Mouse, Point::new(-420.0, 900.0));
    capture.finish(InputSource::Mouse);
    harness.settle_tasks().await;

    let html = harness.render();
    assert!(html.contains("Vraag 2 van 8"), "drag did not swipe in {html}");
    let progress = harness
        .storage
        .quiz
        .load_progress()
        .await
        .unwrap()
        .expect("progress stored");
    assert_eq!(progress.history[0].direction, SwipeDirection::Left);

    // Leaving the window drops the drag, so the next release is not a swipe.
    capture.begin(InputSource::Mouse, Point::new(200.0, 300.0));
    capture.track(InputSource::Mouse, Point::new(700.0, 300.0));
    capture.cancel();
    capture.finish(InputSource::Mouse);
    harness.settle_tasks().await;
    assert!(harness.render().contains("Vraag 2 van 8"));
}

/// Holds writes until released, so a test can look at the page mid-save.
#[derive(Clone, Default)]
struct GatedStore {
    inner: InMemoryStore,
    held: Arc<AtomicBool>,
    gate: Arc<Notify>,
}

impl GatedStore {
    fn hold(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    fn release(&self) {
        self.held.store(false, Ordering::SeqCst);
        self.gate.notify_one();
    }
}

#[async_trait]
impl KeyValueStore for GatedStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.held.load(Ordering::SeqCst) {
            self.gate.notified().await;
        }
        self.inner.set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key).await
    }
}

#[tokio::test(flavor = "current_thread")]
async fn discover_view_keeps_the_card_while_a_swipe_is_saved() {
    let store = GatedStore::default();
    let storage = Storage::from_store(Arc::new(store.clone()));
    let mut harness = setup_view_harness_with_storage(ViewKind::Discover, storage);
    harness.rebuild();
    harness.settle_tasks().await;

    store.hold();
    harness
        .handles()
        .dispatch()
        .call(QuizIntent::Swipe(SwipeDirection::Right));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Vraag 1 van 8"), "card gone while saving in {html}");
    assert!(!html.contains("Laden..."), "loading placeholder while saving in {html}");

    store.release();
    harness.settle_tasks().await;
    assert!(harness.render().contains("Vraag 2 van 8"));
}

#[tokio::test(flavor = "current_thread")]
async fn discover_view_ignores_saved_results_intent_without_results() {
    let mut harness = setup_view_harness(ViewKind::Discover);
    harness.rebuild();
    harness.settle_tasks().await;

    harness.handles().dispatch().call(QuizIntent::ViewSavedResults);
    harness.settle_tasks().await;

    let html = harness.render();
    assert!(!html.contains("Er ging iets mis"), "error shown in {html}");
    assert!(!html.contains("role=\"alert\""), "alert shown in {html}");
    assert!(html.contains("Vraag 1 van 8"), "left the question screen in {html}");
}
