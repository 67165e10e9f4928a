use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, Clock, QuizConfig};
use storage::repository::Storage;
use talents_core::model::Catalog;
use talents_core::time::fixed_now;

use crate::context::{UiApp, build_app_context};
use crate::views::discover::DiscoverTestHandles;
use crate::views::{DiscoverView, DragSurface, OverviewView, WelcomeView};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Welcome,
    Discover,
    Overview,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
    discover_handles: Option<DiscoverTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.discover_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    let page = match view {
        ViewKind::Welcome => rsx! { WelcomeView {} },
        ViewKind::Discover => rsx! { DiscoverView {} },
        ViewKind::Overview => rsx! { OverviewView {} },
    };
    rsx! {
        DragSurface { class: "app", {page} }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub discover_handles: Option<DiscoverTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drives a few rounds so chained tasks (decide, delay, settle) finish.
    pub async fn settle_tasks(&mut self) {
        for _ in 0..6 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn handles(&self) -> &DiscoverTestHandles {
        self.discover_handles
            .as_ref()
            .expect("discover handles only exist for the discover view")
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_storage(view, Storage::in_memory())
}

/// Transitions are immediate here so tests need not wait out the card animation.
pub fn setup_view_harness_with_storage(view: ViewKind, storage: Storage) -> ViewHarness {
    let config = QuizConfig::default().with_transition_delay(Duration::ZERO);
    let app = Arc::new(AppServices::from_storage(
        &storage,
        Clock::fixed(fixed_now()),
        Catalog::builtin(),
        config,
    ));

    let discover_handles = match view {
        ViewKind::Discover => Some(DiscoverTestHandles::default()),
        ViewKind::Welcome | ViewKind::Overview => None,
    };

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            discover_handles: discover_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        storage,
        discover_handles,
    }
}
