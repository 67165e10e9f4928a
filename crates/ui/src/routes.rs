use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{DiscoverView, DragSurface, OverviewView, WelcomeView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", WelcomeView)] Welcome {},
        #[route("/discover", DiscoverView)] Discover {},
        #[route("/overview", OverviewView)] Overview {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        DragSurface { class: "app",
            main { class: "content",
                Outlet::<Route> {}
            }
            BottomNav {}
        }
    }
}

#[component]
fn BottomNav() -> Element {
    let items = [
        (Route::Welcome {}, "🏠", "Home"),
        (Route::Discover {}, "🔍", "Ontdekken"),
        (Route::Overview {}, "📋", "Overzicht"),
    ];

    rsx! {
        nav { class: "bottom-nav",
            for (route, icon, label) in items {
                Link {
                    key: "{label}",
                    class: "nav-item",
                    active_class: "active",
                    to: route,
                    span { class: "nav-icon", "{icon}" }
                    span { class: "nav-label", "{label}" }
                }
            }
        }
    }
}
