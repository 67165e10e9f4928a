use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::routes::Route;

#[component]
pub fn WelcomeView() -> Element {
    let navigator = use_navigator();

    rsx! {
        div { class: "page welcome",
            div { class: "welcome-title",
                h1 { "Welkom op de talentenpagina van" }
                h2 { class: "brand", "KSA Oost-Vlaanderen" }
            }
            div { class: "welcome-intro",
                p { class: "lead", "Ontdek hier je talenten!" }
                p { class: "muted",
                    "Swipe door verschillende talenten en ontdek welke vaardigheden bij jou passen in de scouting"
                }
            }
            div { class: "actions",
                button {
                    class: "ksa-button",
                    id: "welcome-start",
                    onclick: move |_| {
                        navigator.push(Route::Discover {});
                    },
                    "✨ Start met Ontdekken"
                }
                button {
                    class: "ksa-button-secondary",
                    id: "welcome-overview",
                    onclick: move |_| {
                        navigator.push(Route::Overview {});
                    },
                    "📋 Bekijk Alle Talenten"
                }
            }
        }
    }
}
