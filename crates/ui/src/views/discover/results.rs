use dioxus::prelude::*;

use crate::vm::TalentCardVm;

#[derive(Clone, Debug, PartialEq)]
pub(super) struct ResultsData {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub cards: Vec<TalentCardVm>,
    pub summary: Option<String>,
    pub saved_date: Option<String>,
    pub answers: String,
    pub can_return: bool,
}

#[component]
pub(super) fn ResultsPanel(
    data: ResultsData,
    on_return: EventHandler<()>,
    on_restart: EventHandler<()>,
    on_overview: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "results",
            div { class: "results-header",
                div { class: "emoji", "🎯" }
                h2 { "{data.title}" }
                p { class: "muted", "{data.subtitle}" }
                if let Some(date) = data.saved_date.as_deref() {
                    p { class: "muted small", "{date}" }
                }
            }

            if data.cards.is_empty() {
                div { class: "results-empty",
                    div { class: "emoji", "🤷" }
                    h3 { "Geen talenten gevonden" }
                    p { class: "muted",
                        "Je hebt geen talenten geselecteerd tijdens de vragenlijst. Probeer opnieuw en antwoord \"Ja\" op vragen die bij jou passen."
                    }
                    p { class: "muted small", "{data.answers}" }
                }
            } else {
                ul { class: "results-list",
                    for card in data.cards.iter() {
                        li {
                            key: "{card.id}",
                            class: "result-card ksa-card",
                            style: "border-left: 4px solid {card.color};",
                            h3 { style: "color: {card.color};", "{card.title}" }
                            p { class: "muted", "{card.description}" }
                        }
                    }
                }
            }

            if let Some(summary) = data.summary.as_deref() {
                div { class: "profile-summary",
                    h3 { "📊 Jouw Talent Profiel" }
                    p { class: "muted",
                        "Je hebt "
                        strong { "{summary}" }
                        " als sterk punt geïdentificeerd"
                    }
                }
            }

            div { class: "actions",
                if data.can_return {
                    button {
                        class: "ksa-button-secondary",
                        id: "results-return",
                        onclick: move |_| on_return.call(()),
                        "↩️ Terug naar Vragenlijst"
                    }
                }
                button {
                    class: "ksa-button",
                    id: "results-restart",
                    onclick: move |_| on_restart.call(()),
                    "🔄 Vragenlijst Opnieuw Doen"
                }
                button {
                    class: "ksa-button-secondary",
                    id: "results-overview",
                    onclick: move |_| on_overview.call(()),
                    "📋 Alle Talenten Bekijken"
                }
            }
        }
    }
}
