use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::{TalentCardVm, map_talent_cards, talent_count_label};

#[component]
pub fn OverviewView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let cards = map_talent_cards(catalog.talents());
    let footer = format!("{} om te ontdekken", talent_count_label(cards.len()));

    rsx! {
        div { class: "page overview",
            div { class: "page-header",
                h2 { "Alle Talenten" }
                p { class: "muted", "Ontdek alle vaardigheden die je kunt ontwikkelen bij KSA" }
            }
            div { class: "talent-grid",
                for card in cards {
                    OverviewCard { key: "{card.id}", card }
                }
            }
            p { class: "muted footer-note", "{footer}" }
        }
    }
}

#[component]
fn OverviewCard(card: TalentCardVm) -> Element {
    let talent_id = card.id;
    let title = card.title.clone();
    rsx! {
        div {
            class: "talent-tile ksa-card",
            style: "background: {card.color};",
            onclick: move |_| {
                // No detail page yet; the click is only recorded.
                tracing::info!(talent_id, title = %title, "talent opened from overview");
            },
            h3 { "{card.title}" }
            p { "{card.description}" }
        }
    }
}
