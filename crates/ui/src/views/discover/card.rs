use dioxus::prelude::*;
use talents_core::gesture::InputSource;

use crate::views::drag::{DragCapture, mouse_point, touch_point};

/// Card that follows the pointer while dragged.
///
/// Only drag starts are handled here; the surrounding [`DragCapture`] surface
/// owns move and release so the drag keeps tracking after the pointer leaves
/// the card.
#[component]
pub(super) fn SwipeableCard(disabled: bool, children: Element) -> Element {
    let capture = use_context::<DragCapture>();
    let (dragging, feedback) = {
        let detector = capture.detector();
        let detector = detector.read();
        (detector.is_dragging(), detector.feedback())
    };
    let style = if dragging {
        format!(
            "transform: {}; opacity: {:.2}; will-change: transform;",
            feedback.css_transform(),
            feedback.opacity()
        )
    } else {
        "transform: translate(0px, 0px) rotate(0deg); opacity: 1;".to_string()
    };
    let class = match (dragging, disabled) {
        (true, _) => "swipe-card dragging",
        (false, true) => "swipe-card disabled",
        (false, false) => "swipe-card",
    };

    rsx! {
        div {
            class,
            style,
            onmousedown: move |evt: MouseEvent| {
                evt.prevent_default();
                capture.begin(InputSource::Mouse, mouse_point(&evt));
            },
            ontouchstart: move |evt: TouchEvent| {
                evt.prevent_default();
                if let Some(at) = touch_point(&evt) {
                    capture.begin(InputSource::Touch, at);
                }
            },
            {children}
        }
    }
}
