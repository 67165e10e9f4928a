use dioxus::prelude::*;
use talents_core::gesture::{GestureDetector, GestureOutcome, InputSource, Point};
use talents_core::model::SwipeDirection;

use crate::context::AppContext;

pub(crate) fn mouse_point(evt: &MouseEvent) -> Point {
    let at = evt.client_coordinates();
    Point::new(at.x, at.y)
}

pub(crate) fn touch_point(evt: &TouchEvent) -> Option<Point> {
    evt.touches().first().map(|touch| {
        let at = touch.client_coordinates();
        Point::new(at.x, at.y)
    })
}

/// Forwards a move to the active drag. Returns whether a drag consumed it.
pub(crate) fn track_move(detector: &mut GestureDetector, source: InputSource, at: Point) -> bool {
    detector.is_dragging() && detector.move_to(source, at).is_some()
}

/// Ends the active drag and reports the swipe, if the release crossed the threshold.
pub(crate) fn release(detector: &mut GestureDetector, source: InputSource) -> Option<SwipeDirection> {
    if !detector.is_dragging() {
        return None;
    }
    match detector.end(source) {
        GestureOutcome::Swipe(direction) => Some(direction),
        GestureOutcome::Cancelled | GestureOutcome::Ignored => None,
    }
}

/// Window-wide drag state shared by the layout and the swipe card.
///
/// The card starts drags; moves and releases are caught on the full-window
/// surface so a drag that leaves the card, or the page column, still ends.
#[derive(Clone, Copy)]
pub(crate) struct DragCapture {
    detector: Signal<GestureDetector>,
    on_swipe: Signal<Option<Callback<SwipeDirection>>>,
}

impl DragCapture {
    fn new(threshold: f64) -> Self {
        Self {
            detector: Signal::new(GestureDetector::new(threshold)),
            on_swipe: Signal::new(None),
        }
    }

    pub(crate) fn detector(&self) -> Signal<GestureDetector> {
        self.detector
    }

    /// Routes completed swipes to `handler` until [`Self::detach`].
    pub(crate) fn attach(&self, handler: Callback<SwipeDirection>) {
        let mut on_swipe = self.on_swipe;
        on_swipe.set(Some(handler));
    }

    pub(crate) fn detach(&self) {
        let mut on_swipe = self.on_swipe;
        on_swipe.set(None);
        self.cancel();
    }

    pub(crate) fn begin(&self, source: InputSource, at: Point) {
        let mut detector = self.detector;
        detector.write().start(source, at);
    }

    pub(crate) fn track(&self, source: InputSource, at: Point) {
        // Plain pointer motion must not re-render the page.
        if !self.detector.peek().is_dragging() {
            return;
        }
        let mut detector = self.detector;
        track_move(&mut detector.write(), source, at);
    }

    pub(crate) fn finish(&self, source: InputSource) {
        if !self.detector.peek().is_dragging() {
            return;
        }
        let mut detector = self.detector;
        let swiped = release(&mut detector.write(), source);
        let handler = *self.on_swipe.peek();
        if let (Some(direction), Some(handler)) = (swiped, handler) {
            handler.call(direction);
        }
    }

    pub(crate) fn cancel(&self) {
        if self.detector.peek().is_dragging() {
            let mut detector = self.detector;
            detector.write().cancel();
        }
    }
}

/// Full-window container that owns pointer moves and releases for drags.
#[component]
pub(crate) fn DragSurface(class: &'static str, children: Element) -> Element {
    let ctx = use_context::<AppContext>();
    let threshold = ctx.config().swipe_threshold;
    let capture = use_context_provider(|| DragCapture::new(threshold));

    rsx! {
        div {
            class,
            onmousemove: move |evt: MouseEvent| capture.track(InputSource::Mouse, mouse_point(&evt)),
            onmouseup: move |_| capture.finish(InputSource::Mouse),
            onmouseleave: move |_| capture.cancel(),
            ontouchmove: move |evt: TouchEvent| {
                if let Some(at) = touch_point(&evt) {
                    capture.track(InputSource::Touch, at);
                }
            },
            ontouchend: move |_| capture.finish(InputSource::Touch),
            ontouchcancel: move |_| capture.cancel(),
            {children}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> GestureDetector {
        GestureDetector::new(50.0)
    }

    #[test]
    fn release_far_outside_the_card_still_swipes() {
        let mut detector = detector();
        detector.start(InputSource::Mouse, Point::new(200.0, 300.0));
        // Well past the card and the page column, over the bottom navigation.
        assert!(track_move(&mut detector, InputSource::Mouse, Point::new(-420.0, 900.0)));
        assert_eq!(
            release(&mut detector, InputSource::Mouse),
            Some(SwipeDirection::Left)
        );
        assert!(!detector.is_dragging());
    }

    #[test]
    fn release_ends_the_drag_even_below_threshold() {
        let mut detector = detector();
        detector.start(InputSource::Touch, Point::new(100.0, 100.0));
        track_move(&mut detector, InputSource::Touch, Point::new(130.0, 400.0));
        assert_eq!(release(&mut detector, InputSource::Touch), None);
        assert!(!detector.is_dragging());

        // A later move and release without a new start do nothing.
        assert!(!track_move(&mut detector, InputSource::Touch, Point::new(400.0, 100.0)));
        assert_eq!(release(&mut detector, InputSource::Touch), None);
    }

    #[test]
    fn moves_from_another_source_are_ignored() {
        let mut detector = detector();
        detector.start(InputSource::Mouse, Point::new(0.0, 0.0));
        assert!(!track_move(&mut detector, InputSource::Touch, Point::new(300.0, 0.0)));
        assert_eq!(release(&mut detector, InputSource::Touch), None);
        assert!(detector.is_dragging());
        assert_eq!(release(&mut detector, InputSource::Mouse), None);
    }

    #[test]
    fn leaving_the_window_cancels_the_drag() {
        let mut detector = detector();
        detector.start(InputSource::Mouse, Point::new(0.0, 0.0));
        track_move(&mut detector, InputSource::Mouse, Point::new(180.0, 0.0));
        detector.cancel();
        assert_eq!(release(&mut detector, InputSource::Mouse), None);
    }
}
