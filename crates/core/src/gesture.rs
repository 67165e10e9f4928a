//! Drag tracking that turns pointer or touch movement into a swipe decision.
//!
//! The detector is input-agnostic: the UI feeds it client coordinates from
//! mouse or touch events and reads back visual feedback while dragging and a
//! [`GestureOutcome`] on release. Only horizontal displacement decides the
//! direction; vertical movement is reported for feedback only.

use crate::model::SwipeDirection;

/// Horizontal distance a drag must exceed before it counts as a swipe.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 50.0;

const ROTATION_PER_UNIT: f64 = 0.1;
const OPACITY_FADE_DISTANCE: f64 = 200.0;
const MIN_DRAG_OPACITY: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Mouse,
    Touch,
}

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// Offset of the card from where the drag started.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragFeedback {
    pub dx: f64,
    pub dy: f64,
}

impl DragFeedback {
    pub const NEUTRAL: Self = Self { dx: 0.0, dy: 0.0 };

    /// Card tilt in degrees, proportional to horizontal offset.
    #[must_use]
    pub fn rotation_deg(&self) -> f64 {
        self.dx * ROTATION_PER_UNIT
    }

    /// Fades with horizontal distance but never drops below 0.7.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        (1.0 - self.dx.abs() / OPACITY_FADE_DISTANCE).max(MIN_DRAG_OPACITY)
    }

    #[must_use]
    pub fn css_transform(&self) -> String {
        format!(
            "translate({:.1}px, {:.1}px) rotate({:.2}deg)",
            self.dx,
            self.dy,
            self.rotation_deg()
        )
    }
}

/// What a release produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The drag crossed the threshold.
    Swipe(SwipeDirection),
    /// A drag ended without a decision; the card snaps back.
    Cancelled,
    /// No drag from this source was active.
    Ignored,
}

/// Maps a horizontal displacement to a direction. The threshold is exclusive.
#[must_use]
pub fn classify(dx: f64, threshold: f64) -> Option<SwipeDirection> {
    if dx.abs() > threshold {
        Some(if dx > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        })
    } else {
        None
    }
}

//
// ─── DETECTOR ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    source: InputSource,
    start: Point,
    current: Point,
}

impl ActiveDrag {
    fn feedback(&self) -> DragFeedback {
        DragFeedback {
            dx: self.current.x - self.start.x,
            dy: self.current.y - self.start.y,
        }
    }
}

/// Tracks a single drag at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureDetector {
    threshold: f64,
    disabled: bool,
    active: Option<ActiveDrag>,
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl GestureDetector {
    /// Negative or non-finite thresholds fall back to the default.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_finite() && threshold >= 0.0 {
            threshold
        } else {
            DEFAULT_SWIPE_THRESHOLD
        };
        Self {
            threshold,
            disabled: false,
            active: None,
        }
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Disabling drops any drag in progress so the card returns to neutral.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.active = None;
        }
    }

    /// Begins a drag. Returns `false` when disabled or another drag is active.
    pub fn start(&mut self, source: InputSource, at: Point) -> bool {
        if self.disabled || self.active.is_some() {
            return false;
        }
        self.active = Some(ActiveDrag {
            source,
            start: at,
            current: at,
        });
        true
    }

    /// Updates the active drag. Moves from another source are ignored.
    pub fn move_to(&mut self, source: InputSource, at: Point) -> Option<DragFeedback> {
        if self.disabled {
            return None;
        }
        let drag = self.active.as_mut().filter(|drag| drag.source == source)?;
        drag.current = at;
        Some(drag.feedback())
    }

    /// Ends the active drag and classifies its horizontal displacement.
    pub fn end(&mut self, source: InputSource) -> GestureOutcome {
        let Some(drag) = self.active else {
            return GestureOutcome::Ignored;
        };
        if drag.source != source {
            return GestureOutcome::Ignored;
        }
        self.active = None;
        if self.disabled {
            return GestureOutcome::Cancelled;
        }

        match classify(drag.feedback().dx, self.threshold) {
            Some(direction) => GestureOutcome::Swipe(direction),
            None => GestureOutcome::Cancelled,
        }
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Current offset, neutral when idle.
    #[must_use]
    pub fn feedback(&self) -> DragFeedback {
        self.active
            .as_ref()
            .map_or(DragFeedback::NEUTRAL, ActiveDrag::feedback)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
