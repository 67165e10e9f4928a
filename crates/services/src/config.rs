use std::time::Duration;

use talents_core::deck::TRANSITION_DELAY;
use talents_core::gesture::DEFAULT_SWIPE_THRESHOLD;

/// Tunables shared by the quiz services and the swipe UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizConfig {
    pub swipe_threshold: f64,
    pub transition_delay: Duration,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            transition_delay: TRANSITION_DELAY,
        }
    }
}

impl QuizConfig {
    #[must_use]
    pub fn with_swipe_threshold(mut self, threshold: f64) -> Self {
        self.swipe_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_transition_delay(mut self, delay: Duration) -> Self {
        self.transition_delay = delay;
        self
    }
}
