/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub current_index: usize,
    pub right_count: usize,
    pub is_complete: bool,
}

impl QuizProgress {
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.answered)
    }
}
