mod quiz_vm;
mod talent_vm;
mod time_fmt;

pub use quiz_vm::{
    DotState, QuizIntent, QuizOutcome, QuizScreen, QuizVm, SavedBannerVm, start_quiz,
};
pub use talent_vm::{TalentCardVm, map_talent_cards, talent_count_label};
pub use time_fmt::format_saved_date;
