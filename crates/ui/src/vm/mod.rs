mod session_vm;
mod time_fmt;

pub use session_vm::{
    map_current_passage, map_feedback, map_summary, FeedbackVm, PassageVm, QuestionVm, SummaryVm,
};
pub use time_fmt::format_elapsed;
