//! Front-end state: the setup form, the question presenter, the results
//! summary and the screen flow tying them together.

pub mod app;
pub mod results;
pub mod session;
pub mod setup;

pub use app::{QuizApp, Screen};
pub use results::{Grade, QuestionBreakdown, QuizResults};
pub use session::{Advance, Feedback, OptionState, QuizSession, SessionError};
pub use setup::{QuizSetup, SetupError, QUESTION_COUNTS};

/// Presenter variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackMode {
    /// Reveal correctness and the explanation right after each answer.
    #[default]
    Immediate,
    /// Timed questions, answers changeable until advancing, graded at the end.
    Deferred,
}

impl FeedbackMode {
    pub const ALL: [FeedbackMode; 2] = [FeedbackMode::Immediate, FeedbackMode::Deferred];

    pub fn label(&self) -> &'static str {
        match self {
            FeedbackMode::Immediate => "Instant feedback",
            FeedbackMode::Deferred => "Timed, graded at the end",
        }
    }
}

/// Letter shown next to an option: A, B, C, D.
pub fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}
