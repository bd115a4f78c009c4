use std::time::Instant;

use crate::models::Question;
use crate::quiz::results::{self, QuizResults};
use crate::quiz::FeedbackMode;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("No questions to present")]
    Empty,
    #[error("Option {0} does not exist")]
    InvalidOption(usize),
    #[error("This question has already been answered")]
    AlreadyAnswered,
    #[error("Select an answer before continuing")]
    Unanswered,
    #[error("Skipping is only available in timed mode")]
    SkipUnavailable,
    #[error("The quiz is already complete")]
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at this index.
    Next(usize),
    /// The last question was left; results are ready.
    Finished,
}

/// How an option should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionState {
    Default,
    Selected,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub is_correct: bool,
    pub correct_answer: usize,
    pub explanation: String,
}

impl Feedback {
    pub fn headline(&self) -> &'static str {
        if self.is_correct {
            "Correct!"
        } else {
            "Not quite right"
        }
    }
}

/// One run through a generated question list.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    answers: Vec<Option<usize>>,
    time_taken: Vec<Option<u64>>,
    mode: FeedbackMode,
    entered_at: Instant,
    complete: bool,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>, mode: FeedbackMode, now: Instant) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        let len = questions.len();
        Ok(QuizSession {
            questions,
            current: 0,
            answers: vec![None; len],
            time_taken: vec![None; len],
            mode,
            entered_at: now,
            complete: false,
        })
    }

    pub fn mode(&self) -> FeedbackMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn time_taken(&self) -> &[Option<u64>] {
        &self.time_taken
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// 1-based, for "Question k of N".
    pub fn question_number(&self) -> usize {
        self.current + 1
    }

    pub fn progress_percent(&self) -> u32 {
        (self.question_number() as f64 / self.len() as f64 * 100.0).round() as u32
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.len()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn selected(&self) -> Option<usize> {
        self.answers[self.current]
    }

    pub fn select(&mut self, option: usize) -> Result<(), SessionError> {
        if self.complete {
            return Err(SessionError::Complete);
        }
        if option >= self.current_question().options.len() {
            return Err(SessionError::InvalidOption(option));
        }
        if self.mode == FeedbackMode::Immediate && self.selected().is_some() {
            return Err(SessionError::AlreadyAnswered);
        }
        self.answers[self.current] = Some(option);
        Ok(())
    }

    /// Revealed once an answer is locked in; never in deferred mode.
    pub fn feedback(&self) -> Option<Feedback> {
        if self.mode != FeedbackMode::Immediate {
            return None;
        }
        let selected = self.selected()?;
        let question = self.current_question();
        Some(Feedback {
            is_correct: question.is_correct(selected),
            correct_answer: question.correct_answer,
            explanation: question.explanation.clone(),
        })
    }

    pub fn option_state(&self, option: usize) -> OptionState {
        let selected = self.selected();
        match self.mode {
            FeedbackMode::Immediate => match selected {
                None => OptionState::Default,
                Some(_) if option == self.current_question().correct_answer => OptionState::Correct,
                Some(s) if s == option => OptionState::Incorrect,
                Some(_) => OptionState::Default,
            },
            FeedbackMode::Deferred if selected == Some(option) => OptionState::Selected,
            FeedbackMode::Deferred => OptionState::Default,
        }
    }

    pub fn can_advance(&self) -> bool {
        !self.complete && (self.mode == FeedbackMode::Deferred || self.selected().is_some())
    }

    /// Label of the advance action for the current question.
    pub fn advance_label(&self) -> &'static str {
        match (self.mode, self.is_last()) {
            (_, true) => "See Results",
            (FeedbackMode::Immediate, false) => "Next Question",
            (FeedbackMode::Deferred, false) => "Continue",
        }
    }

    /// Whole seconds since the current question was shown.
    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.entered_at).as_secs()
    }

    pub fn advance(&mut self, now: Instant) -> Result<Advance, SessionError> {
        if self.complete {
            return Err(SessionError::Complete);
        }
        if !self.can_advance() {
            return Err(SessionError::Unanswered);
        }
        Ok(self.step(now))
    }

    /// Deferred mode only: drops any selection and moves on.
    pub fn skip(&mut self, now: Instant) -> Result<Advance, SessionError> {
        if self.complete {
            return Err(SessionError::Complete);
        }
        if self.mode != FeedbackMode::Deferred {
            return Err(SessionError::SkipUnavailable);
        }
        self.answers[self.current] = None;
        Ok(self.step(now))
    }

    fn step(&mut self, now: Instant) -> Advance {
        if self.mode == FeedbackMode::Deferred {
            self.time_taken[self.current] = Some(self.elapsed_secs(now));
        }
        if self.is_last() {
            self.complete = true;
            return Advance::Finished;
        }
        self.current += 1;
        self.entered_at = now;
        Advance::Next(self.current)
    }

    pub fn results(&self) -> QuizResults {
        results::summarize(&self.questions, &self.answers, &self.time_taken, self.mode)
    }
}
