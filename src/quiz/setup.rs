use crate::models::{Difficulty, QuizConfig};
use crate::quiz::FeedbackMode;

pub const QUESTION_COUNTS: [u32; 4] = [5, 10, 15, 20];
pub const DEFAULT_COUNT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("Please enter a topic")]
    EmptyTopic,
    #[error("A quiz is already being generated")]
    RequestInFlight,
    #[error("{0} is not a supported question count")]
    UnsupportedCount(u32),
}

/// The setup form: topic, count, difficulty and feedback mode.
#[derive(Debug, Clone)]
pub struct QuizSetup {
    topic: String,
    count: u32,
    difficulty: Difficulty,
    mode: FeedbackMode,
    loading: bool,
}

impl Default for QuizSetup {
    fn default() -> Self {
        QuizSetup {
            topic: String::new(),
            count: DEFAULT_COUNT,
            difficulty: Difficulty::default(),
            mode: FeedbackMode::default(),
            loading: false,
        }
    }
}

impl QuizSetup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mode(&self) -> FeedbackMode {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn select_count(&mut self, count: u32) -> Result<(), SetupError> {
        if !QUESTION_COUNTS.contains(&count) {
            return Err(SetupError::UnsupportedCount(count));
        }
        self.count = count;
        Ok(())
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn select_mode(&mut self, mode: FeedbackMode) {
        self.mode = mode;
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && !self.topic.trim().is_empty()
    }

    /// Emits the configuration and marks a request as in flight.
    pub fn submit(&mut self) -> Result<QuizConfig, SetupError> {
        if self.loading {
            return Err(SetupError::RequestInFlight);
        }
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(SetupError::EmptyTopic);
        }
        let config = QuizConfig {
            topic: topic.to_string(),
            count: self.count,
            difficulty: self.difficulty,
        };
        self.loading = true;
        Ok(config)
    }

    pub fn finish_loading(&mut self) {
        self.loading = false;
    }
}
