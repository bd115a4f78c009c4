use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use utoipa::ToSchema;

pub const OPTIONS_PER_QUESTION: usize = 4;

/// A single multiple-choice question as produced by the AI gateway.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    /// Exactly four answer options, addressed by index.
    pub options: Vec<String>,
    /// Index into `options`, in `0..4`.
    #[serde(deserialize_with = "answer_index")]
    pub correct_answer: usize,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionError {
    #[error("expected 4 options, got {0}")]
    OptionCount(usize),
    #[error("correct answer index {0} out of range")]
    AnswerOutOfRange(usize),
}

/// The tool schema types `correctAnswer` as a JSON number, so `1.0` is as
/// valid as `1`. Fractional and negative values are rejected.
fn answer_index<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(index) = number.as_u64() {
        return usize::try_from(index).map_err(D::Error::custom);
    }
    match number.as_f64() {
        Some(value) if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 => {
            Ok(value as usize)
        }
        _ => Err(D::Error::custom(format!(
            "correctAnswer must be a non-negative integer, got {}",
            number
        ))),
    }
}

impl Question {
    /// Checks the structural invariants: four options, correct index in range.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(QuestionError::OptionCount(self.options.len()));
        }
        if self.correct_answer >= OPTIONS_PER_QUESTION {
            return Err(QuestionError::AnswerOutOfRange(self.correct_answer));
        }
        Ok(())
    }

    pub fn is_correct(&self, selected: usize) -> bool {
        self.correct_answer == selected
    }

    pub fn correct_option(&self) -> &str {
        self.options
            .get(self.correct_answer)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Basic concepts",
            Difficulty::Medium => "Requires analysis",
            Difficulty::Hard => "Expert level",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /generate-mcqs`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct QuizConfig {
    #[schema(example = "Space Exploration")]
    pub topic: String,
    #[schema(example = 10)]
    pub count: u32,
    pub difficulty: Difficulty,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct GenerateQuizResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub questions: Vec<Question>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Question>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Question>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
