//! Front-end side of quiz generation: one POST to the generation endpoint,
//! one outcome.

use reqwest::Client;

use crate::models::{ErrorResponse, GenerateQuizResponse, Question, QuizConfig};

pub const GENERATE_PATH: &str = "/generate-mcqs";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Non-2xx answer; carries the server's `error` field or a generic message.
    #[error("{0}")]
    Server(String),
    #[error("No questions generated")]
    NoQuestions,
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct QuizClient {
    http: Client,
    endpoint: String,
}

impl QuizClient {
    pub fn new(base_url: &str) -> Self {
        QuizClient {
            http: Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), GENERATE_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn generate(&self, config: &QuizConfig) -> Result<Vec<Question>, ClientError> {
        let response = self.http.post(&self.endpoint).json(config).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .ok()
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "Failed to generate quiz".to_string());
            log::error!("Quiz generation failed with status {}: {}", status, message);
            return Err(ClientError::Server(message));
        }

        let body: GenerateQuizResponse = response.json().await?;
        if body.questions.is_empty() {
            return Err(ClientError::NoQuestions);
        }
        Ok(body.questions)
    }
}
