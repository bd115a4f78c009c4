use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::models::{ErrorResponse, QuestionError};

/// Failures of the generation endpoint. Only rate limiting and billing keep
/// their upstream status; everything else is a 500.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("AI_GATEWAY_API_KEY is not configured")]
    MissingApiKey,
    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited,
    #[error("Payment required. Please add credits to continue.")]
    PaymentRequired,
    #[error("Failed to generate questions")]
    Upstream { status: u16, body: String },
    #[error("Failed to reach AI gateway: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid response from AI")]
    InvalidResponse,
    #[error("Invalid question payload: {0}")]
    MalformedQuestions(String),
    #[error("Invalid question payload: question {number}: {source}")]
    InvalidQuestion { number: usize, source: QuestionError },
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ResponseError for GenerateError {
    fn status_code(&self) -> StatusCode {
        match self {
            GenerateError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            GenerateError::PaymentRequired => StatusCode::PAYMENT_REQUIRED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
