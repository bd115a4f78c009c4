use actix_web::{web, HttpResponse, Responder};

use crate::error::GenerateError;
use crate::models::{ErrorResponse, GenerateQuizResponse, QuizConfig};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses(
        (status = 200, description = "Health Check", body = String)
    )
)]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

#[utoipa::path(
    post,
    path = "/generate-mcqs",
    tag = "Generation",
    request_body = QuizConfig,
    responses(
        (status = 200, description = "Generated questions", body = GenerateQuizResponse),
        (status = 402, description = "AI gateway requires payment", body = ErrorResponse),
        (status = 429, description = "AI gateway rate limit exceeded", body = ErrorResponse),
        (status = 500, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn generate_mcqs(
    data: web::Data<AppState>,
    req: web::Json<QuizConfig>,
) -> Result<HttpResponse, GenerateError> {
    let config = req.into_inner();
    log::info!(
        "Generating {} {} questions about {:?}",
        config.count,
        config.difficulty,
        config.topic
    );

    match data.generator.generate(&config).await {
        Ok(questions) => Ok(HttpResponse::Ok().json(GenerateQuizResponse { questions })),
        Err(e) => {
            log::error!("Error generating MCQs: {}", e);
            Err(e)
        }
    }
}

/// CORS preflight; the allow headers come from the default headers middleware.
pub async fn preflight() -> impl Responder {
    HttpResponse::Ok().finish()
}

pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    log::warn!("Rejected generation request body: {}", err);
    GenerateError::InvalidRequest(err.to_string()).into()
}
