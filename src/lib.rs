use actix_web::dev::Server;
use actix_web::http::Method;
use actix_web::{middleware, web, App, HttpServer};
use std::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Settings;
use crate::generator::QuestionGenerator;
use crate::models::{Difficulty, ErrorResponse, GenerateQuizResponse, Question, QuizConfig};

pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod quiz;
pub mod state;

use state::AppState;

pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health_check,
        handlers::generate_mcqs,
    ),
    components(
        schemas(
            Question, QuizConfig, Difficulty, GenerateQuizResponse, ErrorResponse
        )
    ),
    tags(
        (name = "System", description = "System endpoints"),
        (name = "Generation", description = "AI quiz generation")
    )
)]
pub struct ApiDoc;

pub fn run(listener: TcpListener, settings: Settings) -> Result<Server, std::io::Error> {
    let data = web::Data::new(AppState {
        generator: QuestionGenerator::new(settings.ai),
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .app_data(web::JsonConfig::default().error_handler(handlers::json_error_handler))
            .wrap(middleware::Logger::default())
            .wrap(
                middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", ALLOWED_HEADERS)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi())
            )
            .route("/health", web::get().to(handlers::health_check))
            .service(
                web::resource("/generate-mcqs")
                    .route(web::post().to(handlers::generate_mcqs))
                    .route(web::method(Method::OPTIONS).to(handlers::preflight))
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
