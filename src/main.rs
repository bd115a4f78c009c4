use env_logger::Env;
use quizmaster::config::Settings;
use quizmaster::run;
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = Settings::from_env();
    if settings.ai.api_key.is_none() {
        log::warn!("AI_GATEWAY_API_KEY is not set; generation requests will fail");
    }

    log::info!("Starting server at http://{}", settings.bind_address);
    log::info!("Swagger UI available at http://{}/swagger-ui/", settings.bind_address);

    let listener = TcpListener::bind(&settings.bind_address)?;
    run(listener, settings)?.await
}
