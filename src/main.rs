use actix_web::HttpServer;
use signed_users_api::{AppConfig, AppState, create_app, logging::init_logging};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A missing .env file is fine; real deployments set the environment
    let _ = dotenvy::dotenv();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Refusing to start: {e}");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Logging disabled: {e}");
    }

    let bind_address = config.server.bind_address.clone();
    let state = AppState::new(config).map_err(|e| {
        tracing::error!(error = %e, "Failed to build application state");
        std::io::Error::other(e)
    })?;

    tracing::info!(
        bind_address = %bind_address,
        max_skew_ms = state.config.integrity.max_skew_ms,
        route_prefix = %state.config.integrity.route_prefix,
        uniform_rejections = state.config.integrity.uniform_rejections,
        "Starting server"
    );

    HttpServer::new(move || create_app(&state))
        .bind(&bind_address)?
        .run()
        .await
}
