use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use coliving_booking_api::{
    config::AppConfig, configure, services::platform_client::PlatformClient, AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    log::info!("Loaded config: {:?}", config);

    let platform = PlatformClient::new(config.platform_api_url.clone(), config.platform_timeout)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let host = config.host.clone();
    let port = config.port;
    let state = web::Data::new(AppState { config, platform });

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await
}
