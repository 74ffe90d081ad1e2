use actix_files as fs;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use std::path::Path;

use secret_shopper_site::config::{get_site_config, FormOptions, ServerConfig};
use secret_shopper_site::models::application::ApplicationValidator;
use secret_shopper_site::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let server_config = ServerConfig::from_env();

    let minimum_age = i64::from(FormOptions::default().minimum_age);
    let validator = ApplicationValidator::new(minimum_age).map_err(|e| {
        error!("Failed to build application validator: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;
    let validator = web::Data::new(validator);
    let site = web::Data::new(get_site_config());

    if !Path::new(&server_config.static_dir).exists() {
        warn!(
            "Static directory {} not found, assets will 404",
            server_config.static_dir
        );
    }

    info!(
        "Starting {} on http://{}:{}...",
        site.name, server_config.host, server_config.port
    );

    let static_dir = server_config.static_dir.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(site.clone())
            .app_data(validator.clone())
            .service(fs::Files::new("/static", &static_dir))
            .configure(routes::configure)
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .run()
    .await
}
