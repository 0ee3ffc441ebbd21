#![allow(non_snake_case)]
use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware};
use dotenv::dotenv;
use log::{error, info};

use RustedIntegralAPI::Utils::logger::init_logging;
use RustedIntegralAPI::api::handlers::configure_routes;

/// Reads HOST and PORT from the environment, falling back to defaults on
/// missing or malformed values.
fn load_server_config() -> (String, u16) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            error!("PORT is not a valid port number, falling back to 8080");
            8080
        });
    (host, port)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    init_logging();
    let (host, port) = load_server_config();
    info!("starting integral service on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))?
    .workers(4)
    .run()
    .await
}
