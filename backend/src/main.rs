use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{http, web, App, HttpServer};
use backend::config::{AppConfig, Variant};
use backend::{configure_variant, AppState};
use env_logger::Env;
use log::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return Err(std::io::Error::other(e));
        }
    };
    let host = config.host.clone();
    let port = config.port;
    let variant = config.variant;
    let allowed_origin = config.allowed_origin.clone();

    let state = match AppState::from_config(config) {
        Ok(state) => state,
        Err(e) => {
            error!("{}", e);
            return Err(std::io::Error::other(e));
        }
    };

    info!("Server ({:?} variant) running at http://{}:{}", variant, host, port);

    HttpServer::new(move || {
        let cors = match variant {
            Variant::Api => Cors::default()
                .allowed_origin(&allowed_origin)
                .allowed_methods(vec!["GET", "POST"])
                .allowed_headers(vec![http::header::CONTENT_TYPE])
                .supports_credentials()
                .max_age(3600),
            Variant::Form => Cors::default(),
        };
        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .configure(configure_variant(variant))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
