use std::io;

use actix_web::{App, HttpServer, middleware, web};
use env_logger::Env;

use outfit_ai::db::{establish_connection_pool, run_migrations};
use outfit_ai::models::config::ServerConfig;
use outfit_ai::repository::DieselRepository;
use outfit_ai::routes::configure;
use outfit_ai::state::AppState;

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    log::error!("{context}: {err}");
    io::Error::other(format!("{context}: {err}"))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ServerConfig::load().map_err(|e| startup_error("Failed to load config", e))?;

    let pool = establish_connection_pool(&config.database_url)
        .map_err(|e| startup_error("Failed to open database", e))?;
    run_migrations(&pool).map_err(|e| startup_error("Failed to run migrations", e))?;

    let state = web::Data::new(AppState::new(DieselRepository::new(pool), &config));

    // Held until the server stops so shutdown cancels a pending generation.
    let _initial_generation = AppState::schedule_initial_generation(&state)
        .map_err(|e| startup_error("Failed to read wardrobe", e))?;

    let bind_address = (config.address.clone(), config.port);
    log::info!("Starting server on {}:{}", bind_address.0, bind_address.1);

    let max_upload_bytes = config.max_upload_bytes;
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure(max_upload_bytes))
    })
    .bind(bind_address)?
    .run()
    .await
}
