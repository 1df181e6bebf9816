use actix_web::{web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod db;
mod marketplace;
mod model;
mod pricing;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = AppState::new(&config).await;

    let estimate_service = web::Data::new(state.estimate_service);
    let db_pool = web::Data::new(state.db_pool);

    tracing::info!("Starting recon pricing server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(estimate_service.clone())
            .app_data(db_pool.clone())
            .configure(api::estimate::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
