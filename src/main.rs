use std::sync::{Arc, Mutex};

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use lendit::config::AppConfig;
use lendit::db;
use lendit::handlers;
use lendit::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    tracing::info!("database ready at {}", config.database_url);

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/users", post(handlers::users::create_user))
        .route("/users/:id", get(handlers::users::get_user))
        .route("/items", post(handlers::items::create_item))
        .route("/items/:id", get(handlers::items::get_item))
        .route(
            "/bookings",
            post(handlers::bookings::create_booking).get(handlers::bookings::list_by_booker),
        )
        .route("/bookings/owner", get(handlers::bookings::list_by_owner))
        .route(
            "/bookings/:id",
            get(handlers::bookings::get_booking)
                .patch(handlers::bookings::update_booking_status),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
