//! Hostocars API Server
//!
//! Garage management backend: cars, their intervention history down to
//! individual operation lines, and a contact book, served as JSON over HTTP
//! from a local SQLite database. A tray icon gives desktop users a shortcut
//! to the web front end and a way to stop the server.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod loggable;
mod system;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod integration_tests;

use adapters::{
    SqliteCarRepository, SqliteContactRepository, SqliteInterventionRepository,
    SqliteOperationLineRepository, SqliteOperationRepository,
};
use app::{CarService, ContactService, InterventionService, OperationService};
use config::Config;
use loggable::MethodLogger;
use system::{Shutdown, SystemBrowser, TrayLauncher};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub car_service: Arc<CarService<SqliteCarRepository>>,
    pub intervention_service: Arc<InterventionService<SqliteInterventionRepository>>,
    pub operation_service:
        Arc<OperationService<SqliteOperationRepository, SqliteOperationLineRepository>>,
    pub contact_service: Arc<ContactService<SqliteContactRepository>>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, logger: MethodLogger) -> Self {
        let car_repo = Arc::new(SqliteCarRepository::new(db.clone()));
        let intervention_repo = Arc::new(SqliteInterventionRepository::new(db.clone()));
        let operation_repo = Arc::new(SqliteOperationRepository::new(db.clone()));
        let line_repo = Arc::new(SqliteOperationLineRepository::new(db.clone()));
        let contact_repo = Arc::new(SqliteContactRepository::new(db));

        Self {
            car_service: Arc::new(CarService::new(car_repo, logger.clone())),
            intervention_service: Arc::new(InterventionService::new(
                intervention_repo,
                logger.clone(),
            )),
            operation_service: Arc::new(OperationService::new(
                operation_repo,
                line_repo,
                logger.clone(),
            )),
            contact_service: Arc::new(ContactService::new(contact_repo, logger)),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Cars
        .route("/cars/all", get(handlers::list_cars))
        .route("/cars/save", post(handlers::save_car))
        .route("/cars/:id", get(handlers::get_car))
        .route("/cars/:id/update", put(handlers::update_car))
        .route("/cars/:id/delete", delete(handlers::delete_car))
        // Interventions
        .route("/cars/:id/interventions", get(handlers::list_interventions))
        .route(
            "/cars/:id/interventions/save",
            post(handlers::save_intervention),
        )
        .route("/interventions/:id", get(handlers::get_intervention))
        .route(
            "/interventions/:id/update",
            put(handlers::update_intervention),
        )
        .route(
            "/interventions/:id/delete",
            delete(handlers::delete_intervention),
        )
        // Operations
        .route(
            "/interventions/:id/operations",
            get(handlers::list_operations),
        )
        .route(
            "/interventions/:id/operations/save",
            post(handlers::save_operation),
        )
        .route("/operations/:id", get(handlers::get_operation))
        .route("/operations/:id/update", put(handlers::update_operation))
        .route("/operations/:id/delete", delete(handlers::delete_operation))
        // Operation lines
        .route("/operations/:id/lines", get(handlers::list_operation_lines))
        .route(
            "/operations/:id/lines/save",
            post(handlers::save_operation_line),
        )
        .route("/operation-lines/:id", get(handlers::get_operation_line))
        .route(
            "/operation-lines/:id/update",
            put(handlers::update_operation_line),
        )
        .route(
            "/operation-lines/:id/delete",
            delete(handlers::delete_operation_line),
        )
        // Contacts
        .route("/contacts/all", get(handlers::list_contacts))
        .route("/contacts/save", post(handlers::save_contact))
        .route("/contacts/:id", get(handlers::get_contact))
        .route("/contacts/:id/update", put(handlers::update_contact))
        .route("/contacts/:id/delete", delete(handlers::delete_contact))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,hostocars_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Hostocars...");

    // Load configuration
    let config = Config::from_env();

    // Open SQLite and create missing tables
    tracing::info!("Connecting to database...");
    let db = adapters::connect(&config.database_url).await?;
    tracing::info!("Database connected");

    let state = AppState::new(db, MethodLogger::from_config(&config));
    let app = build_router(state);

    let shutdown = Shutdown::new();
    tokio::spawn(system::listen_for_signals(shutdown.clone()));

    let listener =
        tokio::net::TcpListener::bind((config.server_address.as_str(), config.server_port))
            .await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    // Tray icon once the server is reachable
    if config.tray_enabled {
        let tray = Arc::new(TrayLauncher::new(
            &config,
            system::native_tray(),
            Arc::new(SystemBrowser),
            shutdown.clone(),
        ));
        tray.install().await;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
