//! Pharmaceutical Inventory Dashboard - Backend library
//!
//! JSON query API over the inventory core plus the upload and stock alert
//! relay used by the dashboard.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::seed::inventory_seed;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod store;

pub use crate::config::Config;
pub use error::{AppError, AppResult};
pub use store::{DatasetSource, InventoryStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: InventoryStore,
    pub config: Arc<Config>,
}

impl AppState {
    /// State with the dataset the configuration asks for at startup
    pub fn new(config: Config) -> Self {
        let grouping = config.inventory.grouping;
        let store = if config.inventory.seed_on_start {
            InventoryStore::with_records(grouping, DatasetSource::Seed, inventory_seed())
        } else {
            InventoryStore::new(grouping)
        };
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .merge(routes::relay_routes(state.config.uploads.max_bytes))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
