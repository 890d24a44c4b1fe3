//! Route definitions for the Pharmaceutical Inventory Dashboard

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Inventory queries over the current snapshot
        .nest("/inventory", inventory_routes())
}

/// Inventory routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/records",
            get(handlers::list_records).put(handlers::replace_records),
        )
        .route("/stats", get(handlers::get_stats))
        .route("/categories", get(handlers::get_categories))
        .route("/products", get(handlers::list_products))
        .route("/products/:name", get(handlers::get_product))
        .route("/expiry", get(handlers::get_expiry))
        .route("/reorder-plan", get(handlers::get_reorder_plan))
}

/// Upload and alert relay routes, served at the root for the dashboard client
pub fn relay_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/upload-files",
            post(handlers::upload_files).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/process-inventory", post(handlers::process_inventory))
        .route("/send-email", post(handlers::send_email))
}
