//! Route definitions
//!
//! All API routes organized by domain and mounted under /api.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{admin, auth, health, items, points, swaps};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/items", item_routes())
        .nest("/points", points_routes())
        .nest("/swaps", swap_routes())
        .nest("/admin", admin_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh_token))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Item routes
fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list_items).post(items::create_item))
        .route("/featured", get(items::featured_items))
        .route("/user/items", get(items::my_items))
        .route(
            "/:id",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/:id/redeem", post(items::redeem_item))
        .route("/:id/redeem-equivalent", post(items::redeem_item))
}

/// Points routes
fn points_routes() -> Router<AppState> {
    Router::new()
        .route("/balance", get(points::balance))
        .route("/transactions", get(points::transactions))
        .route("/leaderboard", get(points::leaderboard))
        .route("/items/:item_id/redeem", post(items::redeem_item))
        .route("/admin/add-points", post(points::add_points))
}

/// Swap request routes
fn swap_routes() -> Router<AppState> {
    Router::new()
        .route("/items/:item_id/request", post(swaps::create_request))
        .route("/requests/:id/approve", put(swaps::approve_request))
        .route("/requests/:id/reject", put(swaps::reject_request))
        .route("/requests/:id/complete", put(swaps::complete_request))
        .route("/user/requests", get(swaps::my_requests))
        .route("/user/pending-requests", get(swaps::pending_requests))
}

/// Admin routes
fn admin_routes() -> Router<AppState> {
    Router::new().route("/logs", get(admin::recent_logs))
}
