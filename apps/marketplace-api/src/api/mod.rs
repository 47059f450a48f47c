//! API routes module
//!
//! Wires each marketplace resource to a MongoDB-backed store.

pub mod health;
pub mod products;
pub mod serviceable_products;
pub mod shops;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/users", users::router(state))
        .nest("/shops", shops::router(state))
        .nest("/products", products::router(state))
        .nest("/serviceable-products", serviceable_products::router(state))
        .merge(health::router(state.clone()))
}
