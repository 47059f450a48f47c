use axum::Router;
use domain_marketplace::MongoStore;
use domain_marketplace::products::{ProductService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let store = MongoStore::new(&state.db, state.config.store_timeout);
    handlers::router(ProductService::new(store))
}
