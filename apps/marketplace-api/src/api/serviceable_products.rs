use axum::Router;
use domain_marketplace::MongoStore;
use domain_marketplace::serviceable_products::{ServiceableProductService, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let store = MongoStore::new(&state.db, state.config.store_timeout);
    handlers::router(ServiceableProductService::new(store))
}
