//! Shops: unique by name, located by coordinates.

pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::ApiDoc;
pub use models::{CreateShop, Shop, UpdateShop};
pub use service::ShopService;
