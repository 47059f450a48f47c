//! Product-to-shop service links.

pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::ApiDoc;
pub use models::{CreateServiceableProduct, ServiceableProduct};
pub use service::ServiceableProductService;
