pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::ApiDoc;
pub use models::{CreateProduct, Product, UpdateProduct};
pub use service::ProductService;
