//! Users: registration with hashed passwords, lookup by id or username,
//! partial updates and proximity search.

pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::ApiDoc;
pub use models::{CreateUser, UpdateUser, User, UserResponse};
pub use service::UserService;
