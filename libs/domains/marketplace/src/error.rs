use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use std::time::Duration;
use thiserror::Error;

use crate::store::Entity;

#[derive(Debug, Error)]
pub enum MarketplaceError {
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    #[error("{entity} '{key}' already exists")]
    AlreadyExists { entity: &'static str, key: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Store call exceeded {0:?}")]
    Timeout(Duration),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type MarketplaceResult<T> = Result<T, MarketplaceError>;

impl MarketplaceError {
    pub fn not_found<T: Entity>(key: impl ToString) -> Self {
        MarketplaceError::NotFound {
            entity: T::KIND,
            key: key.to_string(),
        }
    }

    pub fn already_exists<T: Entity>(key: impl ToString) -> Self {
        MarketplaceError::AlreadyExists {
            entity: T::KIND,
            key: key.to_string(),
        }
    }
}

/// Convert MarketplaceError to AppError for standardized error responses
impl From<MarketplaceError> for AppError {
    fn from(err: MarketplaceError) -> Self {
        match err {
            err @ MarketplaceError::NotFound { .. } => AppError::NotFound(err.to_string()),
            err @ MarketplaceError::AlreadyExists { .. } => AppError::Conflict(err.to_string()),
            MarketplaceError::Validation(msg) => AppError::BadRequest(msg),
            MarketplaceError::Database(msg) => AppError::Database(msg),
            err @ MarketplaceError::Timeout(_) => AppError::Timeout(err.to_string()),
            MarketplaceError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for MarketplaceError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for MarketplaceError {
    fn from(err: mongodb::error::Error) -> Self {
        MarketplaceError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for MarketplaceError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        MarketplaceError::Internal(format!("Failed to encode document: {err}"))
    }
}

impl From<mongodb::bson::de::Error> for MarketplaceError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        MarketplaceError::Database(format!("Failed to decode document: {err}"))
    }
}

impl From<validator::ValidationErrors> for MarketplaceError {
    fn from(err: validator::ValidationErrors) -> Self {
        MarketplaceError::Validation(err.to_string())
    }
}
