//! Type-safe error codes for API responses.
//!
//! Each code has a client-facing string identifier, an integer for logs and
//! dashboards, and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Malformed request that fits no narrower category
    BadRequest,

    /// Field constraints rejected the request body
    ValidationError,

    /// Path segment is not a UUID
    InvalidUuid,

    /// Body is not syntactically valid JSON
    InvalidJson,

    /// Body is JSON but does not match the expected shape
    JsonExtraction,

    /// Query string is missing a parameter or holds an unparsable value
    InvalidQuery,

    NotFound,

    /// Resource with the same unique key already exists
    Conflict,

    MethodNotAllowed,

    InternalError,

    // Database errors (2000-2999)
    /// Driver or server reported a failure
    DatabaseError,

    /// Store call exceeded its deadline
    DatabaseTimeout,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier for clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::InvalidJson => "INVALID_JSON",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DatabaseTimeout => "DATABASE_TIMEOUT",
        }
    }

    /// Integer code for logs and metrics.
    ///
    /// - 1000-1999: request and generic server errors
    /// - 2000-2999: database errors
    pub fn code(&self) -> i32 {
        match self {
            Self::BadRequest => 1000,
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Conflict => 1008,
            Self::InvalidJson => 1010,
            Self::InvalidQuery => 1012,
            Self::MethodNotAllowed => 1013,
            Self::DatabaseError => 2003,
            Self::DatabaseTimeout => 2013,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad request",
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::InvalidJson => "Invalid JSON format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::InvalidQuery => "Invalid query parameters",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource already exists",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Database error occurred",
            Self::DatabaseTimeout => "Database operation timed out",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
