/// Error type for connection management and health checks
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver-level failure (URI parsing, option validation, commands)
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// The server could not be reached after the client was built
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A ping or other liveness probe failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
