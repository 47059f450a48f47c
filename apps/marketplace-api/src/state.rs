//! Shared application state.

use mongodb::{Client, Database};

/// Cloned into every router; all fields are cheap handle clones.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// MongoDB client (shares the underlying connection pool)
    pub mongo_client: Client,
    pub db: Database,
}
