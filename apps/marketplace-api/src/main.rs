use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;

    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    // Unique names and 2dsphere positions must exist before the first write
    domain_marketplace::init_indexes(&db)
        .await
        .map_err(|e| eyre::eyre!("Failed to create indexes: {}", e))?;

    info!(
        timeout_secs = config.store_timeout.as_secs(),
        "Store calls bounded by deadline"
    );

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let api_routes = api::routes(&state);

    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    let app = router.merge(health_router(state.config.app.clone()));

    info!("Starting Marketplace API with graceful shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            drop(state.mongo_client);
            info!("MongoDB connection closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Marketplace API shutdown complete");
    Ok(())
}
