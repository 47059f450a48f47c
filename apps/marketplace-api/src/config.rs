use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_parse, server::ServerConfig};
use database::mongodb::MongoConfig;
use std::time::Duration;

pub use core_config::Environment;

/// Application configuration composed from the shared config sections
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Deadline for each store call (`STORE_TIMEOUT_SECS`, default 5)
    pub store_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let store_timeout = store_timeout_from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            store_timeout,
        })
    }
}

fn store_timeout_from_env() -> Result<Duration, ConfigError> {
    let secs: u64 = env_parse("STORE_TIMEOUT_SECS", "5")?;
    if secs == 0 {
        return Err(ConfigError::ParseError {
            key: "STORE_TIMEOUT_SECS".to_string(),
            details: "must be at least 1 second".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
