use serde::Deserialize;

/// Settings exactly as they appear in `settings.yaml` + environment.
#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub logging: LoggingSettings,
    pub database: DatabaseSettings,
    pub store_api: RawStoreApiSettings,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// Default tracing filter, used when `RUST_LOG` is not set.
    pub level: String,
}

/// Database connection and pool configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds.
    pub acquire_timeout: u64,
    /// Seconds.
    pub idle_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawStoreApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    #[serde(default)]
    pub api_key: Option<String>,
}
