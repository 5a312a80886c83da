use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Application configuration structure
///
/// Layered: built-in defaults, overridden by `config.yaml`, overridden by
/// `APP_`-prefixed environment variables (nested keys joined with `__`,
/// e.g. `APP_STORAGE__BUCKET`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    /// When true, 500 responses include backend error detail
    pub debug: bool,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Object-storage backend configuration
///
/// Credentials are handed to the storage gateway at startup; nothing is read
/// from ambient global state after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub bucket: String,
    /// Custom endpoint for S3-compatible providers (MinIO, R2, Spaces).
    /// When set, path-style addressing is used.
    pub endpoint_url: Option<String>,
    /// Lifetime of signed download URLs, in seconds
    pub signed_url_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "file-manager-api".to_string(),
                version: "1.0.0".to_string(),
                debug: true,
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3001,
            },
            storage: StorageConfig {
                access_key_id: String::new(),
                secret_access_key: String::new(),
                region: "us-east-1".to_string(),
                bucket: "file-manager-uploads".to_string(),
                endpoint_url: None,
                signed_url_ttl_secs: 3600,
            },
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        info!("Loading application configuration...");

        let config: AppConfig = Figment::new()
            // Start with default values
            .merge(Serialized::defaults(Self::default()))
            // Override with config file if present
            .merge(Yaml::file("config.yaml"))
            // Override with environment variables
            .merge(Env::prefixed("APP_").split("__"))
            .extract()?;

        info!("Configuration loaded successfully");
        info!("name: {:?}", config.app.name);
        info!("Region: {}", config.storage.region);
        info!("Bucket: {}", config.storage.bucket);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_upload_bucket() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.storage.bucket, "file-manager-uploads");
        assert_eq!(config.storage.signed_url_ttl_secs, 3600);
        assert!(config.storage.endpoint_url.is_none());
    }
}
